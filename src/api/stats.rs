//! Aggregate statistics endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, services::stats::GlobalStats};

use super::AuthenticatedUser;

/// Combined statistics across users, books and loans
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Global statistics", body = GlobalStats)
    )
)]
pub async fn global_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<GlobalStats>> {
    claims.require_admin()?;

    let stats = state.services.stats.global().await?;
    Ok(Json(stats))
}
