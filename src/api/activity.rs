//! Activity log endpoints

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::activity::{Activity, ActivityQuery, ActivityStats, RecordActivity},
};

use super::AuthenticatedUser;

/// Paginated activity list response
#[derive(Serialize, ToSchema)]
pub struct ActivityListResponse {
    pub items: Vec<Activity>,
    pub total: i64,
}

#[derive(Deserialize, IntoParams)]
pub struct ActivityStatsQuery {
    /// Scope the counts to a single user
    pub user_id: Option<i32>,
}

/// Record an activity event
#[utoipa::path(
    post,
    path = "/activity",
    tag = "activity",
    security(("bearer_auth" = [])),
    request_body = RecordActivity,
    responses(
        (status = 201, description = "Event recorded", body = Activity),
        (status = 404, description = "User not found")
    )
)]
pub async fn record_activity(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<RecordActivity>,
) -> AppResult<(StatusCode, Json<Activity>)> {
    claims.require_self_or_admin(request.user_id)?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let event = state.services.activity.record(request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// List activity events with filters and pagination
#[utoipa::path(
    get,
    path = "/activity",
    tag = "activity",
    security(("bearer_auth" = [])),
    params(ActivityQuery),
    responses(
        (status = 200, description = "Activity events", body = ActivityListResponse),
        (status = 404, description = "Filtered user not found")
    )
)]
pub async fn list_activity(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<ActivityListResponse>> {
    claims.require_admin()?;

    let (items, total) = state.services.activity.search(&query).await?;
    Ok(Json(ActivityListResponse { items, total }))
}

/// Activity statistics: event counts by kind
#[utoipa::path(
    get,
    path = "/activity/stats",
    tag = "activity",
    security(("bearer_auth" = [])),
    params(ActivityStatsQuery),
    responses(
        (status = 200, description = "Activity statistics", body = ActivityStats)
    )
)]
pub async fn activity_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<ActivityStatsQuery>,
) -> AppResult<Json<ActivityStats>> {
    claims.require_admin()?;

    let stats = state.services.activity.stats(query.user_id).await?;
    Ok(Json(stats))
}
