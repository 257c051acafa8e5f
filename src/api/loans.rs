//! Loan lifecycle endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        activity::RecordActivity,
        enums::ActivityKind,
        loan::{CreateLoan, LoanDetails, LoanQuery, LoanStats, RenewLoan, ReturnLoan},
    },
};

use super::AuthenticatedUser;

/// Paginated loan list response
#[derive(Serialize, ToSchema)]
pub struct LoanListResponse {
    pub items: Vec<LoanDetails>,
    pub total: i64,
}

/// Result of an overdue sweep
#[derive(Serialize, ToSchema)]
pub struct SweepResponse {
    /// Number of loans flipped to overdue
    pub updated: u64,
}

fn loan_event(details: &LoanDetails, kind: ActivityKind) -> RecordActivity {
    RecordActivity {
        user_id: details.loan.user_id,
        kind,
        description: None,
        query: None,
        book_id: Some(details.loan.book_id),
        loan_id: Some(details.loan.id),
        review_id: None,
        ip_address: None,
        user_agent: None,
        metadata: None,
    }
}

/// List loans with filters and pagination
#[utoipa::path(
    get,
    path = "/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(LoanQuery),
    responses(
        (status = 200, description = "Loans", body = LoanListResponse),
        (status = 404, description = "Filtered user or book not found")
    )
)]
pub async fn list_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<LoanQuery>,
) -> AppResult<Json<LoanListResponse>> {
    claims.require_admin()?;

    let (items, total) = state.services.loans.list(&query).await?;
    Ok(Json(LoanListResponse { items, total }))
}

/// Create a new loan
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    request_body = CreateLoan,
    responses(
        (status = 201, description = "Loan created", body = LoanDetails),
        (status = 404, description = "User or book not found"),
        (status = 409, description = "User already has an open loan for this book"),
        (status = 422, description = "Business rule violated")
    )
)]
pub async fn create_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateLoan>,
) -> AppResult<(StatusCode, Json<LoanDetails>)> {
    claims.require_self_or_admin(request.user_id)?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let loan = state.services.loans.create(request).await?;

    state
        .services
        .activity
        .record_background(loan_event(&loan, ActivityKind::Loan))
        .await;

    Ok((StatusCode::CREATED, Json(loan)))
}

/// Get a loan by ID
///
/// Reading a loan re-evaluates its overdue status, so a lapsed loan comes
/// back already flipped to `overdue` with its fine recomputed.
#[utoipa::path(
    get,
    path = "/loans/{id}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 200, description = "Loan", body = LoanDetails),
        (status = 403, description = "Not the borrower"),
        (status = 404, description = "Loan not found")
    )
)]
pub async fn get_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<LoanDetails>> {
    let loan = state.services.loans.get(id, &claims).await?;
    Ok(Json(loan))
}

/// Renew a loan
#[utoipa::path(
    post,
    path = "/loans/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan ID")),
    request_body = RenewLoan,
    responses(
        (status = 200, description = "Loan renewed", body = LoanDetails),
        (status = 404, description = "Loan not found"),
        (status = 422, description = "Loan is overdue, returned, or at the renewal cap")
    )
)]
pub async fn renew_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<RenewLoan>,
) -> AppResult<Json<LoanDetails>> {
    claims.require_admin()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let loan = state.services.loans.renew(id, request).await?;
    Ok(Json(loan))
}

/// Return a loan
#[utoipa::path(
    post,
    path = "/loans/{id}/return",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan ID")),
    request_body = ReturnLoan,
    responses(
        (status = 200, description = "Loan returned", body = LoanDetails),
        (status = 404, description = "Loan not found"),
        (status = 422, description = "Loan already returned")
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<ReturnLoan>,
) -> AppResult<Json<LoanDetails>> {
    claims.require_admin()?;
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let loan = state.services.loans.return_loan(id, request).await?;

    state
        .services
        .activity
        .record_background(loan_event(&loan, ActivityKind::Return))
        .await;

    Ok(Json(loan))
}

/// Delete a closed loan record
#[utoipa::path(
    delete,
    path = "/loans/{id}",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Loan ID")),
    responses(
        (status = 204, description = "Loan deleted"),
        (status = 404, description = "Loan not found"),
        (status = 422, description = "Loan is still open")
    )
)]
pub async fn delete_loan(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_admin()?;

    state.services.loans.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Flip every lapsed loan to overdue
#[utoipa::path(
    post,
    path = "/loans/sweep-overdue",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sweep completed", body = SweepResponse)
    )
)]
pub async fn sweep_overdue(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<SweepResponse>> {
    claims.require_admin()?;

    let updated = state.services.loans.sweep_overdue().await?;
    Ok(Json(SweepResponse { updated }))
}

/// Loan statistics
#[utoipa::path(
    get,
    path = "/loans/stats",
    tag = "loans",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Loan statistics", body = LoanStats)
    )
)]
pub async fn loan_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<LoanStats>> {
    claims.require_admin()?;

    let stats = state.services.loans.stats().await?;
    Ok(Json(stats))
}

/// List a user's loans
#[utoipa::path(
    get,
    path = "/users/{id}/loans",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "User ID"),
        LoanQuery
    ),
    responses(
        (status = 200, description = "Loans", body = LoanListResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn list_user_loans(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Query(mut query): Query<LoanQuery>,
) -> AppResult<Json<LoanListResponse>> {
    claims.require_self_or_admin(id)?;

    query.user_id = Some(id);
    let (items, total) = state.services.loans.list(&query).await?;
    Ok(Json(LoanListResponse { items, total }))
}
