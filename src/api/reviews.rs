//! Book review endpoints

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
        review::{CreateReview, RatingSummary, Review, ReviewQuery, UpdateReview, VoteReview},
    },
};

use super::AuthenticatedUser;

/// Paginated review list response
#[derive(Serialize, ToSchema)]
pub struct ReviewListResponse {
    pub items: Vec<Review>,
    pub total: i64,
}

/// Create a review for a book
#[utoipa::path(
    post,
    path = "/reviews",
    tag = "reviews",
    security(("bearer_auth" = [])),
    request_body = CreateReview,
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 404, description = "Book not found"),
        (status = 409, description = "User has already reviewed this book")
    )
)]
pub async fn create_review(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateReview>,
) -> AppResult<(StatusCode, Json<Review>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let review = state.services.reviews.create(claims.user_id, request).await?;

    state
        .services
        .activity
        .record_background(RecordActivity {
            user_id: claims.user_id,
            kind: ActivityKind::Review,
            description: None,
            query: None,
            book_id: Some(review.book_id),
            loan_id: None,
            review_id: Some(review.id),
            ip_address: None,
            user_agent: None,
            metadata: None,
        })
        .await;

    Ok((StatusCode::CREATED, Json(review)))
}

/// Update a review
#[utoipa::path(
    put,
    path = "/reviews/{id}",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Review ID")),
    request_body = UpdateReview,
    responses(
        (status = 200, description = "Review updated", body = Review),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn update_review(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<UpdateReview>,
) -> AppResult<Json<Review>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let review = state.services.reviews.update(id, &claims, request).await?;
    Ok(Json(review))
}

/// Delete a review
#[utoipa::path(
    delete,
    path = "/reviews/{id}",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Review not found")
    )
)]
pub async fn delete_review(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.reviews.delete(id, &claims).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Vote on a review's helpfulness
#[utoipa::path(
    post,
    path = "/reviews/{id}/vote",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Review ID")),
    request_body = VoteReview,
    responses(
        (status = 200, description = "Vote recorded", body = Review),
        (status = 404, description = "Review not found")
    )
)]
pub async fn vote_review(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<VoteReview>,
) -> AppResult<Json<Review>> {
    let review = state
        .services
        .reviews
        .vote(id, claims.user_id, request.vote)
        .await?;
    Ok(Json(review))
}

/// List a book's reviews
#[utoipa::path(
    get,
    path = "/books/{id}/reviews",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Book ID"),
        ReviewQuery
    ),
    responses(
        (status = 200, description = "Reviews", body = ReviewListResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn list_book_reviews(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Query(query): Query<ReviewQuery>,
) -> AppResult<Json<ReviewListResponse>> {
    let (items, total) = state.services.reviews.list_by_book(id, &query).await?;
    Ok(Json(ReviewListResponse { items, total }))
}

/// A book's rating summary
#[utoipa::path(
    get,
    path = "/books/{id}/rating",
    tag = "reviews",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Rating summary", body = RatingSummary),
        (status = 404, description = "Book not found")
    )
)]
pub async fn book_rating(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<RatingSummary>> {
    let summary = state.services.reviews.rating_summary(id).await?;
    Ok(Json(summary))
}
