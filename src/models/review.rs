//! Book review model and request DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Review model from database. One review per (user, book) pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub id: i32,
    pub book_id: i32,
    pub user_id: i32,
    /// Rating from 1 to 5
    pub rating: i16,
    pub comment: Option<String>,
    /// User IDs that marked the review helpful
    pub likes: Vec<i32>,
    pub dislikes: Vec<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-book rating summary
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct RatingSummary {
    pub book_id: i32,
    pub review_count: i64,
    /// Average rating, absent when the book has no reviews
    pub average_rating: Option<f64>,
}

/// Create review request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    pub book_id: i32,
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,
    #[validate(length(max = 1000))]
    pub comment: Option<String>,
}

/// Update review request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateReview {
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i16>,
    #[validate(length(max = 1000))]
    pub comment: Option<String>,
}

/// Vote on a review
#[derive(Debug, Deserialize, ToSchema)]
pub struct VoteReview {
    pub vote: ReviewVote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReviewVote {
    Like,
    Dislike,
}

/// Query parameters for listing reviews
#[derive(Debug, Deserialize, IntoParams)]
pub struct ReviewQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub user_id: Option<i32>,
}
