//! Book review service

use crate::{
    error::{AppError, AppResult},
    models::{
        review::{CreateReview, RatingSummary, Review, ReviewQuery, ReviewVote, UpdateReview},
        user::UserClaims,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ReviewsService {
    repository: Repository,
}

impl ReviewsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a review. One review per (user, book) pair.
    pub async fn create(&self, author_id: i32, request: CreateReview) -> AppResult<Review> {
        self.repository.books.get_by_id(request.book_id).await?;

        if self
            .repository
            .reviews
            .exists_for_user_and_book(author_id, request.book_id)
            .await?
        {
            return Err(AppError::Conflict(
                "User has already reviewed this book".to_string(),
            ));
        }

        self.repository.reviews.create(author_id, &request).await
    }

    /// Update a review. Only the author or an admin may edit.
    pub async fn update(
        &self,
        id: i32,
        claims: &UserClaims,
        request: UpdateReview,
    ) -> AppResult<Review> {
        let review = self.repository.reviews.get_by_id(id).await?;
        claims.require_self_or_admin(review.user_id)?;

        self.repository.reviews.update(id, &request).await
    }

    /// Delete a review. Only the author or an admin may delete.
    pub async fn delete(&self, id: i32, claims: &UserClaims) -> AppResult<()> {
        let review = self.repository.reviews.get_by_id(id).await?;
        claims.require_self_or_admin(review.user_id)?;

        self.repository.reviews.delete(id).await
    }

    /// Cast or switch a helpfulness vote
    pub async fn vote(&self, id: i32, voter_id: i32, vote: ReviewVote) -> AppResult<Review> {
        self.repository.reviews.get_by_id(id).await?;
        self.repository
            .reviews
            .vote(id, voter_id, vote == ReviewVote::Like)
            .await
    }

    /// List reviews for a book
    pub async fn list_by_book(
        &self,
        book_id: i32,
        query: &ReviewQuery,
    ) -> AppResult<(Vec<Review>, i64)> {
        self.repository.books.get_by_id(book_id).await?;
        self.repository.reviews.list_by_book(book_id, query).await
    }

    /// Per-book rating summary
    pub async fn rating_summary(&self, book_id: i32) -> AppResult<RatingSummary> {
        self.repository.books.get_by_id(book_id).await?;
        self.repository.reviews.rating_summary(book_id).await
    }
}
