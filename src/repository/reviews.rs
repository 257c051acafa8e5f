//! Reviews repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        review::{CreateReview, RatingSummary, Review, ReviewQuery, UpdateReview},
        DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
    },
};

#[derive(Clone)]
pub struct ReviewsRepository {
    pool: Pool<Postgres>,
}

impl ReviewsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get review by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Review> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review with id {} not found", id)))
    }

    /// Check whether a user already reviewed a book
    pub async fn exists_for_user_and_book(&self, user_id: i32, book_id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE user_id = $1 AND book_id = $2)",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create a new review
    pub async fn create(&self, user_id: i32, review: &CreateReview) -> AppResult<Review> {
        let created = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (book_id, user_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(review.book_id)
        .bind(user_id)
        .bind(review.rating)
        .bind(&review.comment)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Update a review
    pub async fn update(&self, id: i32, review: &UpdateReview) -> AppResult<Review> {
        sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET rating = COALESCE($2, rating),
                comment = COALESCE($3, comment),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(review.rating)
        .bind(&review.comment)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Review with id {} not found", id)))
    }

    /// Record a vote: the voter lands in one list and leaves the other
    pub async fn vote(&self, id: i32, voter_id: i32, like: bool) -> AppResult<Review> {
        let (add_to, remove_from) = if like {
            ("likes", "dislikes")
        } else {
            ("dislikes", "likes")
        };

        let sql = format!(
            r#"
            UPDATE reviews
            SET {add} = CASE WHEN $2 = ANY({add}) THEN {add} ELSE array_append({add}, $2) END,
                {rem} = array_remove({rem}, $2),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
            add = add_to,
            rem = remove_from,
        );

        sqlx::query_as::<_, Review>(&sql)
            .bind(id)
            .bind(voter_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review with id {} not found", id)))
    }

    /// Delete a review
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Review with id {} not found", id)));
        }
        Ok(())
    }

    /// List reviews for a book with pagination, newest first
    pub async fn list_by_book(
        &self,
        book_id: i32,
        query: &ReviewQuery,
    ) -> AppResult<(Vec<Review>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * limit;

        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT * FROM reviews
            WHERE book_id = $1 AND ($2::int IS NULL OR user_id = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(book_id)
        .bind(query.user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reviews WHERE book_id = $1 AND ($2::int IS NULL OR user_id = $2)",
        )
        .bind(book_id)
        .bind(query.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((reviews, total))
    }

    /// Per-book rating summary
    pub async fn rating_summary(&self, book_id: i32) -> AppResult<RatingSummary> {
        let summary = sqlx::query_as::<_, RatingSummary>(
            r#"
            SELECT $1::int as book_id,
                   COUNT(*) as review_count,
                   AVG(rating)::float8 as average_rating
            FROM reviews
            WHERE book_id = $1
            "#,
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(summary)
    }
}
