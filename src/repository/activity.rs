//! User activity repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{
        activity::{Activity, ActivityQuery, ActivityStats, KindCount, RecordActivity},
        DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
    },
};

#[derive(Clone)]
pub struct ActivityRepository {
    pool: Pool<Postgres>,
}

impl ActivityRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Append an activity event
    pub async fn record(&self, event: &RecordActivity) -> AppResult<Activity> {
        let activity = sqlx::query_as::<_, Activity>(
            r#"
            INSERT INTO activity_log
                (user_id, kind, description, query, book_id, loan_id, review_id,
                 ip_address, user_agent, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(event.user_id)
        .bind(event.kind)
        .bind(&event.description)
        .bind(&event.query)
        .bind(event.book_id)
        .bind(event.loan_id)
        .bind(event.review_id)
        .bind(&event.ip_address)
        .bind(&event.user_agent)
        .bind(&event.metadata)
        .fetch_one(&self.pool)
        .await?;
        Ok(activity)
    }

    /// List activity events with filters and pagination, newest first
    pub async fn search(&self, query: &ActivityQuery) -> AppResult<(Vec<Activity>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * limit;

        let events = sqlx::query_as::<_, Activity>(
            r#"
            SELECT * FROM activity_log
            WHERE ($1::int IS NULL OR user_id = $1)
              AND ($2::activity_kind IS NULL OR kind = $2)
              AND ($3::timestamptz IS NULL OR created_at >= $3)
              AND ($4::timestamptz IS NULL OR created_at < $4)
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(query.user_id)
        .bind(query.kind)
        .bind(query.from)
        .bind(query.to)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM activity_log
            WHERE ($1::int IS NULL OR user_id = $1)
              AND ($2::activity_kind IS NULL OR kind = $2)
              AND ($3::timestamptz IS NULL OR created_at >= $3)
              AND ($4::timestamptz IS NULL OR created_at < $4)
            "#,
        )
        .bind(query.user_id)
        .bind(query.kind)
        .bind(query.from)
        .bind(query.to)
        .fetch_one(&self.pool)
        .await?;

        Ok((events, total))
    }

    /// Event counts by kind, optionally scoped to one user
    pub async fn stats(&self, user_id: Option<i32>) -> AppResult<ActivityStats> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM activity_log WHERE ($1::int IS NULL OR user_id = $1)",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let by_kind = sqlx::query_as::<_, KindCount>(
            r#"
            SELECT kind, COUNT(*) as count
            FROM activity_log
            WHERE ($1::int IS NULL OR user_id = $1)
            GROUP BY kind
            ORDER BY count DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ActivityStats { total, by_kind })
    }
}
