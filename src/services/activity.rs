//! User activity logging service

use crate::{
    error::AppResult,
    models::activity::{Activity, ActivityQuery, ActivityStats, RecordActivity},
    repository::Repository,
};

#[derive(Clone)]
pub struct ActivityService {
    repository: Repository,
}

impl ActivityService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Append an activity event for an existing user
    pub async fn record(&self, event: RecordActivity) -> AppResult<Activity> {
        self.repository.users.get_by_id(event.user_id).await?;
        self.repository.activity.record(&event).await
    }

    /// Best-effort variant used from other request paths: a failed write is
    /// logged and swallowed so it never fails the primary operation.
    pub async fn record_background(&self, event: RecordActivity) {
        if let Err(e) = self.repository.activity.record(&event).await {
            tracing::warn!("Failed to record activity event: {}", e);
        }
    }

    /// List activity events with filters and pagination
    pub async fn search(&self, query: &ActivityQuery) -> AppResult<(Vec<Activity>, i64)> {
        if let Some(user_id) = query.user_id {
            self.repository.users.get_by_id(user_id).await?;
        }
        self.repository.activity.search(query).await
    }

    /// Event counts by kind, optionally scoped to one user
    pub async fn stats(&self, user_id: Option<i32>) -> AppResult<ActivityStats> {
        if let Some(user_id) = user_id {
            self.repository.users.get_by_id(user_id).await?;
        }
        self.repository.activity.stats(user_id).await
    }
}
