//! User activity log model and request DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::enums::ActivityKind;

/// Activity event from database. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Activity {
    pub id: Uuid,
    pub user_id: i32,
    pub kind: ActivityKind,
    pub description: Option<String>,
    /// Search query, for `search` events
    pub query: Option<String>,
    pub book_id: Option<i32>,
    pub loan_id: Option<i32>,
    pub review_id: Option<i32>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    /// Free-form event payload
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Record activity request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordActivity {
    pub user_id: i32,
    pub kind: ActivityKind,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(length(max = 255))]
    pub query: Option<String>,
    pub book_id: Option<i32>,
    pub loan_id: Option<i32>,
    pub review_id: Option<i32>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Query parameters for listing activity events
#[derive(Debug, Deserialize, IntoParams)]
pub struct ActivityQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub user_id: Option<i32>,
    pub kind: Option<ActivityKind>,
    /// Inclusive lower bound on event time
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on event time
    pub to: Option<DateTime<Utc>>,
}

/// Activity statistics: event counts by kind
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityStats {
    pub total: i64,
    pub by_kind: Vec<KindCount>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct KindCount {
    pub kind: ActivityKind,
    pub count: i64,
}
