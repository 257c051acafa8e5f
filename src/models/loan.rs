//! Loan model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::book::BookSummary;
use super::enums::LoanStatus;
use super::user::UserSummary;

/// Loan model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub loan_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub returned_date: Option<DateTime<Utc>>,
    pub status: LoanStatus,
    pub notes: Option<String>,
    pub overdue_days: i32,
    pub fine: Decimal,
    pub renewal_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Loan joined with borrower and book summaries for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoanDetails {
    #[serde(flatten)]
    pub loan: Loan,
    pub user: UserSummary,
    pub book: BookSummary,
}

/// Create loan request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLoan {
    pub user_id: i32,
    pub book_id: i32,
    /// Due date; defaults to now plus the configured loan period
    pub due_date: Option<DateTime<Utc>>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Renew loan request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RenewLoan {
    pub due_date: DateTime<Utc>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Return loan request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct ReturnLoan {
    /// Actual return date; defaults to now
    pub returned_date: Option<DateTime<Utc>>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Query parameters for listing loans
#[derive(Debug, Deserialize, IntoParams)]
pub struct LoanQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Filter by borrower
    pub user_id: Option<i32>,
    /// Filter by book
    pub book_id: Option<i32>,
    /// Filter by status
    pub status: Option<LoanStatus>,
}

/// Loan statistics: counts by status plus total outstanding fines
#[derive(Debug, Serialize, ToSchema)]
pub struct LoanStats {
    pub total: i64,
    pub active: i64,
    pub returned: i64,
    pub overdue: i64,
    pub renewed: i64,
    pub total_fines: Decimal,
}
