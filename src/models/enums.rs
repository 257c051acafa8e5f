//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// LoanStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "loan_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Active,
    Returned,
    Overdue,
    Renewed,
}

impl LoanStatus {
    /// An open loan still holds a book copy: everything but `returned`.
    pub fn is_open(self) -> bool {
        !matches!(self, LoanStatus::Returned)
    }

    /// Only active and renewed loans are re-evaluated for the overdue
    /// transition; overdue loans keep accruing at return time instead.
    pub fn can_lapse(self) -> bool {
        matches!(self, LoanStatus::Active | LoanStatus::Renewed)
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LoanStatus::Active => "active",
            LoanStatus::Returned => "returned",
            LoanStatus::Overdue => "overdue",
            LoanStatus::Renewed => "renewed",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(LoanStatus::Active),
            "returned" => Ok(LoanStatus::Returned),
            "overdue" => Ok(LoanStatus::Overdue),
            "renewed" => Ok(LoanStatus::Renewed),
            other => Err(format!("Unknown loan status: {}", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// User account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ActivityKind
// ---------------------------------------------------------------------------

/// Kind of user activity event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "activity_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Search,
    Loan,
    Return,
    Review,
    Login,
    Logout,
    Register,
    View,
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ActivityKind::Search => "search",
            ActivityKind::Loan => "loan",
            ActivityKind::Return => "return",
            ActivityKind::Review => "review",
            ActivityKind::Login => "login",
            ActivityKind::Logout => "logout",
            ActivityKind::Register => "register",
            ActivityKind::View => "view",
        };
        write!(f, "{}", label)
    }
}
