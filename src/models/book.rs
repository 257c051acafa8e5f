//! Book model and request DTOs

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

static ISBN_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-\s]").unwrap());

/// Normalize an ISBN for storage and lookup: strip separators, lowercase.
pub fn normalize_isbn(isbn: &str) -> String {
    ISBN_SEPARATORS.replace_all(isbn, "").to_lowercase()
}

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub genre_id: i32,
    pub shelf_id: i32,
    /// Lendable copies; mutated only by the loan lifecycle
    pub available_copies: i32,
    pub publication_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact book representation embedded in loan payloads
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookSummary {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
}

/// Book with its genre and shelf labels resolved
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BookDetails {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub genre_id: i32,
    pub genre_name: String,
    pub shelf_id: i32,
    pub shelf_code: String,
    pub available_copies: i32,
    pub publication_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub author: String,
    #[validate(length(min = 10, max = 17))]
    pub isbn: String,
    pub genre_id: i32,
    pub shelf_id: i32,
    #[validate(range(min = 0))]
    pub available_copies: Option<i32>,
    pub publication_date: Option<NaiveDate>,
}

/// Update book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub author: Option<String>,
    #[validate(length(min = 10, max = 17))]
    pub isbn: Option<String>,
    pub genre_id: Option<i32>,
    pub shelf_id: Option<i32>,
    pub publication_date: Option<NaiveDate>,
}

/// Query parameters for listing books
#[derive(Debug, Deserialize, IntoParams)]
pub struct BookQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Case-insensitive substring match on the title
    pub title: Option<String>,
    /// Case-insensitive substring match on the author
    pub author: Option<String>,
    pub genre_id: Option<i32>,
    pub shelf_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::normalize_isbn;

    #[test]
    fn normalize_strips_hyphens_and_lowercases() {
        assert_eq!(normalize_isbn("978-84-376-0494-7"), "9788437604947");
        assert_eq!(normalize_isbn("0-8044-2957-X"), "080442957x");
    }

    #[test]
    fn normalize_strips_spaces() {
        assert_eq!(normalize_isbn("978 84 376 0494 7"), "9788437604947");
    }

    #[test]
    fn normalize_is_idempotent() {
        assert_eq!(normalize_isbn("9788437604947"), "9788437604947");
    }
}
