//! Shelf model and request DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Shelf model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Shelf {
    pub id: i32,
    pub code: String,
    pub location: String,
    pub capacity: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Shelf with derived occupancy figures
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShelfDetails {
    #[serde(flatten)]
    pub shelf: Shelf,
    /// Number of books currently assigned to this shelf
    pub stored_books: i64,
    pub free_slots: i64,
    pub percent_occupied: f64,
    pub is_full: bool,
}

impl ShelfDetails {
    pub fn new(shelf: Shelf, stored_books: i64) -> Self {
        let capacity = shelf.capacity as i64;
        let percent = if capacity > 0 {
            (stored_books as f64 / capacity as f64 * 10_000.0).round() / 100.0
        } else {
            0.0
        };
        Self {
            stored_books,
            free_slots: (capacity - stored_books).max(0),
            percent_occupied: percent,
            is_full: stored_books >= capacity,
            shelf,
        }
    }
}

/// Create shelf request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateShelf {
    #[validate(length(min = 1, max = 20))]
    pub code: String,
    #[validate(length(min = 1, max = 100))]
    pub location: String,
    #[validate(range(min = 1))]
    pub capacity: i32,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// Update shelf request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateShelf {
    #[validate(length(min = 1, max = 20))]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub location: Option<String>,
    #[validate(range(min = 1))]
    pub capacity: Option<i32>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shelf(capacity: i32) -> Shelf {
        Shelf {
            id: 1,
            code: "A-1".to_string(),
            location: "Ground floor".to_string(),
            capacity,
            description: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn occupancy_figures() {
        let details = ShelfDetails::new(shelf(40), 10);
        assert_eq!(details.free_slots, 30);
        assert_eq!(details.percent_occupied, 25.0);
        assert!(!details.is_full);
    }

    #[test]
    fn full_shelf() {
        let details = ShelfDetails::new(shelf(10), 10);
        assert_eq!(details.free_slots, 0);
        assert!(details.is_full);
    }
}
