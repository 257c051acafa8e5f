//! Shelves repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::shelf::{CreateShelf, Shelf, UpdateShelf},
};

#[derive(Clone)]
pub struct ShelvesRepository {
    pool: Pool<Postgres>,
}

impl ShelvesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get shelf by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Shelf> {
        sqlx::query_as::<_, Shelf>("SELECT * FROM shelves WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Shelf with id {} not found", id)))
    }

    /// Check if a shelf code is taken, optionally excluding one shelf
    pub async fn code_exists(&self, code: &str, exclude: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM shelves WHERE code = $1 AND ($2::int IS NULL OR id != $2))",
        )
        .bind(code)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// List all shelves ordered by code
    pub async fn list(&self) -> AppResult<Vec<Shelf>> {
        let shelves = sqlx::query_as::<_, Shelf>("SELECT * FROM shelves ORDER BY code")
            .fetch_all(&self.pool)
            .await?;
        Ok(shelves)
    }

    /// Create a new shelf
    pub async fn create(&self, shelf: &CreateShelf) -> AppResult<Shelf> {
        let created = sqlx::query_as::<_, Shelf>(
            r#"
            INSERT INTO shelves (code, location, capacity, description)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&shelf.code)
        .bind(&shelf.location)
        .bind(shelf.capacity)
        .bind(&shelf.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Update a shelf
    pub async fn update(&self, id: i32, shelf: &UpdateShelf) -> AppResult<Shelf> {
        sqlx::query_as::<_, Shelf>(
            r#"
            UPDATE shelves
            SET code = COALESCE($2, code),
                location = COALESCE($3, location),
                capacity = COALESCE($4, capacity),
                description = COALESCE($5, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&shelf.code)
        .bind(&shelf.location)
        .bind(shelf.capacity)
        .bind(&shelf.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Shelf with id {} not found", id)))
    }

    /// Delete a shelf
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM shelves WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Shelf with id {} not found", id)));
        }
        Ok(())
    }
}
