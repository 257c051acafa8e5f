//! Shelf management service

use crate::{
    error::{AppError, AppResult},
    models::shelf::{CreateShelf, Shelf, ShelfDetails, UpdateShelf},
    repository::Repository,
};

#[derive(Clone)]
pub struct ShelvesService {
    repository: Repository,
}

impl ShelvesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get shelf by ID with occupancy figures
    pub async fn get(&self, id: i32) -> AppResult<ShelfDetails> {
        let shelf = self.repository.shelves.get_by_id(id).await?;
        self.with_occupancy(shelf).await
    }

    /// List all shelves with occupancy figures
    pub async fn list(&self) -> AppResult<Vec<ShelfDetails>> {
        let shelves = self.repository.shelves.list().await?;
        let mut result = Vec::with_capacity(shelves.len());
        for shelf in shelves {
            result.push(self.with_occupancy(shelf).await?);
        }
        Ok(result)
    }

    /// Create a new shelf
    pub async fn create(&self, request: CreateShelf) -> AppResult<ShelfDetails> {
        if self.repository.shelves.code_exists(&request.code, None).await? {
            return Err(AppError::Conflict(
                "A shelf with this code already exists".to_string(),
            ));
        }

        let shelf = self.repository.shelves.create(&request).await?;
        Ok(ShelfDetails::new(shelf, 0))
    }

    /// Update an existing shelf
    pub async fn update(&self, id: i32, request: UpdateShelf) -> AppResult<ShelfDetails> {
        self.repository.shelves.get_by_id(id).await?;

        if let Some(ref code) = request.code {
            if self.repository.shelves.code_exists(code, Some(id)).await? {
                return Err(AppError::Conflict(
                    "A shelf with this code already exists".to_string(),
                ));
            }
        }

        let shelf = self.repository.shelves.update(id, &request).await?;
        self.with_occupancy(shelf).await
    }

    /// Delete a shelf. Blocked while books are assigned to it.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.shelves.get_by_id(id).await?;

        let stored = self.repository.books.count_by_shelf(id).await?;
        if stored > 0 {
            return Err(AppError::Conflict(
                "Shelf still holds books and cannot be deleted".to_string(),
            ));
        }

        self.repository.shelves.delete(id).await
    }

    async fn with_occupancy(&self, shelf: Shelf) -> AppResult<ShelfDetails> {
        let stored = self.repository.books.count_by_shelf(shelf.id).await?;
        Ok(ShelfDetails::new(shelf, stored))
    }
}
