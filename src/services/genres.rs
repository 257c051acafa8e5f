//! Genre management service

use crate::{
    error::{AppError, AppResult},
    models::genre::{CreateGenre, Genre, UpdateGenre},
    repository::Repository,
};

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get genre by ID
    pub async fn get(&self, id: i32) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await
    }

    /// List all genres
    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.list().await
    }

    /// Create a new genre
    pub async fn create(&self, request: CreateGenre) -> AppResult<Genre> {
        if self.repository.genres.name_exists(&request.name, None).await? {
            return Err(AppError::Conflict(
                "A genre with this name already exists".to_string(),
            ));
        }

        self.repository.genres.create(&request).await
    }

    /// Update an existing genre
    pub async fn update(&self, id: i32, request: UpdateGenre) -> AppResult<Genre> {
        self.repository.genres.get_by_id(id).await?;

        if let Some(ref name) = request.name {
            if self.repository.genres.name_exists(name, Some(id)).await? {
                return Err(AppError::Conflict(
                    "A genre with this name already exists".to_string(),
                ));
            }
        }

        self.repository.genres.update(id, &request).await
    }

    /// Delete a genre. Blocked while books reference it.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.genres.get_by_id(id).await?;

        let books = self.repository.books.count_by_genre(id).await?;
        if books > 0 {
            return Err(AppError::Conflict(
                "Genre is still assigned to books and cannot be deleted".to_string(),
            ));
        }

        self.repository.genres.delete(id).await
    }
}
