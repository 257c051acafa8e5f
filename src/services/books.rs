//! Book catalog service

use crate::{
    error::{AppError, AppResult},
    models::book::{normalize_isbn, Book, BookDetails, BookQuery, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get book by ID with genre and shelf labels
    pub async fn get(&self, id: i32) -> AppResult<BookDetails> {
        self.repository.books.get_details(id).await
    }

    /// Look up a book by ISBN (normalized before the lookup)
    pub async fn get_by_isbn(&self, isbn: &str) -> AppResult<Book> {
        let normalized = normalize_isbn(isbn);
        self.repository
            .books
            .get_by_isbn(&normalized)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with ISBN {} not found", normalized)))
    }

    /// Create a new book
    pub async fn create(&self, request: CreateBook) -> AppResult<BookDetails> {
        let isbn = normalize_isbn(&request.isbn);

        if self.repository.books.get_by_isbn(&isbn).await?.is_some() {
            return Err(AppError::Conflict(
                "A book with this ISBN already exists".to_string(),
            ));
        }

        // Referenced genre and shelf must exist
        self.repository
            .genres
            .get_by_id(request.genre_id)
            .await
            .map_err(|_| AppError::Validation("The specified genre does not exist".to_string()))?;
        self.repository
            .shelves
            .get_by_id(request.shelf_id)
            .await
            .map_err(|_| AppError::Validation("The specified shelf does not exist".to_string()))?;

        let book = self.repository.books.create(&request, &isbn).await?;
        self.repository.books.get_details(book.id).await
    }

    /// Update an existing book
    pub async fn update(&self, id: i32, request: UpdateBook) -> AppResult<BookDetails> {
        self.repository.books.get_by_id(id).await?;

        let isbn = match request.isbn.as_deref() {
            Some(raw) => {
                let normalized = normalize_isbn(raw);
                if let Some(existing) = self.repository.books.get_by_isbn(&normalized).await? {
                    if existing.id != id {
                        return Err(AppError::Conflict(
                            "A book with this ISBN already exists".to_string(),
                        ));
                    }
                }
                Some(normalized)
            }
            None => None,
        };

        if let Some(genre_id) = request.genre_id {
            self.repository.genres.get_by_id(genre_id).await.map_err(|_| {
                AppError::Validation("The specified genre does not exist".to_string())
            })?;
        }
        if let Some(shelf_id) = request.shelf_id {
            self.repository.shelves.get_by_id(shelf_id).await.map_err(|_| {
                AppError::Validation("The specified shelf does not exist".to_string())
            })?;
        }

        self.repository.books.update(id, &request, isbn.as_deref()).await?;
        self.repository.books.get_details(id).await
    }

    /// Delete a book. Blocked while copies are out on loan.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.books.get_by_id(id).await?;

        let open = self.repository.loans.count_open_by_book(id).await?;
        if open > 0 {
            return Err(AppError::Conflict(
                "Book has copies out on loan and cannot be deleted".to_string(),
            ));
        }

        self.repository.books.delete(id).await
    }

    /// Search books with filters and pagination
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<BookDetails>, i64)> {
        self.repository.books.search(query).await
    }
}
