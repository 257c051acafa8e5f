//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookDetails, BookQuery, CreateBook, UpdateBook},
        DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Get book with genre and shelf labels resolved
    pub async fn get_details(&self, id: i32) -> AppResult<BookDetails> {
        sqlx::query_as::<_, BookDetails>(
            r#"
            SELECT b.id, b.title, b.author, b.isbn,
                   b.genre_id, g.name as genre_name,
                   b.shelf_id, s.code as shelf_code,
                   b.available_copies, b.publication_date,
                   b.created_at, b.updated_at
            FROM books b
            JOIN genres g ON b.genre_id = g.id
            JOIN shelves s ON b.shelf_id = s.id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Look up a book by its normalized ISBN
    pub async fn get_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE isbn = $1")
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    /// Create a new book. ISBN must already be normalized.
    pub async fn create(&self, book: &CreateBook, isbn: &str) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, isbn, genre_id, shelf_id, available_copies, publication_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(isbn)
        .bind(book.genre_id)
        .bind(book.shelf_id)
        .bind(book.available_copies.unwrap_or(1))
        .bind(book.publication_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Update a book. ISBN, when present, must already be normalized.
    pub async fn update(&self, id: i32, book: &UpdateBook, isbn: Option<&str>) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = COALESCE($2, title),
                author = COALESCE($3, author),
                isbn = COALESCE($4, isbn),
                genre_id = COALESCE($5, genre_id),
                shelf_id = COALESCE($6, shelf_id),
                publication_date = COALESCE($7, publication_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(isbn)
        .bind(book.genre_id)
        .bind(book.shelf_id)
        .bind(book.publication_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Delete a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        Ok(())
    }

    /// Search books with filters and pagination
    pub async fn search(&self, query: &BookQuery) -> AppResult<(Vec<BookDetails>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * limit;

        let title = query.title.as_ref().map(|s| format!("%{}%", s));
        let author = query.author.as_ref().map(|s| format!("%{}%", s));

        let books = sqlx::query_as::<_, BookDetails>(
            r#"
            SELECT b.id, b.title, b.author, b.isbn,
                   b.genre_id, g.name as genre_name,
                   b.shelf_id, s.code as shelf_code,
                   b.available_copies, b.publication_date,
                   b.created_at, b.updated_at
            FROM books b
            JOIN genres g ON b.genre_id = g.id
            JOIN shelves s ON b.shelf_id = s.id
            WHERE ($1::text IS NULL OR b.title ILIKE $1)
              AND ($2::text IS NULL OR b.author ILIKE $2)
              AND ($3::int IS NULL OR b.genre_id = $3)
              AND ($4::int IS NULL OR b.shelf_id = $4)
            ORDER BY b.title
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(&title)
        .bind(&author)
        .bind(query.genre_id)
        .bind(query.shelf_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM books b
            WHERE ($1::text IS NULL OR b.title ILIKE $1)
              AND ($2::text IS NULL OR b.author ILIKE $2)
              AND ($3::int IS NULL OR b.genre_id = $3)
              AND ($4::int IS NULL OR b.shelf_id = $4)
            "#,
        )
        .bind(&title)
        .bind(&author)
        .bind(query.genre_id)
        .bind(query.shelf_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((books, total))
    }

    /// Count books assigned to a shelf
    pub async fn count_by_shelf(&self, shelf_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE shelf_id = $1")
            .bind(shelf_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count books assigned to a genre
    pub async fn count_by_genre(&self, genre_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE genre_id = $1")
            .bind(genre_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Total number of books
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
