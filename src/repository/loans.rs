//! Loans repository for database operations
//!
//! The create and return paths mutate two entities at once (the loan row and
//! the book's available-copy counter); both writes run inside one
//! transaction so the pair can never drift apart.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::BookSummary,
        enums::LoanStatus,
        loan::{Loan, LoanDetails, LoanQuery, LoanStats},
        user::UserSummary,
        DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
    },
};

/// Unique partial index guarding one open loan per (user, book) pair
const UNIQ_OPEN_LOAN: &str = "uniq_open_loan_per_user_book";

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// Get loan joined with borrower and book summaries
    pub async fn get_details(&self, id: i32) -> AppResult<LoanDetails> {
        let row = sqlx::query(
            r#"
            SELECT l.*,
                   u.username, u.email,
                   b.title, b.author, b.isbn
            FROM loans l
            JOIN users u ON l.user_id = u.id
            JOIN books b ON l.book_id = b.id
            WHERE l.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))?;

        Ok(details_from_row(&row))
    }

    /// Count a user's loans in a given status
    pub async fn count_by_user_and_status(
        &self,
        user_id: i32,
        status: LoanStatus,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE user_id = $1 AND status = $2",
        )
        .bind(user_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Count a user's open (not returned) loans
    pub async fn count_open_by_user(&self, user_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE user_id = $1 AND status != 'returned'",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Count all loans ever made by a user, returned ones included
    pub async fn count_by_user(&self, user_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM loans WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count open (not returned) loans against a book
    pub async fn count_open_by_book(&self, book_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE book_id = $1 AND status != 'returned'",
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Find the open loan for an exact (user, book) pair, if any
    pub async fn find_open_by_user_and_book(
        &self,
        user_id: i32,
        book_id: i32,
    ) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE user_id = $1 AND book_id = $2 AND status != 'returned'",
        )
        .bind(user_id)
        .bind(book_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(loan)
    }

    /// Insert a loan and decrement the book's available copies atomically.
    ///
    /// The decrement is guarded by `available_copies > 0`, so a concurrent
    /// borrower losing the race on the last copy gets a business-rule error
    /// instead of driving the counter negative. A duplicate open loan for the
    /// same pair trips the partial unique index and maps to `Conflict`.
    pub async fn create_with_decrement(
        &self,
        user_id: i32,
        book_id: i32,
        loan_date: DateTime<Utc>,
        due_date: DateTime<Utc>,
        notes: Option<&str>,
    ) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let decremented = sqlx::query(
            "UPDATE books SET available_copies = available_copies - 1, updated_at = NOW() \
             WHERE id = $1 AND available_copies > 0",
        )
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(AppError::BusinessRule(
                "No copies of this book are available".to_string(),
            ));
        }

        let inserted = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (user_id, book_id, loan_date, due_date, status, notes)
            VALUES ($1, $2, $3, $4, 'active', $5)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(loan_date)
        .bind(due_date)
        .bind(notes)
        .fetch_one(&mut *tx)
        .await;

        let loan = match inserted {
            Ok(loan) => loan,
            Err(e) => {
                // The rollback undoes the copy decrement.
                tx.rollback().await?;
                if is_unique_violation(&e, UNIQ_OPEN_LOAN) {
                    return Err(AppError::Conflict(
                        "User already has an open loan for this book".to_string(),
                    ));
                }
                return Err(e.into());
            }
        };

        tx.commit().await?;
        Ok(loan)
    }

    /// Finalize a return and increment the book's available copies atomically.
    ///
    /// The status guard makes the operation race-safe: a second concurrent
    /// return matches zero rows and the increment is skipped.
    pub async fn return_with_increment(
        &self,
        id: i32,
        returned_date: DateTime<Utc>,
        overdue_days: i32,
        fine: Decimal,
        notes: Option<&str>,
    ) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET returned_date = $2,
                status = 'returned',
                overdue_days = $3,
                fine = $4,
                notes = COALESCE($5, notes),
                updated_at = NOW()
            WHERE id = $1 AND status != 'returned'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(returned_date)
        .bind(overdue_days)
        .bind(fine)
        .bind(notes)
        .fetch_optional(&mut *tx)
        .await?;

        let loan = match updated {
            Some(loan) => loan,
            None => {
                tx.rollback().await?;
                return Err(AppError::BusinessRule(
                    "This loan has already been returned".to_string(),
                ));
            }
        };

        sqlx::query(
            "UPDATE books SET available_copies = available_copies + 1, updated_at = NOW() WHERE id = $1",
        )
        .bind(loan.book_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(loan)
    }

    /// Renew a loan: replace the due date, bump the renewal counter
    pub async fn renew(
        &self,
        id: i32,
        due_date: DateTime<Utc>,
        notes: Option<&str>,
    ) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET due_date = $2,
                status = 'renewed',
                renewal_count = renewal_count + 1,
                notes = COALESCE($3, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(due_date)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// Persist the overdue transition for a lapsed loan.
    ///
    /// Guarded on the lapsable statuses so a concurrent return cannot be
    /// overwritten; returns None when the guard matched no row.
    pub async fn mark_overdue(
        &self,
        id: i32,
        overdue_days: i32,
        fine: Decimal,
    ) -> AppResult<Option<Loan>> {
        let loan = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET status = 'overdue',
                overdue_days = $2,
                fine = $3,
                updated_at = NOW()
            WHERE id = $1 AND status IN ('active', 'renewed')
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(overdue_days)
        .bind(fine)
        .fetch_optional(&self.pool)
        .await?;
        Ok(loan)
    }

    /// All loans still subject to the overdue transition
    pub async fn list_lapsable(&self) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans WHERE status IN ('active', 'renewed') ORDER BY due_date",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }

    /// Search loans with filters and pagination, newest first
    pub async fn search(&self, query: &LoanQuery) -> AppResult<(Vec<LoanDetails>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = (page - 1) * limit;

        let rows = sqlx::query(
            r#"
            SELECT l.*,
                   u.username, u.email,
                   b.title, b.author, b.isbn
            FROM loans l
            JOIN users u ON l.user_id = u.id
            JOIN books b ON l.book_id = b.id
            WHERE ($1::int IS NULL OR l.user_id = $1)
              AND ($2::int IS NULL OR l.book_id = $2)
              AND ($3::loan_status IS NULL OR l.status = $3)
            ORDER BY l.loan_date DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(query.user_id)
        .bind(query.book_id)
        .bind(query.status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM loans l
            WHERE ($1::int IS NULL OR l.user_id = $1)
              AND ($2::int IS NULL OR l.book_id = $2)
              AND ($3::loan_status IS NULL OR l.status = $3)
            "#,
        )
        .bind(query.user_id)
        .bind(query.book_id)
        .bind(query.status)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows.iter().map(details_from_row).collect(), total))
    }

    /// Delete a loan row. The service refuses to delete open loans.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM loans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Loan with id {} not found", id)));
        }
        Ok(())
    }

    /// Loan statistics: counts by status plus accumulated fines
    pub async fn stats(&self) -> AppResult<LoanStats> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) as total,
                   COUNT(*) FILTER (WHERE status = 'active') as active,
                   COUNT(*) FILTER (WHERE status = 'returned') as returned,
                   COUNT(*) FILTER (WHERE status = 'overdue') as overdue,
                   COUNT(*) FILTER (WHERE status = 'renewed') as renewed,
                   COALESCE(SUM(fine), 0) as total_fines
            FROM loans
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(LoanStats {
            total: row.get("total"),
            active: row.get("active"),
            returned: row.get("returned"),
            overdue: row.get("overdue"),
            renewed: row.get("renewed"),
            total_fines: row.get("total_fines"),
        })
    }

    /// Count loans currently in a given status
    pub async fn count_by_status(&self, status: LoanStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM loans WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

fn details_from_row(row: &sqlx::postgres::PgRow) -> LoanDetails {
    let user_id: i32 = row.get("user_id");
    let book_id: i32 = row.get("book_id");
    LoanDetails {
        loan: Loan {
            id: row.get("id"),
            user_id,
            book_id,
            loan_date: row.get("loan_date"),
            due_date: row.get("due_date"),
            returned_date: row.get("returned_date"),
            status: row.get("status"),
            notes: row.get("notes"),
            overdue_days: row.get("overdue_days"),
            fine: row.get("fine"),
            renewal_count: row.get("renewal_count"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        },
        user: UserSummary {
            id: user_id,
            username: row.get("username"),
            email: row.get("email"),
        },
        book: BookSummary {
            id: book_id,
            title: row.get("title"),
            author: row.get("author"),
            isbn: row.get("isbn"),
        },
    }
}

fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db) => db.constraint() == Some(constraint),
        _ => false,
    }
}
