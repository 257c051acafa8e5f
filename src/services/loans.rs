//! Loan lifecycle service
//!
//! Owns the loan state machine: `active -> renewed` (renew), `active|renewed
//! -> overdue` (time-triggered), `active|overdue|renewed -> returned`
//! (return, terminal). Policy knobs (fine rate, loan limits, default period)
//! come from configuration rather than literals so tests can vary them.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::{
    config::LoanPolicyConfig,
    error::{AppError, AppResult},
    models::{
        enums::LoanStatus,
        loan::{CreateLoan, Loan, LoanDetails, LoanQuery, LoanStats, RenewLoan, ReturnLoan},
        user::UserClaims,
    },
    repository::Repository,
};

/// Whole days of delay between the due date and the evaluation instant,
/// rounded up. Zero when the loan is not yet past due.
pub fn overdue_days(due_date: DateTime<Utc>, at: DateTime<Utc>) -> i64 {
    let late = at - due_date;
    let secs = late.num_seconds();
    if secs <= 0 {
        return 0;
    }
    let day = Duration::days(1).num_seconds();
    (secs + day - 1) / day
}

/// Fine owed for a number of overdue days at the configured daily rate
pub fn fine_for(days: i64, fine_per_day: Decimal) -> Decimal {
    Decimal::from(days) * fine_per_day
}

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
    policy: LoanPolicyConfig,
}

impl LoansService {
    pub fn new(repository: Repository, policy: LoanPolicyConfig) -> Self {
        Self { repository, policy }
    }

    /// Create a new loan.
    ///
    /// Preconditions are checked eagerly and in a fixed order; the first
    /// violated one determines the error. The loan insert and the copy
    /// decrement run in a single transaction in the repository.
    pub async fn create(&self, request: CreateLoan) -> AppResult<LoanDetails> {
        let user = self.repository.users.get_by_id(request.user_id).await?;
        if !user.active {
            return Err(AppError::BusinessRule(
                "Borrower account is inactive".to_string(),
            ));
        }

        let book = self.repository.books.get_by_id(request.book_id).await?;

        if book.available_copies <= 0 {
            return Err(AppError::BusinessRule(
                "No copies of this book are available".to_string(),
            ));
        }

        let overdue = self
            .repository
            .loans
            .count_by_user_and_status(user.id, LoanStatus::Overdue)
            .await?;
        if overdue > 0 {
            return Err(AppError::BusinessRule(
                "User has overdue loans and must return them before borrowing again".to_string(),
            ));
        }

        let active = self
            .repository
            .loans
            .count_by_user_and_status(user.id, LoanStatus::Active)
            .await?;
        if active >= self.policy.max_active_loans {
            return Err(AppError::BusinessRule(format!(
                "User has reached the maximum of {} active loans",
                self.policy.max_active_loans
            )));
        }

        if self
            .repository
            .loans
            .find_open_by_user_and_book(user.id, book.id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "User already has an open loan for this book".to_string(),
            ));
        }

        let now = Utc::now();
        let due_date = request
            .due_date
            .unwrap_or_else(|| now + Duration::days(self.policy.default_loan_days));

        let loan = self
            .repository
            .loans
            .create_with_decrement(user.id, book.id, now, due_date, request.notes.as_deref())
            .await?;

        tracing::info!(loan_id = loan.id, user_id = user.id, book_id = book.id, "Loan created");

        self.repository.loans.get_details(loan.id).await
    }

    /// Evaluate-and-persist overdue transition, shared by the read path, the
    /// sweep and the renewal guard. Reads of a loan are deliberately not
    /// pure: a lapsed loan is flipped to `overdue` with recomputed figures
    /// before being returned.
    async fn evaluate_overdue(&self, loan: Loan, now: DateTime<Utc>) -> AppResult<Loan> {
        if !loan.status.can_lapse() || now <= loan.due_date {
            return Ok(loan);
        }

        let days = overdue_days(loan.due_date, now);
        if days == 0 {
            return Ok(loan);
        }

        let fine = fine_for(days, self.policy.fine_per_day);
        match self.repository.loans.mark_overdue(loan.id, days as i32, fine).await? {
            Some(updated) => Ok(updated),
            // Lost a race against a concurrent return; the stored row wins.
            None => self.repository.loans.get_by_id(loan.id).await,
        }
    }

    /// Get a loan by ID, re-evaluating its overdue status first.
    ///
    /// Authorization runs before the evaluation, so a rejected caller never
    /// triggers the persisted overdue transition.
    pub async fn get(&self, id: i32, claims: &UserClaims) -> AppResult<LoanDetails> {
        let loan = self.repository.loans.get_by_id(id).await?;
        claims.require_self_or_admin(loan.user_id)?;

        self.evaluate_overdue(loan, Utc::now()).await?;
        self.repository.loans.get_details(id).await
    }

    /// Renew a loan: push the due date forward.
    ///
    /// Permitted while the loan is active or renewed, not past due, and
    /// under the renewal cap.
    pub async fn renew(&self, id: i32, request: RenewLoan) -> AppResult<LoanDetails> {
        let loan = self.repository.loans.get_by_id(id).await?;
        let now = Utc::now();

        if !loan.status.can_lapse() {
            return Err(AppError::BusinessRule(
                "Only active or renewed loans can be renewed".to_string(),
            ));
        }

        if now > loan.due_date {
            // Persist the transition so the caller sees the loan as overdue.
            self.evaluate_overdue(loan, now).await?;
            return Err(AppError::BusinessRule(
                "Overdue loans cannot be renewed".to_string(),
            ));
        }

        if loan.renewal_count >= self.policy.max_renewals {
            return Err(AppError::BusinessRule(format!(
                "Loan has reached the maximum of {} renewals",
                self.policy.max_renewals
            )));
        }

        self.repository
            .loans
            .renew(id, request.due_date, request.notes.as_deref())
            .await?;

        tracing::info!(loan_id = id, "Loan renewed");

        self.repository.loans.get_details(id).await
    }

    /// Return a loan: finalize the fine, free the book copy. Terminal.
    pub async fn return_loan(&self, id: i32, request: ReturnLoan) -> AppResult<LoanDetails> {
        let loan = self.repository.loans.get_by_id(id).await?;

        if loan.status == LoanStatus::Returned {
            return Err(AppError::BusinessRule(
                "This loan has already been returned".to_string(),
            ));
        }

        let returned_date = request.returned_date.unwrap_or_else(Utc::now);
        let days = overdue_days(loan.due_date, returned_date);
        let fine = fine_for(days, self.policy.fine_per_day);

        self.repository
            .loans
            .return_with_increment(id, returned_date, days as i32, fine, request.notes.as_deref())
            .await?;

        tracing::info!(loan_id = id, overdue_days = days, "Loan returned");

        self.repository.loans.get_details(id).await
    }

    /// Sweep all lapsable loans past their due date into `overdue`,
    /// persisting recomputed fines. Returns the number of loans changed.
    /// Idempotent when no time has passed between runs.
    pub async fn sweep_overdue(&self) -> AppResult<u64> {
        let now = Utc::now();
        let mut updated = 0u64;

        for loan in self.repository.loans.list_lapsable().await? {
            let days = overdue_days(loan.due_date, now);
            if days > 0 {
                let fine = fine_for(days, self.policy.fine_per_day);
                if self
                    .repository
                    .loans
                    .mark_overdue(loan.id, days as i32, fine)
                    .await?
                    .is_some()
                {
                    updated += 1;
                }
            }
        }

        if updated > 0 {
            tracing::info!(count = updated, "Overdue sweep flipped loans");
        }

        Ok(updated)
    }

    /// List loans with filters and pagination
    pub async fn list(&self, query: &LoanQuery) -> AppResult<(Vec<LoanDetails>, i64)> {
        if let Some(user_id) = query.user_id {
            self.repository.users.get_by_id(user_id).await?;
        }
        if let Some(book_id) = query.book_id {
            self.repository.books.get_by_id(book_id).await?;
        }
        self.repository.loans.search(query).await
    }

    /// Delete a loan record. Open loans still hold a book copy and cannot
    /// be deleted; they must be returned first.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let loan = self.repository.loans.get_by_id(id).await?;

        if loan.status.is_open() {
            return Err(AppError::BusinessRule(
                "Open loans cannot be deleted; return the book first".to_string(),
            ));
        }

        self.repository.loans.delete(id).await
    }

    /// Loan statistics: counts by status plus total accumulated fines
    pub async fn stats(&self) -> AppResult<LoanStats> {
        self.repository.loans.stats().await
    }

    /// Count loans currently in a given status
    pub async fn count_by_status(&self, status: LoanStatus) -> AppResult<i64> {
        self.repository.loans.count_by_status(status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn not_yet_due_accrues_nothing() {
        let due = at(2024, 1, 10);
        assert_eq!(overdue_days(due, at(2024, 1, 5)), 0);
        assert_eq!(overdue_days(due, due), 0);
    }

    #[test]
    fn whole_days_late() {
        let due = at(2024, 1, 10);
        assert_eq!(overdue_days(due, at(2024, 1, 15)), 5);
        assert_eq!(overdue_days(due, at(2024, 1, 20)), 10);
    }

    #[test]
    fn partial_days_round_up() {
        let due = at(2024, 1, 10);
        let late = due + Duration::hours(1);
        assert_eq!(overdue_days(due, late), 1);
        let late = due + Duration::days(2) + Duration::minutes(1);
        assert_eq!(overdue_days(due, late), 3);
    }

    #[test]
    fn fine_is_days_times_rate() {
        let rate = Decimal::new(200, 2); // 2.00
        assert_eq!(fine_for(0, rate), Decimal::ZERO);
        assert_eq!(fine_for(10, rate), Decimal::new(2000, 2)); // 20.00
    }

    #[test]
    fn returned_loans_never_lapse() {
        assert!(!LoanStatus::Returned.can_lapse());
        assert!(LoanStatus::Active.can_lapse());
        assert!(LoanStatus::Renewed.can_lapse());
        assert!(!LoanStatus::Overdue.can_lapse());
    }

    #[test]
    fn open_statuses_hold_a_copy() {
        assert!(LoanStatus::Active.is_open());
        assert!(LoanStatus::Renewed.is_open());
        assert!(LoanStatus::Overdue.is_open());
        assert!(!LoanStatus::Returned.is_open());
    }
}
