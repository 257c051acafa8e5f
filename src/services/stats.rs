//! Aggregate statistics service

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{loan::LoanStats, user::UserStats},
    repository::Repository,
};

/// Combined statistics across users, books and loans
#[derive(Debug, Serialize, ToSchema)]
pub struct GlobalStats {
    pub users: UserStats,
    pub books: BookStats,
    pub loans: LoanStats,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookStats {
    pub total: i64,
}

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Gather global statistics
    pub async fn global(&self) -> AppResult<GlobalStats> {
        let users = self.repository.users.stats().await?;
        let books = self.repository.books.count().await?;
        let loans = self.repository.loans.stats().await?;

        Ok(GlobalStats {
            users,
            books: BookStats { total: books },
            loans,
        })
    }
}
