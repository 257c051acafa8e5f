//! Business logic services

pub mod activity;
pub mod auth;
pub mod books;
pub mod genres;
pub mod loans;
pub mod reviews;
pub mod shelves;
pub mod stats;
pub mod users;

use crate::{
    config::{AuthConfig, LoanPolicyConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub users: users::UsersService,
    pub books: books::BooksService,
    pub shelves: shelves::ShelvesService,
    pub genres: genres::GenresService,
    pub loans: loans::LoansService,
    pub reviews: reviews::ReviewsService,
    pub activity: activity::ActivityService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        loan_policy: LoanPolicyConfig,
    ) -> Self {
        let auth = auth::AuthService::new(repository.clone(), auth_config);
        Self {
            users: users::UsersService::new(repository.clone(), auth.clone()),
            books: books::BooksService::new(repository.clone()),
            shelves: shelves::ShelvesService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone(), loan_policy),
            reviews: reviews::ReviewsService::new(repository.clone()),
            activity: activity::ActivityService::new(repository.clone()),
            stats: stats::StatsService::new(repository),
            auth,
        }
    }
}
