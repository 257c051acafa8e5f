//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{activity, auth, books, genres, health, loans, reviews, shelves, stats, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Biblioteca API",
        version = "1.0.0",
        description = "Library Management System REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::refresh,
        auth::logout,
        auth::me,
        auth::update_profile,
        // Users
        users::list_users,
        users::create_user,
        users::get_user,
        users::update_user,
        users::delete_user,
        users::change_password,
        users::user_stats,
        // Books
        books::list_books,
        books::create_book,
        books::get_book,
        books::get_book_by_isbn,
        books::update_book,
        books::delete_book,
        // Shelves
        shelves::list_shelves,
        shelves::create_shelf,
        shelves::get_shelf,
        shelves::update_shelf,
        shelves::delete_shelf,
        // Genres
        genres::list_genres,
        genres::create_genre,
        genres::get_genre,
        genres::update_genre,
        genres::delete_genre,
        // Loans
        loans::list_loans,
        loans::create_loan,
        loans::get_loan,
        loans::renew_loan,
        loans::return_loan,
        loans::delete_loan,
        loans::sweep_overdue,
        loans::loan_stats,
        loans::list_user_loans,
        // Reviews
        reviews::create_review,
        reviews::update_review,
        reviews::delete_review,
        reviews::vote_review,
        reviews::list_book_reviews,
        reviews::book_rating,
        // Activity
        activity::record_activity,
        activity::list_activity,
        activity::activity_stats,
        // Stats
        stats::global_stats,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::TokenResponse,
            auth::RefreshRequest,
            // Users
            crate::models::user::User,
            crate::models::user::UserSummary,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            crate::models::user::UpdateProfile,
            crate::models::user::ChangePassword,
            crate::models::user::UserStats,
            crate::models::user::RoleCount,
            crate::models::enums::UserRole,
            users::UserListResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::BookSummary,
            crate::models::book::BookDetails,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            books::BookListResponse,
            // Shelves
            crate::models::shelf::Shelf,
            crate::models::shelf::ShelfDetails,
            crate::models::shelf::CreateShelf,
            crate::models::shelf::UpdateShelf,
            // Genres
            crate::models::genre::Genre,
            crate::models::genre::CreateGenre,
            crate::models::genre::UpdateGenre,
            // Loans
            crate::models::loan::Loan,
            crate::models::loan::LoanDetails,
            crate::models::loan::CreateLoan,
            crate::models::loan::RenewLoan,
            crate::models::loan::ReturnLoan,
            crate::models::loan::LoanStats,
            crate::models::enums::LoanStatus,
            loans::LoanListResponse,
            loans::SweepResponse,
            // Reviews
            crate::models::review::Review,
            crate::models::review::RatingSummary,
            crate::models::review::CreateReview,
            crate::models::review::UpdateReview,
            crate::models::review::VoteReview,
            crate::models::review::ReviewVote,
            reviews::ReviewListResponse,
            // Activity
            crate::models::activity::Activity,
            crate::models::activity::RecordActivity,
            crate::models::activity::ActivityStats,
            crate::models::activity::KindCount,
            crate::models::enums::ActivityKind,
            activity::ActivityListResponse,
            // Stats
            crate::services::stats::GlobalStats,
            crate::services::stats::BookStats,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User management"),
        (name = "books", description = "Book catalog management"),
        (name = "shelves", description = "Shelf management"),
        (name = "genres", description = "Genre management"),
        (name = "loans", description = "Loan lifecycle management"),
        (name = "reviews", description = "Book reviews"),
        (name = "activity", description = "User activity log"),
        (name = "stats", description = "Statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
