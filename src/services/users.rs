//! User management service

use crate::{
    error::{AppError, AppResult},
    models::user::{
        ChangePassword, CreateUser, UpdateProfile, UpdateUser, User, UserQuery, UserStats,
        UserSummary,
    },
    repository::Repository,
    services::auth::AuthService,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    auth: AuthService,
}

impl UsersService {
    pub fn new(repository: Repository, auth: AuthService) -> Self {
        Self { repository, auth }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Search users with filters and pagination
    pub async fn search(&self, query: &UserQuery) -> AppResult<(Vec<UserSummary>, i64)> {
        self.repository.users.search(query).await
    }

    /// Create a new user (admin path, role may be set)
    pub async fn create(&self, request: CreateUser) -> AppResult<User> {
        if self
            .repository
            .users
            .username_exists(&request.username, None)
            .await?
        {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        if self.repository.users.email_exists(&request.email, None).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }

        let password_hash = self.auth.hash_password(&request.password)?;
        let role = request.role.unwrap_or(crate::models::enums::UserRole::User);

        self.repository
            .users
            .create(&request.username, &request.email, &password_hash, role)
            .await
    }

    /// Update an existing user
    pub async fn update(&self, id: i32, request: UpdateUser) -> AppResult<User> {
        self.repository.users.get_by_id(id).await?;

        if let Some(ref username) = request.username {
            if self.repository.users.username_exists(username, Some(id)).await? {
                return Err(AppError::Conflict("Username already exists".to_string()));
            }
        }

        if let Some(ref email) = request.email {
            if self.repository.users.email_exists(email, Some(id)).await? {
                return Err(AppError::Conflict("Email already exists".to_string()));
            }
        }

        self.repository.users.update(id, &request).await
    }

    /// Update a user's own profile
    pub async fn update_profile(&self, id: i32, profile: UpdateProfile) -> AppResult<User> {
        if let Some(ref username) = profile.username {
            if self.repository.users.username_exists(username, Some(id)).await? {
                return Err(AppError::Conflict("Username already exists".to_string()));
            }
        }

        if let Some(ref email) = profile.email {
            if self.repository.users.email_exists(email, Some(id)).await? {
                return Err(AppError::Conflict("Email already exists".to_string()));
            }
        }

        self.repository.users.update_profile(id, &profile).await
    }

    /// Change a user's password after verifying the current one
    pub async fn change_password(&self, id: i32, request: ChangePassword) -> AppResult<()> {
        let user = self.repository.users.get_by_id(id).await?;

        if !self
            .auth
            .verify_password(&user.password_hash, &request.current_password)?
        {
            return Err(AppError::Authentication(
                "Current password is incorrect".to_string(),
            ));
        }

        let password_hash = self.auth.hash_password(&request.new_password)?;
        self.repository.users.update_password(id, &password_hash).await
    }

    /// Delete a user.
    ///
    /// A user with open loans cannot be removed; one with loan history is
    /// deactivated instead of hard-deleted so the history keeps its rows.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.users.get_by_id(id).await?;

        let open = self.repository.loans.count_open_by_user(id).await?;
        if open > 0 {
            return Err(AppError::Conflict(
                "User has open loans and cannot be deleted".to_string(),
            ));
        }

        let history = self.repository.loans.count_by_user(id).await?;
        if history > 0 {
            self.repository.users.deactivate(id).await
        } else {
            self.repository.users.delete(id).await
        }
    }

    /// User statistics
    pub async fn stats(&self) -> AppResult<UserStats> {
        self.repository.users.stats().await
    }
}
