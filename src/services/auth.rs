//! Authentication service: registration, login, token refresh, logout

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        enums::UserRole,
        user::{CreateUser, RefreshClaims, User, UserClaims},
    },
    repository::Repository,
};

/// Access/refresh token pair returned by login and refresh
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash
    pub fn verify_password(&self, hash: &str, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Register a new user account (always with the `user` role)
    pub async fn register(&self, request: CreateUser) -> AppResult<User> {
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

        let password_hash = self.hash_password(&request.password)?;

        self.repository
            .users
            .create(&request.username, &request.email, &password_hash, UserRole::User)
            .await
    }

    /// Authenticate by username and password, returning a token pair
    pub async fn login(&self, username: &str, password: &str) -> AppResult<(TokenPair, User)> {
        let user = self
            .repository
            .users
            .get_by_username(username)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !user.active {
            return Err(AppError::Authentication("Account is deactivated".to_string()));
        }

        if !self.verify_password(&user.password_hash, password)? {
            return Err(AppError::Authentication("Invalid username or password".to_string()));
        }

        let tokens = self.create_token_pair(&user)?;
        Ok((tokens, user))
    }

    /// Exchange a valid refresh token for a fresh token pair.
    ///
    /// The token's version must match the user row; logout bumps the row
    /// version so every outstanding refresh token dies at once.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<(TokenPair, User)> {
        let claims = RefreshClaims::from_token(refresh_token, &self.config.refresh_secret)
            .map_err(|_| AppError::Authentication("Invalid refresh token".to_string()))?;

        let user = self.repository.users.get_by_id(claims.user_id).await?;

        if !user.active {
            return Err(AppError::Authentication("Account is deactivated".to_string()));
        }

        if user.token_version != claims.token_version {
            return Err(AppError::Authentication("Refresh token has been revoked".to_string()));
        }

        let tokens = self.create_token_pair(&user)?;
        Ok((tokens, user))
    }

    /// Invalidate every outstanding refresh token for a user
    pub async fn logout(&self, user_id: i32) -> AppResult<()> {
        self.repository.users.bump_token_version(user_id).await?;
        Ok(())
    }

    /// Create an access/refresh token pair for a user
    fn create_token_pair(&self, user: &User) -> AppResult<TokenPair> {
        let now = Utc::now().timestamp();

        let access = UserClaims {
            sub: user.username.clone(),
            user_id: user.id,
            role: user.role,
            exp: now + (self.config.jwt_expiration_hours as i64 * 3600),
            iat: now,
        };

        let refresh = RefreshClaims {
            sub: user.username.clone(),
            user_id: user.id,
            token_version: user.token_version,
            exp: now + (self.config.refresh_expiration_days as i64 * 86400),
            iat: now,
        };

        let access_token = access
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;
        let refresh_token = refresh
            .create_token(&self.config.refresh_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create refresh token: {}", e)))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
        })
    }
}
