//! Registration and login service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{RegisterUser, User},
    repository::Repository,
};

use super::parse_id;

/// Token handed out on login. No real token is issued.
pub const PLACEHOLDER_TOKEN: &str = "sample-jwt-token";

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new user
    pub async fn register(&self, request: RegisterUser) -> AppResult<User> {
        if request.has_missing_fields() {
            return Err(AppError::Validation(
                "name, email, and password are required".to_string(),
            ));
        }
        request.validate()?;

        let user = self.repository.users.create(&request).await?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Authenticate by email and password, returning the user and a token
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(User, String)> {
        if email.is_empty() || password.is_empty() {
            return Err(AppError::Validation(
                "email and password are required".to_string(),
            ));
        }

        let user = self
            .repository
            .users
            .verify_credentials(email, password)
            .await
            .map_err(|e| match e {
                AppError::Authentication(_) | AppError::NotFound(_) => {
                    AppError::Authentication("invalid credentials".to_string())
                }
                other => other,
            })?;

        tracing::debug!(user_id = %user.id, "User logged in");
        Ok((user, PLACEHOLDER_TOKEN.to_string()))
    }

    /// Get user by ID
    pub async fn get_user(&self, id: &str) -> AppResult<User> {
        let id = parse_id(id, "user")?;
        self.repository.users.get_by_id(id).await
    }
}
