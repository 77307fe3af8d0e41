//! Users repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::user::{RegisterUser, User, UserCredentials},
    password,
};

use super::UserStore;

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UsersRepository {
    /// Create a new user
    async fn create(&self, user: &RegisterUser) -> AppResult<User> {
        let password_hash = password::hash_password(&user.password)?;

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_insert(e, "A user with this email already exists"))
    }

    /// Verify email and password
    async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<User> {
        let row = sqlx::query_as::<_, UserCredentials>(
            "SELECT id, name, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Authentication("invalid credentials".to_string()))?;

        if !password::verify_password(&row.password_hash, password)? {
            return Err(AppError::Authentication("invalid credentials".to_string()));
        }

        Ok(row.into())
    }

    /// Get user by ID
    async fn get_by_id(&self, id: Uuid) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }
}
