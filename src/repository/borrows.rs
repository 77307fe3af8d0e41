//! Borrow ledger repository for database operations
//!
//! Borrow and return each run in one transaction with the book row locked,
//! so the availability flag and the open borrow record change together.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Transaction};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::borrow::Borrow,
};

use super::LedgerStore;

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Roll back after a failed ledger write. A failed rollback is logged and the
/// write error is still returned.
async fn revert(tx: Transaction<'_, Postgres>, book_id: Uuid, error: sqlx::Error) -> AppError {
    if let Err(revert_err) = tx.rollback().await {
        tracing::error!(%book_id, error = %revert_err, "Failed to revert book availability");
    }
    AppError::Database(error)
}

#[async_trait]
impl LedgerStore for BorrowsRepository {
    /// Borrow a book
    async fn borrow(&self, user_id: Uuid, book_id: Uuid, due_date: DateTime<Utc>) -> AppResult<Uuid> {
        let mut tx = self.pool.begin().await?;

        let available: bool = sqlx::query_scalar(
            "SELECT available FROM books WHERE id = $1 FOR UPDATE",
        )
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        if !available {
            return Err(AppError::BusinessRule("book is not available".to_string()));
        }

        sqlx::query("UPDATE books SET available = FALSE, updated_at = NOW() WHERE id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        let inserted = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO borrows (user_id, book_id, due_date)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(due_date)
        .fetch_one(&mut *tx)
        .await;

        let borrow_id = match inserted {
            Ok(id) => id,
            Err(e) => return Err(revert(tx, book_id, e).await),
        };

        tx.commit().await?;
        Ok(borrow_id)
    }

    /// Return a borrowed book. Returning twice re-stamps the return time.
    async fn return_borrow(&self, borrow_id: Uuid) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let book_id: Uuid = sqlx::query_scalar(
            "SELECT book_id FROM borrows WHERE id = $1 FOR UPDATE",
        )
        .bind(borrow_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Borrow with id {} not found", borrow_id)))?;

        sqlx::query("UPDATE books SET available = TRUE, updated_at = NOW() WHERE id = $1")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;

        let stamped = sqlx::query(
            "UPDATE borrows SET return_date = NOW(), updated_at = NOW() WHERE id = $1",
        )
        .bind(borrow_id)
        .execute(&mut *tx)
        .await;

        if let Err(e) = stamped {
            return Err(revert(tx, book_id, e).await);
        }

        tx.commit().await?;
        Ok(())
    }

    /// Get borrow by ID
    async fn get_by_id(&self, borrow_id: Uuid) -> AppResult<Borrow> {
        sqlx::query_as::<_, Borrow>(
            r#"
            SELECT id, user_id, book_id, borrow_date, due_date, return_date
            FROM borrows
            WHERE id = $1
            "#,
        )
        .bind(borrow_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Borrow with id {} not found", borrow_id)))
    }

    /// Get all borrows of a user
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Borrow>> {
        let borrows = sqlx::query_as::<_, Borrow>(
            r#"
            SELECT id, user_id, book_id, borrow_date, due_date, return_date
            FROM borrows
            WHERE user_id = $1
            ORDER BY borrow_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(borrows)
    }
}
