//! Borrow and return service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::borrow::{due_date_from, Borrow, BorrowReceipt},
    repository::Repository,
};

use super::parse_id;

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow a book for the given user; due 14 days from now
    pub async fn borrow_book(&self, user_id: &str, book_id: &str) -> AppResult<BorrowReceipt> {
        if user_id.trim().is_empty() || book_id.trim().is_empty() {
            return Err(AppError::Validation(
                "user id and book id are required".to_string(),
            ));
        }
        let user_id = parse_id(user_id, "user")?;
        let book_id = parse_id(book_id, "book")?;

        // Verify user exists
        self.repository.users.get_by_id(user_id).await?;

        let due_date = due_date_from(Utc::now());
        let borrow_id = self
            .repository
            .borrows
            .borrow(user_id, book_id, due_date)
            .await?;

        tracing::info!(%borrow_id, %user_id, %book_id, %due_date, "Book borrowed");
        Ok(BorrowReceipt { borrow_id, due_date })
    }

    /// Return a borrowed book
    pub async fn return_book(&self, borrow_id: &str) -> AppResult<()> {
        let borrow_id = parse_id(borrow_id, "borrow")?;
        self.repository.borrows.return_borrow(borrow_id).await?;

        tracing::info!(%borrow_id, "Book returned");
        Ok(())
    }

    /// Get the borrow history of a user
    pub async fn get_user_borrows(&self, user_id: &str) -> AppResult<Vec<Borrow>> {
        let user_id = parse_id(user_id, "user")?;
        // Verify user exists
        self.repository.users.get_by_id(user_id).await?;
        self.repository.borrows.list_for_user(user_id).await
    }
}
