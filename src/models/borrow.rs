//! Borrow (ledger row) model and related types

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Loan period applied to every borrow
pub const LOAN_DURATION_DAYS: i64 = 14;

/// Borrow record from the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Borrow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    /// Set once the book has been returned
    pub return_date: Option<DateTime<Utc>>,
}

impl Borrow {
    pub fn is_open(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Outcome of a successful borrow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowReceipt {
    pub borrow_id: Uuid,
    pub due_date: DateTime<Utc>,
}

/// Due date for a loan starting at `from`
pub fn due_date_from(from: DateTime<Utc>) -> DateTime<Utc> {
    from + Duration::days(LOAN_DURATION_DAYS)
}
