//! Repository layer for database operations
//!
//! Each store is a trait so the services can run against PostgreSQL or the
//! in-memory implementation.

pub mod books;
pub mod borrows;
pub mod memory;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, Borrow, CreateBook, RegisterUser, User},
};

/// Persists users and checks their credentials
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Hash the password and insert the user
    async fn create(&self, user: &RegisterUser) -> AppResult<User>;

    /// Fails with `Authentication` for an unknown email or a wrong password
    async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<User>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<User>;
}

/// Persists books
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn create(&self, book: &CreateBook) -> AppResult<Book>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Book>;

    /// Books ordered by title
    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Book>>;
}

/// Borrow ledger. Owns every change to a book's availability flag.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Mark the book unavailable and open a borrow record; returns its id
    async fn borrow(&self, user_id: Uuid, book_id: Uuid, due_date: DateTime<Utc>) -> AppResult<Uuid>;

    /// Mark the borrowed book available again and stamp the return time
    async fn return_borrow(&self, borrow_id: Uuid) -> AppResult<()>;

    async fn get_by_id(&self, borrow_id: Uuid) -> AppResult<Borrow>;

    /// All borrows of a user, newest first
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Borrow>>;
}

/// Main repository struct holding the stores
#[derive(Clone)]
pub struct Repository {
    pub users: Arc<dyn UserStore>,
    pub books: Arc<dyn CatalogStore>,
    pub borrows: Arc<dyn LedgerStore>,
}

impl Repository {
    /// Create a repository backed by the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: Arc::new(users::UsersRepository::new(pool.clone())),
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            borrows: Arc::new(borrows::BorrowsRepository::new(pool)),
        }
    }

    /// Create a repository keeping everything in process memory
    pub fn in_memory() -> Self {
        let store = Arc::new(memory::MemoryStore::default());
        Self {
            users: store.clone(),
            books: store.clone(),
            borrows: store,
        }
    }
}
