//! In-memory store implementing every repository trait
//!
//! Used by the tests and by `database.backend = "memory"`. All state sits
//! behind one lock, so borrow and return are atomic here as well.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, CreateBook},
        borrow::Borrow,
        user::{RegisterUser, User, UserCredentials},
    },
    password,
};

use super::{CatalogStore, LedgerStore, UserStore};

#[derive(Default)]
struct State {
    users: HashMap<Uuid, UserCredentials>,
    books: HashMap<Uuid, Book>,
    borrows: HashMap<Uuid, Borrow>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: &RegisterUser) -> AppResult<User> {
        let password_hash = password::hash_password(&user.password)?;

        let mut state = self.state.lock().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }

        let row = UserCredentials {
            id: Uuid::new_v4(),
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash,
        };
        state.users.insert(row.id, row.clone());
        Ok(row.into())
    }

    async fn verify_credentials(&self, email: &str, password: &str) -> AppResult<User> {
        let row = {
            let state = self.state.lock().await;
            state.users.values().find(|u| u.email == email).cloned()
        }
        .ok_or_else(|| AppError::Authentication("invalid credentials".to_string()))?;

        if !password::verify_password(&row.password_hash, password)? {
            return Err(AppError::Authentication("invalid credentials".to_string()));
        }
        Ok(row.into())
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<User> {
        let state = self.state.lock().await;
        state
            .users
            .get(&id)
            .cloned()
            .map(User::from)
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn create(&self, book: &CreateBook) -> AppResult<Book> {
        let mut state = self.state.lock().await;
        if let Some(isbn) = &book.isbn {
            if state.books.values().any(|b| b.isbn.as_ref() == Some(isbn)) {
                return Err(AppError::Conflict(
                    "A book with this ISBN already exists".to_string(),
                ));
            }
        }

        let created = Book {
            id: Uuid::new_v4(),
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            available: true,
        };
        state.books.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Book> {
        let state = self.state.lock().await;
        state
            .books
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    async fn list(&self, limit: i64, offset: i64) -> AppResult<Vec<Book>> {
        let state = self.state.lock().await;
        let mut books: Vec<Book> = state.books.values().cloned().collect();
        books.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));

        Ok(books
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }
}

#[async_trait]
impl LedgerStore for MemoryStore {
    async fn borrow(&self, user_id: Uuid, book_id: Uuid, due_date: DateTime<Utc>) -> AppResult<Uuid> {
        let mut state = self.state.lock().await;

        if !state.users.contains_key(&user_id) {
            return Err(AppError::NotFound(format!("User with id {} not found", user_id)));
        }

        let book = state
            .books
            .get_mut(&book_id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        if !book.available {
            return Err(AppError::BusinessRule("book is not available".to_string()));
        }
        book.available = false;

        let borrow = Borrow {
            id: Uuid::new_v4(),
            user_id,
            book_id,
            borrow_date: Utc::now(),
            due_date,
            return_date: None,
        };
        let borrow_id = borrow.id;
        state.borrows.insert(borrow_id, borrow);

        Ok(borrow_id)
    }

    async fn return_borrow(&self, borrow_id: Uuid) -> AppResult<()> {
        let mut state = self.state.lock().await;
        let State { books, borrows, .. } = &mut *state;

        let borrow = borrows
            .get_mut(&borrow_id)
            .ok_or_else(|| AppError::NotFound(format!("Borrow with id {} not found", borrow_id)))?;

        if let Some(book) = books.get_mut(&borrow.book_id) {
            book.available = true;
        }
        borrow.return_date = Some(Utc::now());

        Ok(())
    }

    async fn get_by_id(&self, borrow_id: Uuid) -> AppResult<Borrow> {
        let state = self.state.lock().await;
        state
            .borrows
            .get(&borrow_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Borrow with id {} not found", borrow_id)))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Borrow>> {
        let state = self.state.lock().await;
        let mut borrows: Vec<Borrow> = state
            .borrows
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        borrows.sort_by(|a, b| b.borrow_date.cmp(&a.borrow_date));
        Ok(borrows)
    }
}
