//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::book::{Availability, Book, BookPage, BookQuery, CreateBook},
    repository::Repository,
};

use super::parse_id;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new book
    pub async fn create_book(&self, mut book: CreateBook) -> AppResult<Book> {
        if book.title.is_empty() || book.author.is_empty() {
            return Err(AppError::Validation(
                "title and author are required".to_string(),
            ));
        }
        // An empty ISBN means none; it must not collide with other books
        book.isbn = book
            .isbn
            .map(|isbn| isbn.trim().to_string())
            .filter(|isbn| !isbn.is_empty());

        let created = self.repository.books.create(&book).await?;
        tracing::info!(book_id = %created.id, title = %created.title, "Book created");
        Ok(created)
    }

    /// Get book by ID
    pub async fn get_book(&self, id: &str) -> AppResult<Book> {
        let id = parse_id(id, "book")?;
        self.repository.books.get_by_id(id).await
    }

    /// List books ordered by title
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<BookPage> {
        let page_size = match query.page_size {
            Some(size) if size > 0 => size.min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        };
        let page = query.page.filter(|p| *p > 0).unwrap_or(1);
        let offset = (page - 1).saturating_mul(page_size);

        let books = self.repository.books.list(page_size, offset).await?;

        Ok(BookPage {
            books,
            page,
            page_size,
        })
    }

    /// Check whether a book can currently be borrowed
    pub async fn check_availability(&self, id: &str) -> AppResult<(bool, Availability)> {
        let book = self.get_book(id).await?;
        Ok((book.available, Availability::from(book.available)))
    }
}
