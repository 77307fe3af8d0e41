//! Data models for Libris

pub mod book;
pub mod borrow;
pub mod user;

// Re-export commonly used types
pub use book::{Availability, Book, BookPage, BookQuery, CreateBook};
pub use borrow::{Borrow, BorrowReceipt};
pub use user::{RegisterUser, User};
