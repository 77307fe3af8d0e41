//! Protobuf messages of the `library.v1` package

use crate::models;

#[derive(Clone, PartialEq, prost::Message)]
pub struct User {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(string, tag = "3")]
    pub email: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Book {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub title: String,
    #[prost(string, tag = "3")]
    pub author: String,
    /// Empty when the book has no ISBN
    #[prost(string, tag = "4")]
    pub isbn: String,
    #[prost(bool, tag = "5")]
    pub available: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RegisterUserRequest {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(string, tag = "2")]
    pub email: String,
    #[prost(string, tag = "3")]
    pub password: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RegisterUserResponse {
    #[prost(message, optional, tag = "1")]
    pub user: Option<User>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct LoginUserRequest {
    #[prost(string, tag = "1")]
    pub email: String,
    #[prost(string, tag = "2")]
    pub password: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct LoginUserResponse {
    #[prost(message, optional, tag = "1")]
    pub user: Option<User>,
    #[prost(string, tag = "2")]
    pub token: String,
}

/// Only title, author and isbn of `book` are read
#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateBookRequest {
    #[prost(message, optional, tag = "1")]
    pub book: Option<Book>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateBookResponse {
    #[prost(message, optional, tag = "1")]
    pub book: Option<Book>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetBookRequest {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetBookResponse {
    #[prost(message, optional, tag = "1")]
    pub book: Option<Book>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListBooksRequest {
    /// 0 selects the default page size
    #[prost(int32, tag = "1")]
    pub page_size: i32,
    /// 1-based; 0 selects the first page
    #[prost(int32, tag = "2")]
    pub page: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListBooksResponse {
    #[prost(message, repeated, tag = "1")]
    pub books: Vec<Book>,
    #[prost(int32, tag = "2")]
    pub page: i32,
    #[prost(int32, tag = "3")]
    pub page_size: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct BorrowBookRequest {
    #[prost(string, tag = "1")]
    pub user_id: String,
    #[prost(string, tag = "2")]
    pub book_id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct BorrowBookResponse {
    #[prost(string, tag = "1")]
    pub borrow_id: String,
    /// RFC 3339
    #[prost(string, tag = "2")]
    pub due_date: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ReturnBookRequest {
    #[prost(string, tag = "1")]
    pub borrow_id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ReturnBookResponse {
    #[prost(bool, tag = "1")]
    pub success: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CheckBookAvailabilityRequest {
    #[prost(string, tag = "1")]
    pub book_id: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CheckBookAvailabilityResponse {
    #[prost(bool, tag = "1")]
    pub available: bool,
    #[prost(string, tag = "2")]
    pub status: String,
}

impl From<models::User> for User {
    fn from(user: models::User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            email: user.email,
        }
    }
}

impl From<models::Book> for Book {
    fn from(book: models::Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title,
            author: book.author,
            isbn: book.isbn.unwrap_or_default(),
            available: book.available,
        }
    }
}

impl From<Book> for models::CreateBook {
    fn from(book: Book) -> Self {
        Self {
            title: book.title,
            author: book.author,
            isbn: Some(book.isbn),
        }
    }
}
