//! Demonstration client for the gRPC API
//!
//! Walks through registration, login, cataloging, borrowing and returning
//! against a running server. The address is taken from `LIBRIS_GRPC_ADDR`.

use std::time::Duration;

use anyhow::Context;
use tonic::transport::Endpoint;

use libris_server::rpc::{
    library_service_client::LibraryServiceClient,
    messages::{
        Book, BorrowBookRequest, CheckBookAvailabilityRequest, CreateBookRequest, GetBookRequest,
        ListBooksRequest, LoginUserRequest, RegisterUserRequest, ReturnBookRequest,
    },
};

const DEFAULT_ADDR: &str = "http://127.0.0.1:50051";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "library_client=info".into()),
        )
        .init();

    let addr = std::env::var("LIBRIS_GRPC_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let channel = Endpoint::from_shared(addr.clone())
        .context("Invalid server address")?
        .timeout(Duration::from_secs(10))
        .connect()
        .await
        .with_context(|| format!("Failed to connect to {}", addr))?;
    let mut client = LibraryServiceClient::new(channel);

    tracing::info!(%addr, "Connected");

    // Unique per run so the demo can be repeated against the same database
    let run = uuid::Uuid::new_v4().simple().to_string();
    let email = format!("demo-{}@example.com", &run[..8]);
    let password = "password1234".to_string();

    let user = client
        .register_user(RegisterUserRequest {
            name: "Demo User".to_string(),
            email: email.clone(),
            password: password.clone(),
        })
        .await
        .context("RegisterUser failed")?
        .into_inner()
        .user
        .context("RegisterUser returned no user")?;
    tracing::info!(user_id = %user.id, "User registered");

    let login = client
        .login_user(LoginUserRequest { email, password })
        .await
        .context("LoginUser failed")?
        .into_inner();
    tracing::info!(token = %login.token, "Logged in");

    let book = client
        .create_book(CreateBookRequest {
            book: Some(Book {
                title: "The Rust Programming Language".to_string(),
                author: "Steve Klabnik".to_string(),
                isbn: format!("978-{}", &run[..10]),
                ..Default::default()
            }),
        })
        .await
        .context("CreateBook failed")?
        .into_inner()
        .book
        .context("CreateBook returned no book")?;
    tracing::info!(book_id = %book.id, title = %book.title, "Book created");

    let listing = client
        .list_books(ListBooksRequest {
            page_size: 10,
            page: 1,
        })
        .await
        .context("ListBooks failed")?
        .into_inner();
    tracing::info!(count = listing.books.len(), "Listed books");

    let borrow = client
        .borrow_book(BorrowBookRequest {
            user_id: user.id.clone(),
            book_id: book.id.clone(),
        })
        .await
        .context("BorrowBook failed")?
        .into_inner();
    tracing::info!(borrow_id = %borrow.borrow_id, due_date = %borrow.due_date, "Book borrowed");

    let availability = client
        .check_book_availability(CheckBookAvailabilityRequest {
            book_id: book.id.clone(),
        })
        .await
        .context("CheckBookAvailability failed")?
        .into_inner();
    tracing::info!(available = availability.available, status = %availability.status, "Availability after borrow");

    let returned = client
        .return_book(ReturnBookRequest {
            borrow_id: borrow.borrow_id,
        })
        .await
        .context("ReturnBook failed")?
        .into_inner();
    tracing::info!(success = returned.success, "Book returned");

    let book = client
        .get_book(GetBookRequest { id: book.id })
        .await
        .context("GetBook failed")?
        .into_inner()
        .book
        .context("GetBook returned no book")?;
    tracing::info!(available = book.available, "Availability after return");

    Ok(())
}
