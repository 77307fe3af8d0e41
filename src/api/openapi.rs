//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, loans, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "0.1.0",
        description = "Library catalog and loan REST API"
    ),
    servers(
        (url = "/api", description = "REST API")
    ),
    paths(
        health::health_check,
        users::register_user,
        users::login_user,
        users::get_user,
        books::create_book,
        books::get_book,
        books::list_books,
        books::check_availability,
        loans::borrow_book,
        loans::return_book,
        loans::get_user_borrows,
    ),
    components(
        schemas(
            // Users
            crate::models::user::User,
            crate::models::user::RegisterUser,
            users::LoginRequest,
            users::LoginResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::BookPage,
            crate::models::book::CreateBook,
            crate::models::book::Availability,
            books::AvailabilityResponse,
            // Borrows
            crate::models::borrow::Borrow,
            loans::BorrowBookRequest,
            loans::BorrowBookResponse,
            loans::ReturnBookRequest,
            loans::ReturnBookResponse,
            // Health
            health::HealthResponse,
            crate::config::StorageBackend,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "Registration and login"),
        (name = "books", description = "Catalog management"),
        (name = "borrows", description = "Borrow and return")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
