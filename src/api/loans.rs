//! Borrow and return endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{api::AppJson, error::AppResult, models::borrow::Borrow};

/// Borrow book request
#[derive(Deserialize, Default, ToSchema)]
#[serde(default)]
pub struct BorrowBookRequest {
    pub user_id: String,
}

/// Borrow response with the computed due date
#[derive(Serialize, ToSchema)]
pub struct BorrowBookResponse {
    pub borrow_id: Uuid,
    /// Due date (ISO 8601 format)
    pub due_date: DateTime<Utc>,
}

/// Return book request
#[derive(Deserialize, Default, ToSchema)]
#[serde(default)]
pub struct ReturnBookRequest {
    pub borrow_id: String,
}

/// Return response
#[derive(Serialize, ToSchema)]
pub struct ReturnBookResponse {
    pub success: bool,
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/books/{id}/borrowBook",
    tag = "borrows",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    request_body = BorrowBookRequest,
    responses(
        (status = 200, description = "Book borrowed", body = BorrowBookResponse),
        (status = 400, description = "Missing user or book ID"),
        (status = 404, description = "User or book not found"),
        (status = 422, description = "Book is not available")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<String>,
    AppJson(request): AppJson<BorrowBookRequest>,
) -> AppResult<Json<BorrowBookResponse>> {
    let receipt = state
        .services
        .loans
        .borrow_book(&request.user_id, &book_id)
        .await?;

    Ok(Json(BorrowBookResponse {
        borrow_id: receipt.borrow_id,
        due_date: receipt.due_date,
    }))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/books/returnBook",
    tag = "borrows",
    request_body = ReturnBookRequest,
    responses(
        (status = 200, description = "Book returned", body = ReturnBookResponse),
        (status = 400, description = "Missing borrow ID"),
        (status = 404, description = "Borrow not found")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    AppJson(request): AppJson<ReturnBookRequest>,
) -> AppResult<Json<ReturnBookResponse>> {
    state.services.loans.return_book(&request.borrow_id).await?;
    Ok(Json(ReturnBookResponse { success: true }))
}

/// Get the borrow history of a user
#[utoipa::path(
    get,
    path = "/users/{id}/borrows",
    tag = "borrows",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User's borrows, newest first", body = Vec<Borrow>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_borrows(
    State(state): State<crate::AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Borrow>>> {
    let borrows = state.services.loans.get_user_borrows(&user_id).await?;
    Ok(Json(borrows))
}
