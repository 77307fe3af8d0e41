//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    /// False while an open borrow references the book
    pub available: bool,
}

/// Create book request. New books are always available.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
}

/// Book list query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Page number, starting at 1
    pub page: Option<i64>,
    /// Books per page (default 10, max 100)
    pub page_size: Option<i64>,
}

/// One page of the catalog listing
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub page: i64,
    pub page_size: i64,
}

/// Loan status of a book as shown to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Availability {
    Available,
    Borrowed,
}

impl From<bool> for Availability {
    fn from(available: bool) -> Self {
        if available {
            Availability::Available
        } else {
            Availability::Borrowed
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Available => f.write_str("Available"),
            Availability::Borrowed => f.write_str("Borrowed"),
        }
    }
}
