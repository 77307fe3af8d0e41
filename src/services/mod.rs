//! Business logic services
//!
//! One operation per use case. Inputs are validated here before any store is
//! touched; store failures come back as categorized `AppError`s.

pub mod catalog;
pub mod loans;
pub mod users;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub users: users::UsersService,
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            users: users::UsersService::new(repository.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            loans: loans::LoansService::new(repository),
        }
    }
}

/// Parse a wire identifier. Empty is a validation error; anything that is not
/// a UUID cannot name a stored entity and is reported as not found.
pub(crate) fn parse_id(raw: &str, entity: &str) -> AppResult<Uuid> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::Validation(format!("{} id is required", entity)));
    }
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(format!("{} {} not found", entity, raw)))
}
