//! Carts service errors.

use thiserror::Error;

use crate::domain::items::ItemsServiceError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart already exists")]
    AlreadyExists,

    #[error("cart not found")]
    NotFound,

    #[error("item not found")]
    ItemNotFound,

    #[error("catalog lookup failed")]
    Catalog(#[source] ItemsServiceError),
}

impl From<ItemsServiceError> for CartsServiceError {
    fn from(error: ItemsServiceError) -> Self {
        match error {
            ItemsServiceError::NotFound => Self::ItemNotFound,
            other => Self::Catalog(other),
        }
    }
}
