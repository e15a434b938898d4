//! Carts service errors.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("product not found")]
    ProductNotFound,

    #[error("cart not found")]
    CartNotFound,

    #[error("cart item not found")]
    ItemNotFound,

    #[error("cart item belongs to another user")]
    Forbidden,

    #[error("storage error")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for CartsServiceError {
    fn from(error: StoreError) -> Self {
        Self::Storage(error)
    }
}
