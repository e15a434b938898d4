//! Products service errors.

use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product not found")]
    NotFound,

    #[error("product name must not be empty")]
    InvalidName,

    #[error("price must be a non-negative amount")]
    InvalidPrice,

    /// The product is referenced by at least one cart item.
    #[error("product exists in shopping carts")]
    InUse,

    #[error("storage error")]
    Storage(#[source] StoreError),
}

impl From<StoreError> for ProductsServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::InvalidReference => Self::InUse,
            other => Self::Storage(other),
        }
    }
}
