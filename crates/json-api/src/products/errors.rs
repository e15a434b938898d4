//! Errors

use salvo::http::StatusError;
use storefront_app::domain::products::ProductsServiceError;
use tracing::error;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::InvalidName => {
            StatusError::bad_request().brief("Product name must not be empty")
        }
        ProductsServiceError::InvalidPrice => {
            StatusError::bad_request().brief("Price must be a valid non-negative amount")
        }
        ProductsServiceError::InUse => {
            StatusError::conflict().brief("Cannot delete product, it exists in shopping carts")
        }
        ProductsServiceError::Storage(source) => {
            error!("product storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
