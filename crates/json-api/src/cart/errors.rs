//! Errors

use salvo::http::StatusError;
use storefront_app::domain::carts::CartsServiceError;
use tracing::error;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be at least 1")
        }
        CartsServiceError::ProductNotFound => StatusError::not_found().brief("Product not found"),
        CartsServiceError::CartNotFound => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::ItemNotFound => StatusError::not_found().brief("Cart item not found"),
        CartsServiceError::Forbidden => {
            StatusError::forbidden().brief("Cart item belongs to another user")
        }
        CartsServiceError::Storage(source) => {
            error!("cart storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
