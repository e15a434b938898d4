//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront_app::domain::carts::models::NewCartItem;
use uuid::Uuid;

use crate::{
    cart::{errors::into_status_error, handlers::get::CartItemResponse},
    extensions::*,
    state::State,
};

/// Add Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddItemRequest {
    /// The product to add
    pub product_uuid: Uuid,

    /// Units to add; defaults to 1
    pub quantity: Option<u32>,
}

impl From<AddItemRequest> for NewCartItem {
    fn from(request: AddItemRequest) -> Self {
        Self {
            product_uuid: request.product_uuid.into(),
            quantity: request.quantity.unwrap_or(1),
        }
    }
}

/// Item Added Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ItemAddedResponse {
    pub message: String,

    /// The resulting line item; quantities merge when the product was
    /// already in the cart
    pub cart_item: CartItemResponse,
}

/// Add Cart Item Handler
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Item added to cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::NOT_FOUND, description = "Product or cart not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ItemAddedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let item = state
        .app
        .carts
        .add_item(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/cart/item/{}", item.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ItemAddedResponse {
        message: "Item added to cart".to_string(),
        cart_item: item.into(),
    }))
}
