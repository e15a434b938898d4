//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use storefront_app::domain::carts::models::{CartItemDetails, CartView};
use uuid::Uuid;

use crate::{cart::errors::into_status_error, extensions::*, money::format_amount, state::State};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The line items in the cart
    pub items: Vec<CartItemResponse>,

    /// Sum of unit price times quantity over all items, two decimal places
    pub total: String,

    /// Number of distinct line items
    pub item_count: u64,
}

impl From<CartView> for CartResponse {
    fn from(cart: CartView) -> Self {
        Self {
            uuid: cart.uuid.into_uuid(),
            total: format_amount(cart.total),
            item_count: cart.item_count as u64,
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// The unique identifier of the cart item
    pub uuid: Uuid,

    /// The unique identifier of the product in this line item
    pub product_uuid: Uuid,

    /// The product name at read time
    pub product_name: String,

    /// The number of units of the product
    pub quantity: u32,

    /// The current unit price of the product
    pub unit_price: String,

    /// Unit price times quantity
    pub line_total: String,

    /// The date and time the item was first added
    pub created_at: String,

    /// The date and time the item quantity last changed
    pub updated_at: String,
}

impl From<CartItemDetails> for CartItemResponse {
    fn from(item: CartItemDetails) -> Self {
        Self {
            uuid: item.uuid.into_uuid(),
            product_uuid: item.product_uuid.into_uuid(),
            quantity: item.quantity,
            unit_price: format_amount(item.unit_price),
            line_total: format_amount(item.line_total()),
            product_name: item.product_name,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// Get Cart Handler
///
/// Returns the authenticated user's cart with derived totals.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
