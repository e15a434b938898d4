//! Cart Models

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{auth::models::UserUuid, domain::products::models::ProductUuid, uuids::TypedUuid};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// Cart Model
///
/// A persistent per-user container of line items. Exactly one cart exists
/// per user, created at registration time.
#[derive(Debug, Clone)]
pub struct Cart {
    pub uuid: CartUuid,
    pub user_uuid: UserUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Cart Item UUID
pub type CartItemUuid = TypedUuid<CartItem>;

/// CartItem Model
///
/// A (product, quantity) line entry belonging to exactly one cart. At most
/// one item exists per (cart, product) pair.
#[derive(Debug, Clone)]
pub struct CartItem {
    pub uuid: CartItemUuid,
    pub cart_uuid: CartUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Cart Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartItem {
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

/// Cart item joined with its product snapshot.
#[derive(Debug, Clone)]
pub struct CartItemDetails {
    pub uuid: CartItemUuid,
    pub product_uuid: ProductUuid,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CartItemDetails {
    /// Price of this line item: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A cart as returned to callers: its items plus derived totals.
///
/// The total is computed at read time, never stored.
#[derive(Debug, Clone)]
pub struct CartView {
    pub uuid: CartUuid,
    pub items: Vec<CartItemDetails>,
    pub total: Decimal,
    pub item_count: usize,
}
