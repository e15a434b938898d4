//! Cart persistence gateway contract.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::models::UserUuid,
    domain::{
        carts::models::{Cart, CartItem, CartItemDetails, CartItemUuid, CartUuid},
        products::models::{Product, ProductUuid},
    },
    store::StoreError,
};

/// Key-based cart persistence operations.
///
/// Implementations must enforce the `(cart, product)` uniqueness invariant
/// at the storage level; [`CartStore::upsert_item`] relies on it to make
/// merge-or-create atomic under concurrent adds.
#[automock]
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn find_product(&self, product: ProductUuid) -> Result<Option<Product>, StoreError>;

    async fn find_cart_by_user(&self, user: UserUuid) -> Result<Option<Cart>, StoreError>;

    /// Load a cart item together with its owning cart, for ownership checks.
    async fn find_item_with_cart(
        &self,
        item: CartItemUuid,
    ) -> Result<Option<(CartItem, Cart)>, StoreError>;

    /// Atomically create the `(cart, product)` line item with the given
    /// quantity, or increment the existing item's quantity by it.
    async fn upsert_item(
        &self,
        cart: CartUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartItem, StoreError>;

    /// Delete a single line item. Returns the number of rows removed.
    async fn delete_item(&self, item: CartItemUuid) -> Result<u64, StoreError>;

    /// Delete every line item in the given cart. Returns the number removed.
    async fn delete_items_by_cart(&self, cart: CartUuid) -> Result<u64, StoreError>;

    /// All line items in the cart, joined with their product snapshots.
    async fn list_items(&self, cart: CartUuid) -> Result<Vec<CartItemDetails>, StoreError>;
}
