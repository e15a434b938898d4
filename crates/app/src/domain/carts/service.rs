//! Carts service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;

use crate::{
    auth::models::UserUuid,
    domain::carts::{
        errors::CartsServiceError,
        models::{CartItemDetails, CartItemUuid, CartView, NewCartItem},
        store::CartStore,
    },
    store::StoreError,
};

#[derive(Clone)]
pub struct StoreCartsService {
    store: Arc<dyn CartStore>,
}

impl StoreCartsService {
    #[must_use]
    pub fn new(store: Arc<dyn CartStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CartsService for StoreCartsService {
    async fn get_cart(&self, user: UserUuid) -> Result<CartView, CartsServiceError> {
        let cart = self
            .store
            .find_cart_by_user(user)
            .await?
            .ok_or(CartsServiceError::CartNotFound)?;

        let items = self.store.list_items(cart.uuid).await?;

        let total = items
            .iter()
            .map(CartItemDetails::line_total)
            .sum::<Decimal>()
            .round_dp(2);

        Ok(CartView {
            uuid: cart.uuid,
            item_count: items.len(),
            items,
            total,
        })
    }

    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemDetails, CartsServiceError> {
        if item.quantity < 1 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let product = self
            .store
            .find_product(item.product_uuid)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        let cart = self
            .store
            .find_cart_by_user(user)
            .await?
            .ok_or(CartsServiceError::CartNotFound)?;

        // Merge-or-create is atomic at the store: the unique
        // (cart, product) index plus a conditional upsert guarantee a
        // single row even under concurrent adds.
        let item = match self
            .store
            .upsert_item(cart.uuid, product.uuid, item.quantity)
            .await
        {
            Ok(item) => item,
            // The product can be deleted between the lookup and the write.
            Err(StoreError::InvalidReference) => return Err(CartsServiceError::ProductNotFound),
            Err(error) => return Err(error.into()),
        };

        Ok(CartItemDetails {
            uuid: item.uuid,
            product_uuid: product.uuid,
            product_name: product.name,
            unit_price: product.price,
            quantity: item.quantity,
            created_at: item.created_at,
            updated_at: item.updated_at,
        })
    }

    async fn remove_item(
        &self,
        user: UserUuid,
        item: CartItemUuid,
    ) -> Result<(), CartsServiceError> {
        let (item, cart) = self
            .store
            .find_item_with_cart(item)
            .await?
            .ok_or(CartsServiceError::ItemNotFound)?;

        // Ownership check before any mutation: guessing another user's
        // item id must never delete it.
        if cart.user_uuid != user {
            return Err(CartsServiceError::Forbidden);
        }

        self.store.delete_item(item.uuid).await?;

        Ok(())
    }

    async fn clear_cart(&self, user: UserUuid) -> Result<u64, CartsServiceError> {
        let cart = self
            .store
            .find_cart_by_user(user)
            .await?
            .ok_or(CartsServiceError::CartNotFound)?;

        let removed = self.store.delete_items_by_cart(cart.uuid).await?;

        Ok(removed)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the user's cart with items, derived total, and item count.
    async fn get_cart(&self, user: UserUuid) -> Result<CartView, CartsServiceError>;

    /// Add a product to the user's cart, merging into an existing line item
    /// when the product is already present.
    async fn add_item(
        &self,
        user: UserUuid,
        item: NewCartItem,
    ) -> Result<CartItemDetails, CartsServiceError>;

    /// Remove a single line item from the user's own cart.
    async fn remove_item(&self, user: UserUuid, item: CartItemUuid)
    -> Result<(), CartsServiceError>;

    /// Remove every line item from the user's cart. Returns the number of
    /// items removed; clearing an empty cart succeeds with zero.
    async fn clear_cart(&self, user: UserUuid) -> Result<u64, CartsServiceError>;
}
