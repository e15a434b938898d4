//! In-memory persistence gateway.
//!
//! Backs the domain service tests. A single mutex guards all tables, so
//! every gateway operation is atomic — the same guarantee the unique
//! `(cart, product)` index gives the Postgres implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::Timestamp;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::{
    auth::models::UserUuid,
    domain::{
        carts::{
            models::{Cart, CartItem, CartItemDetails, CartItemUuid, CartUuid},
            store::CartStore,
        },
        products::{
            models::{Product, ProductUuid},
            store::ProductStore,
        },
    },
    store::StoreError,
};

#[derive(Debug, Default)]
struct Inner {
    products: HashMap<ProductUuid, Product>,
    carts: HashMap<CartUuid, Cart>,
    items: HashMap<CartItemUuid, CartItem>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product directly, bypassing service validation.
    pub fn seed_product(&self, name: &str, price: Decimal) -> Product {
        let now = Timestamp::now();

        let product = Product {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            price,
            created_at: now,
            updated_at: now,
        };

        self.inner
            .lock()
            .products
            .insert(product.uuid, product.clone());

        product
    }

    /// Insert the cart that registration would normally create for a user.
    pub fn seed_cart(&self, user: UserUuid) -> Cart {
        let now = Timestamp::now();

        let cart = Cart {
            uuid: CartUuid::new(),
            user_uuid: user,
            created_at: now,
            updated_at: now,
        };

        self.inner.lock().carts.insert(cart.uuid, cart.clone());

        cart
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn find_product(&self, product: ProductUuid) -> Result<Option<Product>, StoreError> {
        Ok(self.inner.lock().products.get(&product).cloned())
    }

    async fn find_cart_by_user(&self, user: UserUuid) -> Result<Option<Cart>, StoreError> {
        Ok(self
            .inner
            .lock()
            .carts
            .values()
            .find(|cart| cart.user_uuid == user)
            .cloned())
    }

    async fn find_item_with_cart(
        &self,
        item: CartItemUuid,
    ) -> Result<Option<(CartItem, Cart)>, StoreError> {
        let inner = self.inner.lock();

        let Some(item) = inner.items.get(&item).cloned() else {
            return Ok(None);
        };

        let cart = inner
            .carts
            .get(&item.cart_uuid)
            .cloned()
            .ok_or(StoreError::InvalidReference)?;

        Ok(Some((item, cart)))
    }

    async fn upsert_item(
        &self,
        cart: CartUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartItem, StoreError> {
        let mut inner = self.inner.lock();

        if !inner.products.contains_key(&product) || !inner.carts.contains_key(&cart) {
            return Err(StoreError::InvalidReference);
        }

        let existing = inner
            .items
            .values()
            .find(|item| item.cart_uuid == cart && item.product_uuid == product)
            .map(|item| item.uuid);

        let item = if let Some(uuid) = existing {
            let item = inner
                .items
                .get_mut(&uuid)
                .ok_or(StoreError::InvalidReference)?;

            item.quantity = item
                .quantity
                .checked_add(quantity)
                .ok_or(StoreError::InvalidData)?;
            item.updated_at = Timestamp::now();

            item.clone()
        } else {
            let now = Timestamp::now();

            let item = CartItem {
                uuid: CartItemUuid::new(),
                cart_uuid: cart,
                product_uuid: product,
                quantity,
                created_at: now,
                updated_at: now,
            };

            inner.items.insert(item.uuid, item.clone());

            item
        };

        Ok(item)
    }

    async fn delete_item(&self, item: CartItemUuid) -> Result<u64, StoreError> {
        let removed = self.inner.lock().items.remove(&item);

        Ok(u64::from(removed.is_some()))
    }

    async fn delete_items_by_cart(&self, cart: CartUuid) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock();

        let before = inner.items.len();

        inner.items.retain(|_, item| item.cart_uuid != cart);

        Ok((before - inner.items.len()) as u64)
    }

    async fn list_items(&self, cart: CartUuid) -> Result<Vec<CartItemDetails>, StoreError> {
        let inner = self.inner.lock();

        let mut items = inner
            .items
            .values()
            .filter(|item| item.cart_uuid == cart)
            .map(|item| {
                let product = inner
                    .products
                    .get(&item.product_uuid)
                    .ok_or(StoreError::InvalidReference)?;

                Ok(CartItemDetails {
                    uuid: item.uuid,
                    product_uuid: item.product_uuid,
                    product_name: product.name.clone(),
                    unit_price: product.price,
                    quantity: item.quantity,
                    created_at: item.created_at,
                    updated_at: item.updated_at,
                })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        items.sort_by_key(|item| item.created_at);

        Ok(items)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list_products(&self, search: Option<String>) -> Result<Vec<Product>, StoreError> {
        let inner = self.inner.lock();

        let needle = search.map(|s| s.to_lowercase());

        let mut products = inner
            .products
            .values()
            .filter(|product| {
                needle
                    .as_deref()
                    .is_none_or(|needle| product.name.to_lowercase().contains(needle))
            })
            .cloned()
            .collect::<Vec<_>>();

        products.sort_by_key(|product| std::cmp::Reverse(product.created_at));

        Ok(products)
    }

    async fn find_product(&self, product: ProductUuid) -> Result<Option<Product>, StoreError> {
        CartStore::find_product(self, product).await
    }

    async fn create_product(
        &self,
        product: ProductUuid,
        name: String,
        price: Decimal,
    ) -> Result<Product, StoreError> {
        let now = Timestamp::now();

        let product = Product {
            uuid: product,
            name,
            price,
            created_at: now,
            updated_at: now,
        };

        self.inner
            .lock()
            .products
            .insert(product.uuid, product.clone());

        Ok(product)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        name: Option<String>,
        price: Option<Decimal>,
    ) -> Result<Option<Product>, StoreError> {
        let mut inner = self.inner.lock();

        let Some(existing) = inner.products.get_mut(&product) else {
            return Ok(None);
        };

        if let Some(name) = name {
            existing.name = name;
        }

        if let Some(price) = price {
            existing.price = price;
        }

        existing.updated_at = Timestamp::now();

        Ok(Some(existing.clone()))
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock();

        if inner.items.values().any(|item| item.product_uuid == product) {
            return Err(StoreError::InvalidReference);
        }

        let removed = inner.products.remove(&product);

        Ok(u64::from(removed.is_some()))
    }
}
