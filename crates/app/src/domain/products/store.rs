//! Product persistence gateway contract.

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;

use crate::{
    domain::products::models::{Product, ProductUuid},
    store::StoreError,
};

#[automock]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, optionally filtered by a case-insensitive substring
    /// match on the name.
    async fn list_products(&self, search: Option<String>) -> Result<Vec<Product>, StoreError>;

    async fn find_product(&self, product: ProductUuid) -> Result<Option<Product>, StoreError>;

    async fn create_product(
        &self,
        product: ProductUuid,
        name: String,
        price: Decimal,
    ) -> Result<Product, StoreError>;

    /// Apply a partial update. Returns `None` when the product is absent.
    async fn update_product(
        &self,
        product: ProductUuid,
        name: Option<String>,
        price: Option<Decimal>,
    ) -> Result<Option<Product>, StoreError>;

    /// Delete a product. Returns the number of rows removed; fails with
    /// [`StoreError::InvalidReference`] while any cart item references it.
    async fn delete_product(&self, product: ProductUuid) -> Result<u64, StoreError>;
}
