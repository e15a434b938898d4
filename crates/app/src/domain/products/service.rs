//! Products service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use rust_decimal::Decimal;

use crate::domain::products::{
    errors::ProductsServiceError,
    models::{NewProduct, Product, ProductUpdate, ProductUuid},
    store::ProductStore,
};

#[derive(Clone)]
pub struct StoreProductsService {
    store: Arc<dyn ProductStore>,
}

impl StoreProductsService {
    #[must_use]
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }
}

fn validate_name(name: &str) -> Result<(), ProductsServiceError> {
    if name.trim().is_empty() {
        return Err(ProductsServiceError::InvalidName);
    }

    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), ProductsServiceError> {
    if price.is_sign_negative() {
        return Err(ProductsServiceError::InvalidPrice);
    }

    Ok(())
}

#[async_trait]
impl ProductsService for StoreProductsService {
    async fn list_products(
        &self,
        search: Option<String>,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let products = self.store.list_products(search).await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        self.store
            .find_product(product)
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        validate_name(&product.name)?;
        validate_price(product.price)?;

        let created = self
            .store
            .create_product(ProductUuid::new(), product.name, product.price.round_dp(2))
            .await?;

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        if let Some(name) = &update.name {
            validate_name(name)?;
        }

        if let Some(price) = update.price {
            validate_price(price)?;
        }

        self.store
            .update_product(product, update.name, update.price.map(|p| p.round_dp(2)))
            .await?
            .ok_or(ProductsServiceError::NotFound)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let rows_affected = self.store.delete_product(product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// List products, optionally filtered by a case-insensitive name search.
    async fn list_products(
        &self,
        search: Option<String>,
    ) -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Create a product with a generated identifier.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Partially update a product.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Delete a product. Blocked while any cart item references it.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::store::MemoryStore;

    use super::*;

    fn service_with_memory() -> (StoreProductsService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());

        (StoreProductsService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn create_and_get_product() -> TestResult {
        let (service, _store) = service_with_memory();

        let created = service
            .create_product(NewProduct {
                name: "Teapot".to_string(),
                price: Decimal::new(19_99, 2),
            })
            .await?;

        let fetched = service.get_product(created.uuid).await?;

        assert_eq!(fetched.name, "Teapot");
        assert_eq!(fetched.price, Decimal::new(19_99, 2));

        Ok(())
    }

    #[tokio::test]
    async fn create_product_rejects_empty_name() {
        let (service, _store) = service_with_memory();

        let result = service
            .create_product(NewProduct {
                name: "   ".to_string(),
                price: Decimal::new(10_00, 2),
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidName)),
            "expected InvalidName, got {result:?}"
        );
    }

    #[tokio::test]
    async fn create_product_rejects_negative_price() {
        let (service, _store) = service_with_memory();

        let result = service
            .create_product(NewProduct {
                name: "Teapot".to_string(),
                price: Decimal::new(-1, 2),
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidPrice)),
            "expected InvalidPrice, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_filters_case_insensitively() -> TestResult {
        let (service, store) = service_with_memory();

        store.seed_product("Stoneware Teapot", Decimal::new(19_99, 2));
        store.seed_product("Saucer", Decimal::new(3_50, 2));

        let all = service.list_products(None).await?;
        let matched = service.list_products(Some("teapot".to_string())).await?;

        assert_eq!(all.len(), 2);
        assert_eq!(matched.len(), 1);
        assert_eq!(
            matched.first().map(|p| p.name.as_str()),
            Some("Stoneware Teapot")
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_product_applies_partial_changes() -> TestResult {
        let (service, store) = service_with_memory();

        let product = store.seed_product("Teapot", Decimal::new(19_99, 2));

        let updated = service
            .update_product(
                product.uuid,
                ProductUpdate {
                    name: None,
                    price: Some(Decimal::new(19_99 - 5_00, 2)),
                },
            )
            .await?;

        assert_eq!(updated.name, "Teapot");
        assert_eq!(updated.price, Decimal::new(14_99, 2));

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_product_returns_not_found() {
        let (service, _store) = service_with_memory();

        let result = service
            .update_product(
                ProductUuid::new(),
                ProductUpdate {
                    name: Some("Teapot".to_string()),
                    price: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_unknown_product_returns_not_found() {
        let (service, _store) = service_with_memory();

        let result = service.delete_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_product_in_a_cart_is_blocked() -> TestResult {
        use crate::{
            auth::models::UserUuid,
            domain::carts::{CartsService, StoreCartsService, models::NewCartItem},
        };

        let (service, store) = service_with_memory();
        let carts = StoreCartsService::new(store.clone());
        let user = UserUuid::new();

        let product = store.seed_product("Teapot", Decimal::new(19_99, 2));
        store.seed_cart(user);

        carts
            .add_item(
                user,
                NewCartItem {
                    product_uuid: product.uuid,
                    quantity: 1,
                },
            )
            .await?;

        let result = service.delete_product(product.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::InUse)),
            "expected InUse, got {result:?}"
        );

        Ok(())
    }
}
