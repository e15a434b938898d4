//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db},
    domain::{
        carts::{CartsService, StoreCartsService},
        products::{ProductsService, StoreProductsService},
    },
    store::PgStore,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// The wired-up domain services the HTTP layer depends on.
#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
    pub products: Arc<dyn ProductsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let store = Arc::new(PgStore::new(Db::new(pool.clone())));

        Ok(Self {
            carts: Arc::new(StoreCartsService::new(store.clone())),
            products: Arc::new(StoreProductsService::new(store)),
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}
