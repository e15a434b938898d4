//! Postgres persistence gateway.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Row, postgres::PgRow, query, query_as};

use crate::{
    auth::models::UserUuid,
    database::Db,
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

const LIST_PRODUCTS_SQL: &str = "\
    SELECT uuid, name, price, created_at, updated_at FROM products \
    WHERE $1::text IS NULL OR name ILIKE '%' || $1 || '%' \
    ORDER BY created_at DESC";

const FIND_PRODUCT_SQL: &str =
    "SELECT uuid, name, price, created_at, updated_at FROM products WHERE uuid = $1";

const CREATE_PRODUCT_SQL: &str = "\
    INSERT INTO products (uuid, name, price) VALUES ($1, $2, $3) \
    RETURNING uuid, name, price, created_at, updated_at";

const UPDATE_PRODUCT_SQL: &str = "\
    UPDATE products SET \
        name = COALESCE($2, name), \
        price = COALESCE($3, price), \
        updated_at = now() \
    WHERE uuid = $1 \
    RETURNING uuid, name, price, created_at, updated_at";

const DELETE_PRODUCT_SQL: &str = "DELETE FROM products WHERE uuid = $1";

const FIND_CART_BY_USER_SQL: &str =
    "SELECT uuid, user_uuid, created_at, updated_at FROM carts WHERE user_uuid = $1";

const FIND_ITEM_WITH_CART_SQL: &str = "\
    SELECT \
        ci.uuid, ci.cart_uuid, ci.product_uuid, ci.quantity, \
        ci.created_at, ci.updated_at, \
        c.user_uuid AS cart_user_uuid, \
        c.created_at AS cart_created_at, c.updated_at AS cart_updated_at \
    FROM cart_items ci \
    JOIN carts c ON c.uuid = ci.cart_uuid \
    WHERE ci.uuid = $1";

// The unique (cart_uuid, product_uuid) index makes merge-or-create a single
// atomic statement; concurrent adds can never produce two rows.
const UPSERT_ITEM_SQL: &str = "\
    INSERT INTO cart_items (uuid, cart_uuid, product_uuid, quantity) \
    VALUES ($1, $2, $3, $4) \
    ON CONFLICT (cart_uuid, product_uuid) DO UPDATE SET \
        quantity = cart_items.quantity + EXCLUDED.quantity, \
        updated_at = now() \
    RETURNING uuid, cart_uuid, product_uuid, quantity, created_at, updated_at";

const DELETE_ITEM_SQL: &str = "DELETE FROM cart_items WHERE uuid = $1";

const DELETE_ITEMS_BY_CART_SQL: &str = "DELETE FROM cart_items WHERE cart_uuid = $1";

const LIST_ITEMS_SQL: &str = "\
    SELECT \
        ci.uuid, ci.product_uuid, ci.quantity, ci.created_at, ci.updated_at, \
        p.name AS product_name, p.price AS unit_price \
    FROM cart_items ci \
    JOIN products p ON p.uuid = ci.product_uuid \
    WHERE ci.cart_uuid = $1 \
    ORDER BY ci.created_at";

/// Production persistence gateway backed by Postgres.
#[derive(Debug, Clone)]
pub struct PgStore {
    db: Db,
}

impl PgStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartStore for PgStore {
    async fn find_product(&self, product: ProductUuid) -> Result<Option<Product>, StoreError> {
        let product = query_as::<_, Product>(FIND_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_optional(self.db.pool())
            .await?;

        Ok(product)
    }

    async fn find_cart_by_user(&self, user: UserUuid) -> Result<Option<Cart>, StoreError> {
        let cart = query_as::<_, Cart>(FIND_CART_BY_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(self.db.pool())
            .await?;

        Ok(cart)
    }

    async fn find_item_with_cart(
        &self,
        item: CartItemUuid,
    ) -> Result<Option<(CartItem, Cart)>, StoreError> {
        let Some(row) = query(FIND_ITEM_WITH_CART_SQL)
            .bind(item.into_uuid())
            .fetch_optional(self.db.pool())
            .await?
        else {
            return Ok(None);
        };

        let item = CartItem::from_row(&row).map_err(StoreError::Sql)?;

        let cart = Cart {
            uuid: item.cart_uuid,
            user_uuid: UserUuid::from_uuid(row.try_get("cart_user_uuid").map_err(StoreError::Sql)?),
            created_at: row
                .try_get::<SqlxTimestamp, _>("cart_created_at")
                .map_err(StoreError::Sql)?
                .to_jiff(),
            updated_at: row
                .try_get::<SqlxTimestamp, _>("cart_updated_at")
                .map_err(StoreError::Sql)?
                .to_jiff(),
        };

        Ok(Some((item, cart)))
    }

    async fn upsert_item(
        &self,
        cart: CartUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartItem, StoreError> {
        let quantity = i32::try_from(quantity).map_err(|_overflow| StoreError::InvalidData)?;

        let item = query_as::<_, CartItem>(UPSERT_ITEM_SQL)
            .bind(CartItemUuid::new().into_uuid())
            .bind(cart.into_uuid())
            .bind(product.into_uuid())
            .bind(quantity)
            .fetch_one(self.db.pool())
            .await?;

        Ok(item)
    }

    async fn delete_item(&self, item: CartItemUuid) -> Result<u64, StoreError> {
        let rows_affected = query(DELETE_ITEM_SQL)
            .bind(item.into_uuid())
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn delete_items_by_cart(&self, cart: CartUuid) -> Result<u64, StoreError> {
        let rows_affected = query(DELETE_ITEMS_BY_CART_SQL)
            .bind(cart.into_uuid())
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn list_items(&self, cart: CartUuid) -> Result<Vec<CartItemDetails>, StoreError> {
        let items = query_as::<_, CartItemDetails>(LIST_ITEMS_SQL)
            .bind(cart.into_uuid())
            .fetch_all(self.db.pool())
            .await?;

        Ok(items)
    }
}

#[async_trait]
impl ProductStore for PgStore {
    async fn list_products(&self, search: Option<String>) -> Result<Vec<Product>, StoreError> {
        let products = query_as::<_, Product>(LIST_PRODUCTS_SQL)
            .bind(search)
            .fetch_all(self.db.pool())
            .await?;

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
        let product = query_as::<_, Product>(CREATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(name)
            .bind(price)
            .fetch_one(self.db.pool())
            .await?;

        Ok(product)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        name: Option<String>,
        price: Option<Decimal>,
    ) -> Result<Option<Product>, StoreError> {
        let product = query_as::<_, Product>(UPDATE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .bind(name)
            .bind(price)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(product)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<u64, StoreError> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_uuid())
            .execute(self.db.pool())
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartItem {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            cart_uuid: CartUuid::from_uuid(row.try_get("cart_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_quantity(row, "quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for CartItemDetails {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartItemUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            product_name: row.try_get("product_name")?,
            unit_price: row.try_get("unit_price")?,
            quantity: try_get_quantity(row, "quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

fn try_get_quantity(row: &PgRow, col: &str) -> Result<u32, sqlx::Error> {
    let quantity_i32: i32 = row.try_get(col)?;

    u32::try_from(quantity_i32).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}
