//! Create Product Handler

use std::{str::FromStr, sync::Arc};

use rust_decimal::Decimal;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront_app::domain::products::models::NewProduct;

use crate::{
    extensions::*,
    products::{errors::into_status_error, handlers::get::ProductResponse},
    state::State,
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    /// The product name
    pub name: String,

    /// The unit price as a decimal string, e.g. `"19.99"`
    pub price: String,
}

/// Product Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductCreatedResponse {
    pub message: String,

    pub product: ProductResponse,
}

pub(crate) fn parse_price(price: &str) -> Result<Decimal, StatusError> {
    Decimal::from_str(price.trim()).map_err(|_parse| {
        StatusError::bad_request().brief("Price must be a valid non-negative amount")
    })
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.user_uuid_or_401()?;

    let request = json.into_inner();
    let price = parse_price(&request.price)?;

    let product = state
        .app
        .products
        .create_product(NewProduct {
            name: request.name,
            price,
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(ProductCreatedResponse {
        message: "Product created successfully".to_string(),
        product: product.into(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront_app::domain::products::{MockProductsService, ProductsServiceError};
    use testresult::TestResult;

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products").post(handler))
    }

    #[tokio::test]
    async fn test_create_product_returns_201() -> TestResult {
        let product = make_product("Teapot", "19.99");
        let uuid = product.uuid;

        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|new| new.name == "Teapot" && new.price == Decimal::new(19_99, 2))
            .return_once(move |_| Ok(product));

        let mut res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Teapot", "price": "19.99" }))
            .send(&make_service(products))
            .await;

        let location = res
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body: ProductCreatedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/products/{uuid}")));
        assert_eq!(body.product.name, "Teapot");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_unparseable_price_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products.expect_create_product().never();

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Teapot", "price": "not-a-number" }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_negative_price_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .withf(|new| new.price.is_sign_negative())
            .return_once(|_| Err(ProductsServiceError::InvalidPrice));

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "Teapot", "price": "-1.00" }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_product_empty_name_returns_400() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_create_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::InvalidName));

        let res = TestClient::post("http://example.com/products")
            .json(&json!({ "name": "", "price": "1.00" }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
