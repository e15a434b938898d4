//! List Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    products::{errors::into_status_error, handlers::get::ProductResponse},
    state::State,
};

/// List Products Handler
///
/// Returns all products, optionally filtered by a case-insensitive name
/// search.
#[endpoint(
    tags("products"),
    summary = "List Products",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<Vec<ProductResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.user_uuid_or_401()?;

    let products = state
        .app
        .products
        .list_products(search.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::domain::products::MockProductsService;
    use testresult::TestResult;

    use crate::test_helpers::{make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_all_products() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|search| search.is_none())
            .return_once(|_| {
                Ok(vec![
                    make_product("Teapot", "19.99"),
                    make_product("Saucer", "3.50"),
                ])
            });

        let mut res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        let body: Vec<ProductResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_forwards_search_query() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|search| search.as_deref() == Some("teapot"))
            .return_once(|_| Ok(vec![make_product("Teapot", "19.99")]));

        let res = TestClient::get("http://example.com/products?search=teapot")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
