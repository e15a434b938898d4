//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront_app::domain::products::models::ProductUpdate;
use uuid::Uuid;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        handlers::{create::parse_price, get::ProductResponse},
    },
    state::State,
};

/// Update Product Request
///
/// Absent fields are left unchanged.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    /// The product name
    pub name: Option<String>,

    /// The unit price as a decimal string, e.g. `"19.99"`
    pub price: Option<String>,
}

/// Product Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductUpdatedResponse {
    pub message: String,

    pub product: ProductResponse,
}

/// Update Product Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    depot: &mut Depot,
) -> Result<Json<ProductUpdatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.user_uuid_or_401()?;

    let request = json.into_inner();

    let price = request.price.as_deref().map(parse_price).transpose()?;

    let product = state
        .app
        .products
        .update_product(
            product.into_inner().into(),
            ProductUpdate {
                name: request.name,
                price,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductUpdatedResponse {
        message: "Product updated successfully".to_string(),
        product: product.into(),
    }))
}
