//! Test helpers.

use std::{str::FromStr, sync::Arc};

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use storefront_app::{
    auth::{MockAuthService, models::UserUuid},
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            models::{CartItemDetails, CartItemUuid, CartUuid, CartView},
        },
        products::{
            MockProductsService,
            models::{Product, ProductUuid},
        },
    },
};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    depot.insert_is_admin(true);
    ctrl.call_next(req, depot, res).await;
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_remove_item().never();
    carts.expect_clear_cart().never();

    carts
}

fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_authenticate_bearer().never();

    auth
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        carts: Arc::new(carts),
        products: Arc::new(strict_products_mock()),
        auth: Arc::new(strict_auth_mock()),
    }))
}

pub(crate) fn state_with_products(products: MockProductsService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        carts: Arc::new(strict_carts_mock()),
        products: Arc::new(products),
        auth: Arc::new(strict_auth_mock()),
    }))
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Arc::new(State::new(AppContext {
        carts: Arc::new(strict_carts_mock()),
        products: Arc::new(strict_products_mock()),
        auth: Arc::new(auth),
    }))
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_carts(carts)))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_products(products)))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn make_product(name: &str, price: &str) -> Product {
    let now = Timestamp::now();

    Product {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        price: Decimal::from_str(price).unwrap(),
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn make_cart_item_details(quantity: u32) -> CartItemDetails {
    let now = Timestamp::now();

    CartItemDetails {
        uuid: CartItemUuid::new(),
        product_uuid: ProductUuid::new(),
        product_name: "Teapot".to_string(),
        unit_price: Decimal::new(19_99, 2),
        quantity,
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn make_cart_view() -> CartView {
    let item = make_cart_item_details(2);
    let total = item.line_total();

    CartView {
        uuid: CartUuid::new(),
        items: vec![item],
        total,
        item_count: 1,
    }
}
