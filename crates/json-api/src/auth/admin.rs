//! Admin gate middleware.
//!
//! Hooped on catalog mutation routes, after the bearer middleware has
//! resolved the user. Non-admin users get 403.

use salvo::prelude::*;

use crate::extensions::*;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if let Err(error) = depot.admin_or_403() {
        res.render(error);

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        http::header::AUTHORIZATION,
        test::TestClient,
    };
    use serde_json::json;
    use storefront_app::auth::{
        MockAuthService,
        models::{AuthenticatedUser, UserUuid},
    };
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::{auth, products, test_helpers::state_with_auth};

    use super::*;

    #[salvo::handler]
    async fn ok_endpoint(res: &mut Response) {
        res.render("ok");
    }

    fn authenticated_service(auth: MockAuthService) -> Service {
        let router = Router::new()
            .hoop(inject(state_with_auth(auth)))
            .hoop(auth::middleware::handler)
            .push(
                Router::with_path("products")
                    .hoop(handler)
                    .post(products::create::handler)
                    .push(Router::new().get(ok_endpoint)),
            );

        Service::new(router)
    }

    fn mock_auth(is_admin: bool) -> MockAuthService {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().once().return_once(move |_| {
            Ok(AuthenticatedUser {
                uuid: UserUuid::from_uuid(Uuid::nil()),
                is_admin,
            })
        });

        auth
    }

    #[tokio::test]
    async fn test_non_admin_create_product_returns_403() -> TestResult {
        // The strict products mock behind state_with_auth expects no calls,
        // so this also proves the gate rejects before the service runs.
        let res = TestClient::post("http://example.com/products")
            .add_header(AUTHORIZATION, "Bearer user-token", true)
            .json(&json!({ "name": "Teapot", "price": "19.99" }))
            .send(&authenticated_service(mock_auth(false)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_passes_the_gate() -> TestResult {
        let res = TestClient::get("http://example.com/products")
            .add_header(AUTHORIZATION, "Bearer admin-token", true)
            .send(&authenticated_service(mock_auth(true)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_admin_flag_returns_403() -> TestResult {
        // No auth middleware in the chain, so the depot has no role at all.
        let router = Router::new().hoop(handler).push(Router::new().get(ok_endpoint));

        let res = TestClient::get("http://example.com")
            .send(&Service::new(router))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
