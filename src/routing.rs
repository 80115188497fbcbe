//! Application router configuration.

use axum::{
    Router,
    http::{
        HeaderName,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use crate::{
    AppState, endpoints, logging::logging_middleware, reminder::create_reminder_endpoint,
    transaction::{create_transaction_endpoint, list_transactions_endpoint},
};

/// Return a router with all the app's routes.
///
/// Every route carries the permissive cross-origin headers required for
/// browser-origin access, and pre-flight OPTIONS requests are answered by the
/// CORS layer before any handler logic runs.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ]);

    Router::new()
        .route(
            endpoints::CREATE_TRANSACTION,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::FETCH_TRANSACTIONS,
            get(list_transactions_endpoint).post(list_transactions_endpoint),
        )
        .route(endpoints::CREATE_REMINDER, post(create_reminder_endpoint))
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod cors_tests {
    use std::sync::Arc;

    use axum::http::Method;
    use axum_test::TestServer;

    use crate::{AppState, build_router, endpoints, notion::test_store::TestStore};

    fn test_server() -> TestServer {
        let state = AppState::new(Arc::new(TestStore::default()));
        TestServer::new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn preflight_is_answered_before_handler_logic() {
        let server = test_server();

        let response = server
            .method(Method::OPTIONS, endpoints::CREATE_TRANSACTION)
            .add_header("origin", "http://localhost:5173")
            .add_header("access-control-request-method", "POST")
            .add_header("access-control-request-headers", "content-type")
            .await;

        response.assert_status_ok();
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .map(|value| value.to_str().unwrap()),
            Some("*")
        );
        let allowed_headers = response
            .headers()
            .get("access-control-allow-headers")
            .expect("preflight response is missing allowed headers")
            .to_str()
            .unwrap()
            .to_lowercase();
        for header in ["authorization", "x-client-info", "apikey", "content-type"] {
            assert!(
                allowed_headers.contains(header),
                "{header} missing from {allowed_headers}"
            );
        }
        response.assert_text("");
    }

    #[tokio::test]
    async fn substantive_responses_carry_the_cors_headers() {
        let server = test_server();

        let response = server
            .get(endpoints::FETCH_TRANSACTIONS)
            .add_header("origin", "http://localhost:5173")
            .await;

        response.assert_status_ok();
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .map(|value| value.to_str().unwrap()),
            Some("*")
        );
    }
}
