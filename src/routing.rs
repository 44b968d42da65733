//! Application router configuration.

use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, endpoints,
    diagnostics::{
        create_sample_transaction_endpoint, get_sample_transactions_endpoint, get_server_check,
    },
    logging::logging_middleware,
    not_found::get_404_not_found,
    transaction::{TransactionStore, create_transaction_endpoint, list_transactions_endpoint},
};

/// Return a router with all the app's routes.
pub fn build_router<S: TransactionStore>(state: AppState<S>) -> Router {
    Router::new()
        .route(endpoints::SERVER_CHECK, get(get_server_check))
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_endpoint::<S>).post(create_transaction_endpoint::<S>),
        )
        .route(
            endpoints::SAMPLE_TRANSACTION,
            post(create_sample_transaction_endpoint::<S>),
        )
        .route(
            endpoints::SAMPLE_TRANSACTIONS,
            get(get_sample_transactions_endpoint::<S>),
        )
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// Build the CORS layer that lets the browser client at `origins` call the API.
///
/// Origins that are not valid header values are logged and skipped.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(origin) => Some(origin),
            Err(error) => {
                tracing::error!("Ignoring invalid CORS origin {origin:?}: {error}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, Method, StatusCode, header};
    use axum_test::TestServer;
    use serde_json::json;

    use crate::{AppState, SQLiteTransactionStore, build_cors_layer, build_router, endpoints};

    fn get_test_server() -> TestServer {
        let store = SQLiteTransactionStore::open_in_memory().unwrap();
        let app = build_router(AppState::new(store))
            .layer(build_cors_layer(&["http://localhost:5173".to_owned()]));

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        let response = server.get("/api/nope").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({ "message": "Not found" }));
    }

    #[tokio::test]
    async fn allows_configured_origin() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS_API)
            .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:5173"))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://localhost:5173"))
        );
    }

    #[tokio::test]
    async fn does_not_allow_other_origins() {
        let server = get_test_server();

        let response = server
            .get(endpoints::TRANSACTIONS_API)
            .add_header(header::ORIGIN, HeaderValue::from_static("http://evil.example"))
            .await;

        response.assert_status_ok();
        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[tokio::test]
    async fn answers_preflight_requests() {
        let server = get_test_server();

        let response = server
            .method(Method::OPTIONS, endpoints::TRANSACTIONS_API)
            .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:5173"))
            .add_header(
                header::ACCESS_CONTROL_REQUEST_METHOD,
                HeaderValue::from_static("POST"),
            )
            .await;

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("http://localhost:5173"))
        );
    }
}
