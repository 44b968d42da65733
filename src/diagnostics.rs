//! Endpoints for checking by hand that the server and its storage work.
//!
//! These are not used by the client.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    Error,
    transaction::{TransactionService, TransactionStore},
};

/// Respond with a fixed message to show the server is running.
pub async fn get_server_check() -> Response {
    Json(json!({ "message": "Server is working" })).into_response()
}

/// Store the sample transaction and respond with it.
pub async fn create_sample_transaction_endpoint<S: TransactionStore>(
    State(service): State<TransactionService<S>>,
) -> Response {
    match service.create_sample() {
        Ok(transaction) => Json(transaction).into_response(),
        Err(error) => diagnostic_error_response(error),
    }
}

/// Respond with the number of transactions and every transaction in storage order.
pub async fn get_sample_transactions_endpoint<S: TransactionStore>(
    State(service): State<TransactionService<S>>,
) -> Response {
    match service.list_unordered() {
        Ok(transactions) => Json(json!({
            "count": transactions.len(),
            "transactions": transactions,
        }))
        .into_response(),
        Err(error) => diagnostic_error_response(error),
    }
}

fn diagnostic_error_response(error: Error) -> Response {
    tracing::error!("Diagnostic request failed: {error}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": error.to_string() })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        AppState, build_router, endpoints,
        transaction::{
            SQLiteTransactionStore, Transaction, TransactionType,
            service::test_utils::UnavailableStore,
        },
    };

    fn get_test_server() -> TestServer {
        let store = SQLiteTransactionStore::open_in_memory().unwrap();
        TestServer::try_new(build_router(AppState::new(store))).unwrap()
    }

    #[tokio::test]
    async fn server_check_responds_with_message() {
        let server = get_test_server();

        let response = server.get(endpoints::SERVER_CHECK).await;

        response.assert_status_ok();
        response.assert_json(&json!({ "message": "Server is working" }));
    }

    #[tokio::test]
    async fn sample_transaction_is_stored_and_listed() {
        let server = get_test_server();

        let response = server.post(endpoints::SAMPLE_TRANSACTION).await;

        response.assert_status_ok();
        let sample = response.json::<Transaction>();
        assert_eq!(sample.title, "Test Transaction");
        assert_eq!(sample.transaction_type, TransactionType::Income);

        let response = server.get(endpoints::SAMPLE_TRANSACTIONS).await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["count"], json!(1));
        let transactions: Vec<Transaction> =
            serde_json::from_value(body["transactions"].clone()).unwrap();
        assert_eq!(transactions, vec![sample]);
    }

    #[tokio::test]
    async fn diagnostic_failures_report_error() {
        let server = TestServer::try_new(build_router(AppState::new(UnavailableStore))).unwrap();

        let response = server.get(endpoints::SAMPLE_TRANSACTIONS).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        response.assert_json(&json!({ "error": "could not acquire the database lock" }));
    }
}
