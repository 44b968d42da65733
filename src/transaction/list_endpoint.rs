//! Defines the endpoint for listing transactions.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    LIST_FAILED_MESSAGE, message_response,
    transaction::{TransactionService, TransactionStore},
};

/// A route handler that responds with every transaction, most recent first.
pub async fn list_transactions_endpoint<S: TransactionStore>(
    State(service): State<TransactionService<S>>,
) -> Response {
    match service.list() {
        Ok(transactions) => Json(transactions).into_response(),
        Err(_) => message_response(StatusCode::INTERNAL_SERVER_ERROR, LIST_FAILED_MESSAGE),
    }
}
