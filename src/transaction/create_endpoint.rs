//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    Error,
    transaction::{CreateTransactionPayload, TransactionService, TransactionStore},
};

/// A route handler for creating a new transaction.
///
/// Responds with 201 and the stored transaction on success. Any failure,
/// including a body that is not valid JSON, is a 400 with a `message`.
pub async fn create_transaction_endpoint<S: TransactionStore>(
    State(service): State<TransactionService<S>>,
    payload: Result<Json<CreateTransactionPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::info!("Rejected malformed transaction body: {rejection}");
            return Error::InvalidJson(rejection.body_text()).into_create_response();
        }
    };

    match service.create(payload) {
        Ok(transaction) => (StatusCode::CREATED, Json(transaction)).into_response(),
        Err(error) => error.into_create_response(),
    }
}
