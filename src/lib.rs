//! Expense Tracker is a small app for recording income and expenses and
//! keeping an eye on the running balance.
//!
//! This library provides:
//! - a JSON REST API for creating and listing transactions, backed by SQLite,
//! - a client-side state container (see [client]) that talks to that API and
//!   derives the balance and search results from the transactions it holds.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

pub mod client;
mod config;
mod database_id;
mod db;
mod diagnostics;
mod endpoints;
mod logging;
mod not_found;
mod routing;
mod transaction;

mod app_state;

pub use app_state::AppState;
pub use config::Config;
pub use database_id::TransactionId;
pub use logging::{LOG_BODY_LENGTH_LIMIT, REQUEST_BODY_SIZE_LIMIT, logging_middleware};
pub use routing::{build_cors_layer, build_router};
pub use transaction::{
    AmountInput, CreateTransactionPayload, NewTransaction, SQLiteTransactionStore, Transaction,
    TransactionService, TransactionStore, TransactionType,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The message sent to the client when a new transaction is missing fields.
pub const MISSING_FIELDS_MESSAGE: &str =
    "Please provide all required fields: title, amount, type, and category";

/// The message sent to the client when the transactions could not be listed.
pub const LIST_FAILED_MESSAGE: &str = "Error fetching transactions";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One or more of title, amount, type and category was missing or empty.
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields,

    /// The amount could not be read as a finite, non-negative number.
    ///
    /// Callers should pass in the offending value as it was received.
    #[error("\"{0}\" is not a valid amount, expected a non-negative number")]
    InvalidAmount(String),

    /// The transaction type was something other than "income" or "expense".
    #[error("\"{0}\" is not a valid transaction type, expected \"income\" or \"expense\"")]
    InvalidTransactionType(String),

    /// The request body could not be parsed as JSON.
    #[error("could not parse request body: {0}")]
    InvalidJson(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The request to the server could not be sent or its response could not
    /// be read.
    #[error("could not reach the server: {0}")]
    Transport(String),

    /// The server answered with a status code other than the expected one.
    #[error("the server responded with {status}: {message}")]
    UnexpectedStatus {
        /// The HTTP status code of the response.
        status: u16,
        /// The message from the response body, or the raw body if it had no message.
        message: String,
    },
}

impl Error {
    /// Whether the error was caused by bad input rather than a fault in the
    /// server or its storage.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::MissingFields
                | Error::InvalidAmount(_)
                | Error::InvalidTransactionType(_)
                | Error::InvalidJson(_)
        )
    }

    /// Convert the error into the response for a failed attempt to create a
    /// transaction.
    ///
    /// Any failure while creating a transaction is reported as a rejected
    /// request (400) with the error text as the message.
    pub(crate) fn into_create_response(self) -> Response {
        if !self.is_validation_error() {
            tracing::error!("could not create transaction: {self}");
        }

        message_response(StatusCode::BAD_REQUEST, &self.to_string())
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::Transport(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            error if error.is_validation_error() => {
                message_response(StatusCode::BAD_REQUEST, &error.to_string())
            }
            // Storage and other internal errors are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                message_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Sorry, something went wrong. Check the server logs for more details.",
                )
            }
        }
    }
}

/// A JSON response of the form `{"message": ...}`.
pub(crate) fn message_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{Error, MISSING_FIELDS_MESSAGE};

    #[test]
    fn missing_fields_displays_client_message() {
        assert_eq!(Error::MissingFields.to_string(), MISSING_FIELDS_MESSAGE);
    }

    #[test]
    fn validation_errors_are_bad_requests() {
        let response = Error::InvalidAmount("abc".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_errors_are_internal_server_errors() {
        let response = Error::DatabaseLockError.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn create_response_rejects_storage_errors_as_bad_requests() {
        let response = Error::DatabaseLockError.into_create_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
