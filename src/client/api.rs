//! REST API client for the transaction endpoints.

use std::future::Future;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    Error, endpoints,
    transaction::{CreateTransactionPayload, Transaction},
};

/// The origin the API is served from when running locally.
pub const DEFAULT_API_ORIGIN: &str = "http://localhost:5000";

/// The operations the client needs from the server.
pub trait TransactionApi: Send + Sync {
    /// Fetch every transaction, most recent first.
    fn list(&self) -> impl Future<Output = Result<Vec<Transaction>, Error>> + Send;

    /// Ask the server to store a new transaction, returning the stored record.
    fn create(
        &self,
        payload: &CreateTransactionPayload,
    ) -> impl Future<Output = Result<Transaction, Error>> + Send;
}

/// Calls the REST API over HTTP using [`reqwest`].
#[derive(Debug, Clone)]
pub struct HttpTransactionApi {
    client: reqwest::Client,
    api_origin: String,
}

impl HttpTransactionApi {
    /// Create an API client for the server at `api_origin`, e.g. `http://localhost:5000`.
    pub fn new(api_origin: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_origin)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_origin: impl Into<String>) -> Self {
        let api_origin: String = api_origin.into();

        Self {
            client,
            api_origin: api_origin.trim_end_matches('/').to_owned(),
        }
    }

    fn transactions_url(&self) -> String {
        format!("{}{}", self.api_origin, endpoints::TRANSACTIONS_API)
    }

    /// Read the body of a successful response as JSON, or turn an
    /// unsuccessful response into an [Error::UnexpectedStatus].
    async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, Error> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();

        Err(Error::UnexpectedStatus {
            status: status.as_u16(),
            message: message_from_body(body),
        })
    }
}

impl Default for HttpTransactionApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_ORIGIN)
    }
}

impl TransactionApi for HttpTransactionApi {
    async fn list(&self) -> Result<Vec<Transaction>, Error> {
        let response = self.client.get(self.transactions_url()).send().await?;

        Self::parse_response(response).await
    }

    async fn create(&self, payload: &CreateTransactionPayload) -> Result<Transaction, Error> {
        let response = self
            .client
            .post(self.transactions_url())
            .json(payload)
            .send()
            .await?;

        if response.status() != StatusCode::CREATED && response.status().is_success() {
            tracing::warn!(
                "Expected {} when creating a transaction, got {}",
                StatusCode::CREATED,
                response.status()
            );
        }

        Self::parse_response(response).await
    }
}

/// The `message` from a JSON error body, or the whole body if it has none.
fn message_from_body(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| value.get("message")?.as_str().map(str::to_owned))
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use tokio::net::TcpListener;

    use crate::{
        AppState, Error, MISSING_FIELDS_MESSAGE, build_router,
        client::{HttpTransactionApi, TransactionApi},
        transaction::{AmountInput, CreateTransactionPayload, SQLiteTransactionStore},
    };

    use super::message_from_body;

    async fn spawn_server() -> SocketAddr {
        let store = SQLiteTransactionStore::open_in_memory().unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, build_router(AppState::new(store)))
                .await
                .unwrap();
        });

        address
    }

    fn coffee() -> CreateTransactionPayload {
        CreateTransactionPayload {
            title: Some("Coffee".to_owned()),
            amount: Some(AmountInput::Number(5.0)),
            transaction_type: Some("expense".to_owned()),
            category: Some("food".to_owned()),
            date: None,
        }
    }

    #[tokio::test]
    async fn creates_and_lists_over_http() {
        let address = spawn_server().await;
        let api = HttpTransactionApi::new(format!("http://{address}/"));

        let created = api.create(&coffee()).await.expect("Could not create");
        let listed = api.list().await.expect("Could not list");

        assert_eq!(created.title, "Coffee");
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn rejected_create_carries_server_message() {
        let address = spawn_server().await;
        let api = HttpTransactionApi::new(format!("http://{address}"));
        let mut payload = coffee();
        payload.title = None;

        let result = api.create(&payload).await;

        match result {
            Err(Error::UnexpectedStatus { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, MISSING_FIELDS_MESSAGE);
            }
            other => panic!("want unexpected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);
        let api = HttpTransactionApi::new(format!("http://{address}"));

        let result = api.list().await;

        assert!(matches!(result, Err(Error::Transport(_))), "got {result:?}");
    }

    #[test]
    fn message_from_json_body() {
        assert_eq!(
            message_from_body(r#"{"message": "Error fetching transactions"}"#.to_owned()),
            "Error fetching transactions"
        );
    }

    #[test]
    fn message_from_plain_body() {
        assert_eq!(message_from_body("Bad Gateway".to_owned()), "Bad Gateway");
    }
}
