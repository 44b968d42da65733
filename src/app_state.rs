//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;

use crate::transaction::{TransactionService, TransactionStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<S> {
    /// Creates and lists transactions.
    pub transaction_service: TransactionService<S>,
}

impl<S: TransactionStore> AppState<S> {
    /// Create a new [AppState] around an already opened transaction `store`.
    pub fn new(store: S) -> Self {
        Self {
            transaction_service: TransactionService::new(store),
        }
    }
}

impl<S: Clone> FromRef<AppState<S>> for TransactionService<S> {
    fn from_ref(state: &AppState<S>) -> Self {
        state.transaction_service.clone()
    }
}
