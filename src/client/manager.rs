//! Drives a [ClientState] by calling the REST API.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::client::{ClientState, TransactionApi};

/// Loads and submits transactions for a [ClientState].
///
/// The state lock is never held while waiting on the server, so the state can
/// be read (e.g. to render a loading indicator) while a request is in flight.
/// At most one submission is in flight at a time; [ExpenseClient::refresh] may
/// run alongside a submission.
#[derive(Debug)]
pub struct ExpenseClient<A> {
    api: A,
    state: Arc<Mutex<ClientState>>,
}

impl<A: TransactionApi> ExpenseClient<A> {
    /// Create a client with an empty state that talks to the server through `api`.
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(ClientState::new())),
        }
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> ClientState {
        self.lock().clone()
    }

    /// Change the state directly, e.g. to edit the draft or the search query.
    pub fn update<R>(&self, f: impl FnOnce(&mut ClientState) -> R) -> R {
        f(&mut self.lock())
    }

    /// Replace the transactions with the server's list.
    ///
    /// On failure the current transactions are kept and an error is set.
    pub async fn refresh(&self) {
        self.lock().begin_refresh();

        let result = self.api.list().await;

        self.lock().finish_refresh(result);
    }

    /// Send the draft to the server and add the created transaction to the list.
    ///
    /// Does nothing if the draft is incomplete or another submission is in
    /// flight. Returns whether a request was sent.
    pub async fn submit(&self) -> bool {
        let Some(payload) = self.lock().begin_submit() else {
            tracing::debug!("Ignoring submit: draft incomplete or already submitting.");
            return false;
        };

        let result = self.api.create(&payload).await;

        self.lock().finish_submit(result);

        true
    }

    // The state is plain data that is valid after every method call, so a
    // panic elsewhere cannot leave it half-updated.
    fn lock(&self) -> MutexGuard<'_, ClientState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
