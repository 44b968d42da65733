//! Mediates between the HTTP endpoints and the transaction store.

use time::OffsetDateTime;

use crate::{
    Error,
    transaction::{
        CreateTransactionPayload, NewTransaction, Transaction, TransactionStore, TransactionType,
    },
};

/// Creates and lists transactions on top of a [TransactionStore].
///
/// The store handle is injected once at start up, cloning the service clones
/// the handle, not the data.
#[derive(Debug, Clone)]
pub struct TransactionService<S> {
    store: S,
}

impl<S: TransactionStore> TransactionService<S> {
    /// Create a service that reads and writes transactions through `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the service and give back the store, e.g. to close it on shut down.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Validate `payload` and store it as a new transaction dated now.
    ///
    /// # Errors
    /// Returns a validation error (see [CreateTransactionPayload::parse]) if the
    /// payload is incomplete or malformed, in which case nothing is stored.
    /// Otherwise returns any error from the store.
    pub fn create(&self, payload: CreateTransactionPayload) -> Result<Transaction, Error> {
        tracing::debug!("Received transaction data: {payload:?}");

        let new_transaction = payload
            .parse(OffsetDateTime::now_utc())
            .inspect_err(|error| tracing::info!("Rejected new transaction: {error}"))?;

        self.insert(new_transaction)
    }

    /// Retrieve every transaction, most recent first.
    ///
    /// # Errors
    /// Returns any error from the store.
    pub fn list(&self) -> Result<Vec<Transaction>, Error> {
        let transactions = self
            .store
            .list_all()
            .inspect_err(|error| tracing::error!("Error fetching transactions: {error}"))?;

        tracing::debug!("Retrieved transactions: {transactions:?}");
        tracing::info!("Retrieved {} transactions", transactions.len());

        Ok(transactions)
    }

    /// Store a fixed income transaction dated now, for checking that writes work.
    ///
    /// # Errors
    /// Returns any error from the store.
    pub fn create_sample(&self) -> Result<Transaction, Error> {
        self.insert(NewTransaction {
            title: "Test Transaction".to_owned(),
            amount: 100.0,
            transaction_type: TransactionType::Income,
            category: "test".to_owned(),
            date: OffsetDateTime::now_utc(),
        })
    }

    /// Retrieve every transaction in the order they were stored.
    ///
    /// # Errors
    /// Returns any error from the store.
    pub fn list_unordered(&self) -> Result<Vec<Transaction>, Error> {
        self.store
            .list_unordered()
            .inspect_err(|error| tracing::error!("Error fetching transactions: {error}"))
    }

    fn insert(&self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        tracing::debug!("Created new transaction object: {new_transaction:?}");

        let transaction = self.store.insert(new_transaction)?;

        tracing::info!("Saved transaction {}", transaction.id);
        tracing::debug!("Saved transaction: {transaction:?}");

        Ok(transaction)
    }
}
