//! Transaction management for the expense tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the payload clients send to create one
//! - The store that persists transactions and the service on top of it
//! - Route handlers for creating and listing transactions

mod core;
mod create_endpoint;
mod list_endpoint;
pub(crate) mod payload;
pub(crate) mod service;
mod store;

pub use core::{NewTransaction, Transaction, TransactionType, create_transaction_table};
pub use create_endpoint::create_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
pub use payload::{AmountInput, CreateTransactionPayload};
pub use service::TransactionService;
pub use store::{SQLiteTransactionStore, TransactionStore};
