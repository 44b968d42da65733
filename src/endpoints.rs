//! The API endpoints URIs.

/// The route to access transactions.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route for checking that the server is up.
pub const SERVER_CHECK: &str = "/test";
/// The route for storing a fixed sample transaction.
pub const SAMPLE_TRANSACTION: &str = "/api/transactions/test/transaction";
/// The route for listing and counting transactions in storage order.
pub const SAMPLE_TRANSACTIONS: &str = "/api/transactions/test/transactions";
