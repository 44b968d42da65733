//! Database ID type definition.

/// Alias for the integer type used for transaction IDs.
///
/// IDs are assigned by the database and are never reused.
pub type TransactionId = i64;
