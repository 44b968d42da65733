//! Sets up the application's SQLite database.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::transaction::create_transaction_table;

/// Create the tables for the domain models if they do not already exist.
///
/// The tables are created inside a single exclusive transaction, so the
/// database is either fully initialized or left untouched.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is some other SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
