//! Defines the transaction store trait and its SQLite implementation.

use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::Connection;
use time::UtcOffset;

use crate::{
    Error,
    db::initialize,
    transaction::{NewTransaction, Transaction, core::map_transaction_row},
};

/// Handles the creation and retrieval of transactions.
pub trait TransactionStore: Clone + Send + Sync + 'static {
    /// Persist a new transaction and return it with its assigned ID.
    fn insert(&self, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve all transactions, most recent first.
    fn list_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Retrieve all transactions in the order they are stored.
    fn list_unordered(&self) -> Result<Vec<Transaction>, Error>;

    /// Get the total number of transactions in the store.
    fn count(&self) -> Result<u32, Error>;
}

/// Stores transactions in a SQLite database.
///
/// Cloning the store is cheap, all clones share the same connection.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a store for the SQLite `connection`.
    ///
    /// This function will initialize the database by adding the tables for the
    /// domain models if they do not exist yet.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the database cannot be initialized.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        initialize(&connection)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Open (or create) the database file at `path` and create a store for it.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the file cannot be opened or the
    /// database cannot be initialized.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let connection = Connection::open(path)?;

        Self::new(connection)
    }

    /// Create a store backed by a fresh in-memory database.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the database cannot be initialized.
    pub fn open_in_memory() -> Result<Self, Error> {
        Self::new(Connection::open_in_memory()?)
    }

    /// Close the database connection.
    ///
    /// The connection is only closed once every clone of the store has been
    /// dropped or closed, otherwise this just releases this handle.
    ///
    /// # Errors
    /// Returns an [Error::DatabaseLockError] if the lock was poisoned, or an
    /// [Error::SqlError] if SQLite could not close the connection.
    pub fn close(self) -> Result<(), Error> {
        let Ok(mutex) = Arc::try_unwrap(self.connection) else {
            tracing::debug!("Other handles to the database are still open, not closing yet.");
            return Ok(());
        };

        let connection = mutex.into_inner().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })?;

        connection.close().map_err(|(_, error)| Error::from(error))?;
        tracing::info!("Closed the database connection.");

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|error| {
            tracing::error!("could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// The date is stored in UTC.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the database lock is poisoned,
    /// - or [Error::SqlError] if there is some SQL error.
    fn insert(&self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        let transaction = connection
            .prepare(
                "INSERT INTO \"transaction\" (title, amount, type, category, date)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, title, amount, type, category, date",
            )?
            .query_row(
                (
                    transaction.title,
                    transaction.amount,
                    transaction.transaction_type,
                    transaction.category,
                    transaction.date.to_offset(UtcOffset::UTC),
                ),
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Retrieve all transactions ordered by date, most recent first.
    ///
    /// Transactions with the same date are ordered by ID, most recently
    /// inserted first.
    ///
    /// # Errors
    /// This function will return a [Error::DatabaseLockError] if the database
    /// lock is poisoned, or a [Error::SqlError] if there is a SQL error.
    fn list_all(&self) -> Result<Vec<Transaction>, Error> {
        self.lock()?
            .prepare(
                "SELECT id, title, amount, type, category, date FROM \"transaction\"
                 ORDER BY date DESC, id DESC",
            )?
            .query_map([], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Retrieve all transactions in insertion order.
    ///
    /// # Errors
    /// This function will return a [Error::DatabaseLockError] if the database
    /// lock is poisoned, or a [Error::SqlError] if there is a SQL error.
    fn list_unordered(&self) -> Result<Vec<Transaction>, Error> {
        self.lock()?
            .prepare("SELECT id, title, amount, type, category, date FROM \"transaction\"")?
            .query_map([], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Get the total number of transactions in the database.
    ///
    /// # Errors
    /// This function will return a [Error::DatabaseLockError] if the database
    /// lock is poisoned, or a [Error::SqlError] if there is a SQL error.
    fn count(&self) -> Result<u32, Error> {
        self.lock()?
            .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
                row.get(0)
            })
            .map_err(|error| error.into())
    }
}
