//! Defines the core data models and table schema for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// New transactions are described with a [NewTransaction] and get their ID
/// when they are inserted into a [TransactionStore](super::TransactionStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A short label for what the transaction was for, e.g. "Coffee".
    pub title: String,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Always zero or positive, whether money was spent or earned is given by
    /// [Transaction::transaction_type].
    pub amount: f64,
    /// Whether money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// A free-text label for grouping transactions, e.g. "food".
    pub category: String,
    /// When the transaction was recorded by the server.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl Transaction {
    /// The amount with the sign implied by the transaction type, i.e.
    /// negative for expenses.
    pub fn signed_amount(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// A validated transaction that has not been stored yet.
///
/// Create one from client input with
/// [CreateTransactionPayload::parse](super::CreateTransactionPayload::parse).
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// A short, non-empty label for the transaction.
    pub title: String,
    /// A finite, non-negative amount of money.
    pub amount: f64,
    /// Whether money was earned or spent.
    pub transaction_type: TransactionType,
    /// A non-empty, free-text category.
    pub category: String,
    /// The time the server received the transaction.
    pub date: OffsetDateTime,
}

/// The direction money moved in a [Transaction].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money was earned.
    Income,
    /// Money was spent.
    #[default]
    Expense,
}

impl TransactionType {
    /// The name used for the type on the wire and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::InvalidTransactionType(other.to_owned())),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                amount REAL NOT NULL,
                type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
                category TEXT NOT NULL,
                date TEXT NOT NULL
                )",
        (),
    )?;

    // Used for listing transactions by recency.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let amount = row.get(2)?;
    let transaction_type = row.get(3)?;
    let category = row.get(4)?;
    let date = row.get(5)?;

    Ok(Transaction {
        id,
        title,
        amount,
        transaction_type,
        category,
        date,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use crate::{
        Error,
        transaction::{Transaction, TransactionType},
    };

    #[test]
    fn serializes_type_and_date_for_clients() {
        let transaction = Transaction {
            id: 1,
            title: "Coffee".to_owned(),
            amount: 5.0,
            transaction_type: TransactionType::Expense,
            category: "food".to_owned(),
            date: datetime!(2025-01-15 08:30:00 UTC),
        };

        let value = serde_json::to_value(&transaction).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 1,
                "title": "Coffee",
                "amount": 5.0,
                "type": "expense",
                "category": "food",
                "date": "2025-01-15T08:30:00Z",
            })
        );
    }

    #[test]
    fn parses_known_types() {
        assert_eq!("income".parse::<TransactionType>().unwrap(), TransactionType::Income);
        assert_eq!("expense".parse::<TransactionType>().unwrap(), TransactionType::Expense);
    }

    #[test]
    fn rejects_unknown_type() {
        let result = "refund".parse::<TransactionType>();

        assert!(
            matches!(result, Err(Error::InvalidTransactionType(ref name)) if name == "refund"),
            "got {result:?}"
        );
    }

    #[test]
    fn signed_amount_is_negative_for_expenses() {
        let mut transaction = Transaction {
            id: 1,
            title: "Rent".to_owned(),
            amount: 1200.0,
            transaction_type: TransactionType::Expense,
            category: "housing".to_owned(),
            date: datetime!(2025-01-01 00:00:00 UTC),
        };

        assert_eq!(transaction.signed_amount(), -1200.0);

        transaction.transaction_type = TransactionType::Income;
        assert_eq!(transaction.signed_amount(), 1200.0);
    }
}
