//! The client-side state container and the views derived from it.

use serde_json::json;
use time::OffsetDateTime;

use crate::{
    Error,
    client::format_currency,
    transaction::{AmountInput, CreateTransactionPayload, Transaction, TransactionType},
};

/// The error shown to the user when the transactions could not be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load transactions. Please try again.";

/// The error shown to the user when a new transaction could not be added.
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to add transaction. Please try again.";

/// The new transaction form as the user is filling it in.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    /// The title as typed.
    pub title: String,
    /// The amount as typed, parsed when the draft is submitted.
    pub amount: String,
    /// Whether the new transaction is income or an expense.
    pub transaction_type: TransactionType,
    /// The selected category.
    pub category: String,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            title: String::new(),
            amount: String::new(),
            transaction_type: TransactionType::Expense,
            category: "general".to_owned(),
        }
    }
}

impl Draft {
    fn to_payload(&self, today: time::Date) -> CreateTransactionPayload {
        let amount = match self.amount.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() => AmountInput::Number(amount),
            // Let the server decide what to do with amounts we cannot read.
            _ => AmountInput::Text(self.amount.clone()),
        };

        CreateTransactionPayload {
            title: Some(self.title.clone()),
            amount: Some(amount),
            transaction_type: Some(self.transaction_type.to_string()),
            category: Some(self.category.clone()),
            date: Some(json!(today.to_string())),
        }
    }
}

/// Everything the client knows about the user's transactions.
///
/// The list is only changed by [ClientState::finish_refresh] (replaced) and
/// [ClientState::finish_submit] (prepended), so derived views like
/// [ClientState::balance] always reflect what the user sees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    transactions: Vec<Transaction>,
    error: Option<String>,
    is_loading: bool,
    is_submitting: bool,
    /// The new transaction form.
    pub draft: Draft,
    /// The text the user is searching for.
    pub search_query: String,
}

impl ClientState {
    /// Create an empty state with a default draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// The transactions, most recent first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The error message to show the user, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Hide the error message.
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Whether the transactions are being (re)loaded.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Whether a new transaction is being sent to the server.
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Mark the start of loading the transactions.
    pub fn begin_refresh(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// Apply the result of loading the transactions.
    ///
    /// On failure the previously loaded transactions are kept.
    pub fn finish_refresh(&mut self, result: Result<Vec<Transaction>, Error>) {
        match result {
            Ok(transactions) => self.transactions = transactions,
            Err(error) => {
                tracing::error!("Error fetching transactions: {error}");
                self.error = Some(LOAD_FAILED_MESSAGE.to_owned());
            }
        }

        self.is_loading = false;
    }

    /// Mark the start of submitting the draft and build the request for it.
    ///
    /// Returns `None`, changing nothing, if the title or amount is empty or if
    /// another submission has not finished yet.
    pub fn begin_submit(&mut self) -> Option<CreateTransactionPayload> {
        if self.draft.title.is_empty() || self.draft.amount.is_empty() || self.is_submitting {
            return None;
        }

        self.is_submitting = true;
        self.error = None;

        Some(self.draft.to_payload(OffsetDateTime::now_utc().date()))
    }

    /// Apply the result of submitting the draft.
    ///
    /// On success the new transaction goes to the front of the list and the
    /// draft title and amount are cleared. On failure the list and draft are
    /// left as they were.
    pub fn finish_submit(&mut self, result: Result<Transaction, Error>) {
        match result {
            Ok(transaction) => {
                self.transactions.insert(0, transaction);
                self.draft.title.clear();
                self.draft.amount.clear();
            }
            Err(error) => {
                tracing::error!("Error adding transaction: {error}");
                self.error = Some(SUBMIT_FAILED_MESSAGE.to_owned());
            }
        }

        self.is_submitting = false;
    }

    /// Total income minus total expenses over the loaded transactions.
    pub fn balance(&self) -> f64 {
        self.transactions
            .iter()
            .map(Transaction::signed_amount)
            .sum()
    }

    /// The balance formatted as dollars, e.g. "-$40.00".
    pub fn balance_display(&self) -> String {
        format_currency(self.balance())
    }

    /// The transactions whose title or category contains `query`, ignoring case.
    ///
    /// An empty query matches every transaction.
    pub fn filtered(&self, query: &str) -> Vec<&Transaction> {
        let query = query.to_lowercase();

        self.transactions
            .iter()
            .filter(|transaction| {
                transaction.title.to_lowercase().contains(&query)
                    || transaction.category.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// The transactions matching [ClientState::search_query].
    pub fn filtered_by_search(&self) -> Vec<&Transaction> {
        self.filtered(&self.search_query)
    }
}
