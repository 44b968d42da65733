//! The client side of the expense tracker.
//!
//! [ClientState] holds the transactions a user is looking at, the form they
//! are filling in and any error to show them. It derives the balance and
//! search results on demand, so it can be tested without anything to render.
//! [ExpenseClient] drives a [ClientState] by calling the REST API through a
//! [TransactionApi].

mod api;
mod currency;
mod manager;
mod state;

pub use api::{DEFAULT_API_ORIGIN, HttpTransactionApi, TransactionApi};
pub use currency::format_currency;
pub use manager::ExpenseClient;
pub use state::{ClientState, Draft, LOAD_FAILED_MESSAGE, SUBMIT_FAILED_MESSAGE};
