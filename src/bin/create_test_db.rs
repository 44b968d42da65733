use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use time::{Duration, OffsetDateTime};

use expense_tracker::{NewTransaction, SQLiteTransactionStore, TransactionStore, TransactionType};

/// A utility for creating a test database for the expense tracker's REST API server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let store = SQLiteTransactionStore::open(output_path)?;

    println!("Creating test transactions...");

    let now = OffsetDateTime::now_utc();
    let samples = [
        ("Salary", 2500.0, TransactionType::Income, "salary", 30),
        ("Rent", 950.0, TransactionType::Expense, "housing", 28),
        ("Groceries", 84.37, TransactionType::Expense, "food", 6),
        ("Bus pass", 45.0, TransactionType::Expense, "transport", 3),
        ("Coffee", 5.0, TransactionType::Expense, "food", 0),
    ];

    for (title, amount, transaction_type, category, days_ago) in samples {
        store.insert(NewTransaction {
            title: title.to_owned(),
            amount,
            transaction_type,
            category: category.to_owned(),
            date: now - Duration::days(days_ago),
        })?;
    }

    println!("Created {} transactions.", store.count()?);

    store.close()?;

    println!("Success!");

    Ok(())
}
