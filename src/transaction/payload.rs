//! Parsing and validation of the JSON body used to create a transaction.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    transaction::{NewTransaction, TransactionType},
};

/// The JSON body for creating a transaction, as sent by a client.
///
/// Every field is optional at this stage so that a missing field can be
/// reported as [Error::MissingFields] instead of a generic parsing error.
/// Use [CreateTransactionPayload::parse] to turn it into a [NewTransaction].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionPayload {
    /// A short label for the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The amount, either as a JSON number or as a numeric string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<AmountInput>,
    /// Either "income" or "expense".
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<String>,
    /// A free-text category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// The date the client thinks the transaction happened.
    ///
    /// Accepted for compatibility with clients that send it, but never used:
    /// the server always records the time it received the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<serde_json::Value>,
}

/// An amount as it may appear in a request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A JSON number, e.g. `12.5`.
    Number(f64),
    /// A JSON string holding a number, e.g. `"12.5"`.
    Text(String),
}

impl AmountInput {
    fn is_blank(&self) -> bool {
        match self {
            AmountInput::Number(_) => false,
            AmountInput::Text(text) => text.trim().is_empty(),
        }
    }

    /// Read the amount as a finite, non-negative number.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the amount is not a number, is not
    /// finite, or is negative.
    pub fn to_amount(&self) -> Result<f64, Error> {
        let amount = match self {
            AmountInput::Number(number) => *number,
            AmountInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| Error::InvalidAmount(text.clone()))?,
        };

        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidAmount(amount.to_string()));
        }

        Ok(amount)
    }
}

fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.is_empty())
}

impl CreateTransactionPayload {
    /// Validate the payload and produce a [NewTransaction] recorded at `date`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingFields] if any of title, amount, type or category is
    ///   missing or empty,
    /// - [Error::InvalidAmount] if the amount is not a finite, non-negative number,
    /// - or [Error::InvalidTransactionType] if the type is not "income" or "expense".
    pub fn parse(self, date: OffsetDateTime) -> Result<NewTransaction, Error> {
        let amount_present = self
            .amount
            .as_ref()
            .is_some_and(|amount| !amount.is_blank());

        if !is_present(&self.title)
            || !amount_present
            || !is_present(&self.transaction_type)
            || !is_present(&self.category)
        {
            return Err(Error::MissingFields);
        }

        let (Some(title), Some(amount), Some(transaction_type), Some(category)) = (
            self.title,
            self.amount,
            self.transaction_type,
            self.category,
        ) else {
            return Err(Error::MissingFields);
        };

        Ok(NewTransaction {
            title,
            amount: amount.to_amount()?,
            transaction_type: transaction_type.parse::<TransactionType>()?,
            category,
            date,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::datetime;

    use crate::{
        Error,
        transaction::{CreateTransactionPayload, TransactionType},
    };

    fn parse_json(value: serde_json::Value) -> Result<crate::NewTransaction, Error> {
        let payload: CreateTransactionPayload =
            serde_json::from_value(value).expect("Could not deserialize payload");

        payload.parse(datetime!(2025-03-01 10:00:00 UTC))
    }

    #[test]
    fn parses_complete_payload() {
        let transaction = parse_json(json!({
            "title": "Coffee",
            "amount": 5,
            "type": "expense",
            "category": "food",
        }))
        .unwrap();

        assert_eq!(transaction.title, "Coffee");
        assert_eq!(transaction.amount, 5.0);
        assert_eq!(transaction.transaction_type, TransactionType::Expense);
        assert_eq!(transaction.category, "food");
        assert_eq!(transaction.date, datetime!(2025-03-01 10:00:00 UTC));
    }

    #[test]
    fn parses_numeric_string_amount() {
        let transaction = parse_json(json!({
            "title": "Salary",
            "amount": " 1234.5 ",
            "type": "income",
            "category": "work",
        }))
        .unwrap();

        assert_eq!(transaction.amount, 1234.5);
    }

    #[test]
    fn accepts_zero_amount() {
        let transaction = parse_json(json!({
            "title": "Free sample",
            "amount": 0,
            "type": "income",
            "category": "general",
        }))
        .unwrap();

        assert_eq!(transaction.amount, 0.0);
    }

    #[test]
    fn ignores_client_date() {
        let transaction = parse_json(json!({
            "title": "Coffee",
            "amount": 5,
            "type": "expense",
            "category": "food",
            "date": "1999-12-31",
        }))
        .unwrap();

        assert_eq!(transaction.date, datetime!(2025-03-01 10:00:00 UTC));
    }

    #[test]
    fn rejects_each_missing_field() {
        let complete = json!({
            "title": "Coffee",
            "amount": 5,
            "type": "expense",
            "category": "food",
        });

        for field in ["title", "amount", "type", "category"] {
            let mut payload = complete.clone();
            payload.as_object_mut().unwrap().remove(field);

            let result = parse_json(payload);

            assert!(
                matches!(result, Err(Error::MissingFields)),
                "want missing fields error without {field}, got {result:?}"
            );
        }
    }

    #[test]
    fn rejects_each_empty_field() {
        let complete = json!({
            "title": "Coffee",
            "amount": "5",
            "type": "expense",
            "category": "food",
        });

        for field in ["title", "amount", "type", "category"] {
            let mut payload = complete.clone();
            payload[field] = json!("");

            let result = parse_json(payload);

            assert!(
                matches!(result, Err(Error::MissingFields)),
                "want missing fields error with empty {field}, got {result:?}"
            );
        }
    }

    #[test]
    fn rejects_null_fields() {
        let result = parse_json(json!({
            "title": null,
            "amount": 5,
            "type": "expense",
            "category": "food",
        }));

        assert!(matches!(result, Err(Error::MissingFields)), "got {result:?}");
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let result = parse_json(json!({
            "title": "Coffee",
            "amount": "five",
            "type": "expense",
            "category": "food",
        }));

        assert!(
            matches!(result, Err(Error::InvalidAmount(ref amount)) if amount == "five"),
            "got {result:?}"
        );
    }

    #[test]
    fn rejects_negative_amount() {
        let result = parse_json(json!({
            "title": "Coffee",
            "amount": -5,
            "type": "expense",
            "category": "food",
        }));

        assert!(matches!(result, Err(Error::InvalidAmount(_))), "got {result:?}");
    }

    #[test]
    fn rejects_infinite_amount_string() {
        let result = parse_json(json!({
            "title": "Coffee",
            "amount": "inf",
            "type": "expense",
            "category": "food",
        }));

        assert!(matches!(result, Err(Error::InvalidAmount(_))), "got {result:?}");
    }

    #[test]
    fn rejects_unknown_type() {
        let result = parse_json(json!({
            "title": "Coffee",
            "amount": 5,
            "type": "transfer",
            "category": "food",
        }));

        assert!(
            matches!(result, Err(Error::InvalidTransactionType(ref name)) if name == "transfer"),
            "got {result:?}"
        );
    }
}
