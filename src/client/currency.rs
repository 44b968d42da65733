//! Formats amounts of money for display.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Format `number` as US dollars rounded to the cent, e.g. "$1,234.50" or "-$40.00".
///
/// Amounts that round to zero cents, including float residues such as
/// `0.3 - 0.1 - 0.2`, are shown as "$0.00".
pub fn format_currency(number: f64) -> String {
    let cents = (number * 100.0).round();

    if cents == 0.0 {
        return "$0.00".to_owned();
    }

    let sign = if cents < 0.0 { "-" } else { "" };
    let cents = cents.abs();
    let dollars = (cents / 100.0).trunc();
    let remainder = (cents - dollars * 100.0) as u8;

    format!("{sign}${}.{remainder:02}", format_dollars(dollars))
}

/// Format a whole number of dollars with thousands separators, e.g. "1,234".
fn format_dollars(dollars: f64) -> String {
    static DOLLARS_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    // Zero is hardcoded as "0" by numfmt and small numbers would be printed
    // in scientific notation, neither of which can happen for whole dollars
    // above zero.
    if dollars == 0.0 {
        return "0".to_owned();
    }

    match DOLLARS_FMT.get_or_init(dollars_formatter) {
        Some(formatter) => {
            let formatted_string = formatter.fmt_string(dollars);

            match formatted_string.split_once('.') {
                Some((whole, _)) => whole.to_owned(),
                None => formatted_string,
            }
        }
        None => format!("{dollars:.0}"),
    }
}

fn dollars_formatter() -> Option<Formatter> {
    match Formatter::currency("") {
        Ok(formatter) => Some(formatter.precision(Precision::Decimals(0))),
        Err(error) => {
            tracing::error!("Could not create currency formatter: {error:?}");
            None
        }
    }
}
