//! Conversion of raw form values into a [`CalculationRequest`].
//!
//! Form fields are forgiving: anything that is not a number counts as zero
//! and is left for the calculator to reject.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::InstallmentError;

/// Numbers entered for a single calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Cash price of the item.
    pub price: Decimal,
    /// Amount paid up front.
    pub down_payment: Decimal,
    /// Number of monthly installments.
    pub term: u32,
}

impl CalculationRequest {
    /// Builds a request from already parsed numbers.
    pub fn new(price: Decimal, down_payment: Decimal, term: u32) -> Self {
        Self {
            price,
            down_payment,
            term,
        }
    }

    /// Builds a request from the text of the price, down payment and term fields.
    ///
    /// # Errors
    ///
    /// Returns [`InstallmentError::MissingInput`] when the price or the down
    /// payment is blank. Every other problem is left to the calculator.
    pub fn parse(
        price_raw: &str,
        down_raw: &str,
        term_raw: &str,
    ) -> Result<Self, InstallmentError> {
        let price_raw = price_raw.trim();
        let down_raw = down_raw.trim();

        if price_raw.is_empty() || down_raw.is_empty() {
            return Err(InstallmentError::MissingInput);
        }

        Ok(Self::new(
            parse_amount(price_raw),
            parse_amount(down_raw),
            parse_term(term_raw),
        ))
    }
}

/// Reads an amount, accepting plain and scientific notation. Falls back to zero.
pub fn parse_amount(raw: &str) -> Decimal {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .unwrap_or_default()
}

/// Reads a term in months, written exactly as the plan lists it.
///
/// Signs, leading zeros, padding and anything else that is not the plain
/// number become 0, which no plan offers.
pub fn parse_term(raw: &str) -> u32 {
    raw.parse::<u32>()
        .ok()
        .filter(|term| term.to_string() == raw)
        .unwrap_or_default()
}
