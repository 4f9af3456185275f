//! Validation errors produced by the installment calculator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every way a calculation can be rejected.
///
/// The `Display` text is the Turkish message shown to the customer. Callers
/// that localize differently should match on the variant instead.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InstallmentError {
    /// Price or down payment field was left blank.
    #[error("Peşin fiyat ve peşinat alanları boş bırakılamaz.")]
    MissingInput,

    /// Price is zero or negative.
    #[error("Peşin fiyat 0'dan büyük olmalı.")]
    InvalidPrice,

    /// Down payment is larger than the price itself.
    #[error("Peşinat peşin fiyattan büyük olamaz.")]
    DownPaymentTooHigh,

    /// Down payment is under the plan's minimum share of the price.
    #[error("Peşinat en az {minimum_percent}% olmalı. Alınması gereken tutar: {minimum_amount:.2} TL.")]
    DownPaymentTooLow {
        /// Required minimum as a whole percentage of the price.
        minimum_percent: u32,
        /// Required minimum down payment amount.
        minimum_amount: Decimal,
    },

    /// The selected term has no multiplier in the plan.
    #[error("Lütfen geçerli bir vade seçin.")]
    InvalidTerm {
        /// The rejected term, 0 when the input was not a number.
        term: u32,
    },
}

impl InstallmentError {
    /// Stable snake_case tag, matching the serde `kind` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingInput => "missing_input",
            Self::InvalidPrice => "invalid_price",
            Self::DownPaymentTooHigh => "down_payment_too_high",
            Self::DownPaymentTooLow { .. } => "down_payment_too_low",
            Self::InvalidTerm { .. } => "invalid_term",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_down_payment_too_low_message_interpolates_minimum() {
        let err = InstallmentError::DownPaymentTooLow {
            minimum_percent: 35,
            minimum_amount: dec!(35000.000),
        };

        assert_eq!(
            err.to_string(),
            "Peşinat en az 35% olmalı. Alınması gereken tutar: 35000.00 TL."
        );
    }

    #[rstest]
    #[case(InstallmentError::MissingInput, "missing_input")]
    #[case(InstallmentError::InvalidPrice, "invalid_price")]
    #[case(InstallmentError::DownPaymentTooHigh, "down_payment_too_high")]
    #[case(InstallmentError::InvalidTerm { term: 99 }, "invalid_term")]
    fn test_kind_matches_serde_tag(#[case] err: InstallmentError, #[case] kind: &str) {
        assert_eq!(err.kind(), kind);

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], kind);
    }
}
