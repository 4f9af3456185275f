//! `tr_installment` is a Rust library for calculating installment purchases.
//!
//! It covers the three plans offered at the counter:
//! - **Elden taksitli**: motorcycle bought on in-store installments.
//! - **Kredi kartı**: motorcycle bought on credit card installments.
//! - **Telefon elden taksitli**: phone bought on in-store installments.
//!
//! Each plan requires a minimum down payment share and multiplies the remaining
//! amount by a factor that depends on the number of months chosen.
//!
//! ## Usage
//!
//! Add `tr_installment` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! tr_installment = "0.1.0"
//! rust_decimal = "1.39.0"
//! rust_decimal_macros = "1.39.0"
//! ```
//!
//! Then, use the `calculate` function with one of the built-in plans:
//!
//! ```rust
//! use tr_installment::{calculate, CalculationRequest, Plan};
//! use rust_decimal_macros::dec;
//!
//! fn main() {
//!     let request = CalculationRequest::new(dec!(100_000), dec!(35_000), 4);
//!
//!     match calculate(&request, &Plan::InStore.config()) {
//!         Ok(result) => {
//!             println!("Remaining:   {:.2}", result.remaining_amount);
//!             println!("Total:       {:.2}", result.total_installment_amount);
//!             println!("Monthly:     {:.2}", result.monthly_installment_amount);
//!         }
//!         Err(e) => {
//!             eprintln!("{}", e);
//!         }
//!     }
//! }
//! ```
//!
//! Values typed into a form can go straight to `calculate_from_text`, which
//! also reports blank fields.

mod error;
mod input;
mod plan;

pub use error::InstallmentError;
pub use input::{CalculationRequest, parse_amount, parse_term};
pub use plan::{Plan, PlanConfig};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Breakdown of an accepted installment purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentBreakdown {
    /// Price left after the down payment.
    pub remaining_amount: Decimal,
    /// Total paid across all installments.
    pub total_installment_amount: Decimal,
    /// Amount of each monthly installment.
    pub monthly_installment_amount: Decimal,
}

/// Validates a request against a plan and computes the installments.
///
/// Checks run in order and the first failure is returned:
/// price must be positive, the down payment cannot exceed the price, it must
/// reach the plan's minimum share, and the term must be offered by the plan.
///
/// Amounts are not rounded. A price too large to carry through the plan's
/// multiplier is reported as [`InstallmentError::InvalidPrice`].
///
/// # Errors
///
/// Returns the matching [`InstallmentError`] variant for the first failed check.
pub fn calculate(
    request: &CalculationRequest,
    plan: &PlanConfig,
) -> Result<InstallmentBreakdown, InstallmentError> {
    let result = validate_and_compute(request, plan);

    match &result {
        Ok(breakdown) => tracing::debug!(
            term = request.term,
            remaining = %breakdown.remaining_amount,
            total = %breakdown.total_installment_amount,
            monthly = %breakdown.monthly_installment_amount,
            "installment calculated"
        ),
        Err(e) => tracing::debug!(
            kind = e.kind(),
            price = %request.price,
            down_payment = %request.down_payment,
            term = request.term,
            "installment rejected"
        ),
    }

    result
}

/// Same as [`calculate`], starting from the raw text of the form fields.
///
/// # Errors
///
/// Returns [`InstallmentError::MissingInput`] when the price or the down
/// payment is blank, otherwise whatever [`calculate`] returns.
pub fn calculate_from_text(
    price_raw: &str,
    down_raw: &str,
    term_raw: &str,
    plan: &PlanConfig,
) -> Result<InstallmentBreakdown, InstallmentError> {
    let request = CalculationRequest::parse(price_raw, down_raw, term_raw).inspect_err(|e| {
        tracing::debug!(kind = e.kind(), "installment rejected");
    })?;

    calculate(&request, plan)
}

fn validate_and_compute(
    request: &CalculationRequest,
    plan: &PlanConfig,
) -> Result<InstallmentBreakdown, InstallmentError> {
    let CalculationRequest {
        price,
        down_payment,
        term,
    } = *request;

    if price <= dec!(0) {
        return Err(InstallmentError::InvalidPrice);
    }

    if down_payment > price {
        return Err(InstallmentError::DownPaymentTooHigh);
    }

    let minimum_amount = plan.minimum_down_payment(price);
    if down_payment < minimum_amount {
        return Err(InstallmentError::DownPaymentTooLow {
            minimum_percent: plan.minimum_down_payment_percent(),
            minimum_amount,
        });
    }

    let rate = plan
        .rate_for(term)
        .ok_or(InstallmentError::InvalidTerm { term })?;

    let remaining_amount = (price - down_payment).max(dec!(0));
    // Prices near `Decimal::MAX` cannot be multiplied by a rate above 1.
    let total_installment_amount = remaining_amount
        .checked_mul(rate)
        .ok_or(InstallmentError::InvalidPrice)?;
    let monthly_installment_amount = total_installment_amount
        .checked_div(Decimal::from(term))
        .ok_or(InstallmentError::InvalidTerm { term })?;

    Ok(InstallmentBreakdown {
        remaining_amount,
        total_installment_amount,
        monthly_installment_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_calculate_in_store_happy_path() {
        let request = CalculationRequest::new(dec!(100000), dec!(35000), 4);

        let result = calculate(&request, &Plan::InStore.config()).unwrap();

        assert_eq!(result.remaining_amount, dec!(65000));
        assert_eq!(result.total_installment_amount, dec!(86450));
        assert_eq!(result.monthly_installment_amount, dec!(21612.5));
    }

    #[rstest]
    #[case(Plan::InStore, dec!(50000), dec!(20000), 8, dec!(30000), dec!(47400), dec!(5925))]
    #[case(Plan::CreditCard, dec!(60000), dec!(12000), 12, dec!(48000), dec!(36000), dec!(3000))]
    #[case(Plan::CreditCard, dec!(10000), dec!(2000), 5, dec!(8000), dec!(7080), dec!(1416))]
    #[case(Plan::Phone, dec!(40000), dec!(16000), 2, dec!(24000), dec!(28320), dec!(14160))]
    #[case(Plan::Phone, dec!(30000), dec!(30000), 14, dec!(0), dec!(0), dec!(0))]
    fn test_calculate_breakdown(
        #[case] plan: Plan,
        #[case] price: Decimal,
        #[case] down_payment: Decimal,
        #[case] term: u32,
        #[case] remaining: Decimal,
        #[case] total: Decimal,
        #[case] monthly: Decimal,
    ) {
        let request = CalculationRequest::new(price, down_payment, term);

        let result = calculate(&request, &plan.config()).unwrap();

        assert_eq!(result.remaining_amount, remaining);
        assert_eq!(result.total_installment_amount, total);
        assert_eq!(result.monthly_installment_amount, monthly);
    }

    #[test]
    fn test_monthly_is_total_divided_by_term() {
        let request = CalculationRequest::new(dec!(10000), dec!(4000), 3);

        let result = calculate(&request, &Plan::Phone.config()).unwrap();

        assert_eq!(result.total_installment_amount, dec!(7500));
        assert_eq!(result.monthly_installment_amount, dec!(2500));
    }

    #[test]
    fn test_down_payment_too_low_reports_minimum() {
        let request = CalculationRequest::new(dec!(100000), dec!(20000), 4);

        let err = calculate(&request, &Plan::InStore.config()).unwrap_err();

        assert_eq!(
            err,
            InstallmentError::DownPaymentTooLow {
                minimum_percent: 35,
                minimum_amount: dec!(35000),
            }
        );
    }

    #[rstest]
    #[case(dec!(0), dec!(0), 4, InstallmentError::InvalidPrice)]
    #[case(dec!(-100), dec!(0), 4, InstallmentError::InvalidPrice)]
    #[case(dec!(100000), dec!(100001), 4, InstallmentError::DownPaymentTooHigh)]
    #[case(dec!(100000), dec!(200000), 99, InstallmentError::DownPaymentTooHigh)]
    #[case(dec!(100000), dec!(35000), 9, InstallmentError::InvalidTerm { term: 9 })]
    #[case(dec!(100000), dec!(35000), 0, InstallmentError::InvalidTerm { term: 0 })]
    fn test_calculate_rejects(
        #[case] price: Decimal,
        #[case] down_payment: Decimal,
        #[case] term: u32,
        #[case] expected: InstallmentError,
    ) {
        let request = CalculationRequest::new(price, down_payment, term);

        assert_eq!(calculate(&request, &Plan::InStore.config()), Err(expected));
    }

    #[test]
    fn test_price_at_decimal_max_is_rejected() {
        let result = calculate_from_text(
            "79228162514264337593543950335",
            "27729856879992518157740382618",
            "8",
            &Plan::InStore.config(),
        );

        assert_eq!(result, Err(InstallmentError::InvalidPrice));
    }

    #[test]
    fn test_price_at_decimal_max_with_discount_rate() {
        let request = CalculationRequest::new(Decimal::MAX, Decimal::MAX / dec!(2), 12);

        let result = calculate(&request, &Plan::CreditCard.config()).unwrap();

        assert_eq!(
            result.monthly_installment_amount,
            result.total_installment_amount / dec!(12)
        );
    }

    #[test]
    fn test_minimum_checked_before_term() {
        let request = CalculationRequest::new(dec!(100000), dec!(1000), 1);

        let err = calculate(&request, &Plan::CreditCard.config()).unwrap_err();

        assert_eq!(err.kind(), "down_payment_too_low");
    }

    #[rstest]
    #[case("", "", "4", InstallmentError::MissingInput)]
    #[case("100000", "  ", "4", InstallmentError::MissingInput)]
    #[case("abc", "35000", "4", InstallmentError::InvalidPrice)]
    #[case("0", "0", "4", InstallmentError::InvalidPrice)]
    #[case("100000", "35000", "", InstallmentError::InvalidTerm { term: 0 })]
    #[case("100000", "35000", "dört", InstallmentError::InvalidTerm { term: 0 })]
    #[case("100000", "35000", "+4", InstallmentError::InvalidTerm { term: 0 })]
    #[case("100000", "35000", "04", InstallmentError::InvalidTerm { term: 0 })]
    fn test_calculate_from_text_rejects(
        #[case] price: &str,
        #[case] down_payment: &str,
        #[case] term: &str,
        #[case] expected: InstallmentError,
    ) {
        let result = calculate_from_text(price, down_payment, term, &Plan::InStore.config());
        assert_eq!(result, Err(expected));
    }

    #[test]
    fn test_calculate_from_text_happy_path() {
        let result =
            calculate_from_text(" 100000 ", "35000", "4", &Plan::InStore.config()).unwrap();

        assert_eq!(result.monthly_installment_amount, dec!(21612.5));
    }

    #[test]
    fn test_calculate_with_custom_plan() {
        let plan = PlanConfig::from_json(
            r#"{ "minimum_down_payment_fraction": "0.5", "rate_by_term": { "10": "1.2" } }"#,
        )
        .unwrap();

        let result = calculate_from_text("1000", "500", "10", &plan).unwrap();

        assert_eq!(result.total_installment_amount, dec!(600));
        assert_eq!(result.monthly_installment_amount, dec!(60));
    }
}
