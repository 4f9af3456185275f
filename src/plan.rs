//! Installment plans: minimum down payment share and term multipliers.
//!
//! The three plans sold at the counter are available through [`Plan`]. Custom
//! tables can be loaded from JSON with [`PlanConfig::from_json`].

use std::collections::BTreeMap;

use anyhow::{Context, bail};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

const IN_STORE_RATES: &[(u32, Decimal)] = &[
    (1, dec!(1.15)),
    (2, dec!(1.21)),
    (3, dec!(1.27)),
    (4, dec!(1.33)),
    (5, dec!(1.39)),
    (6, dec!(1.46)),
    (7, dec!(1.52)),
    (8, dec!(1.58)),
];

const CREDIT_CARD_RATES: &[(u32, Decimal)] = &[
    (2, dec!(0.94)),
    (3, dec!(0.92)),
    (4, dec!(0.9)),
    (5, dec!(0.885)),
    (6, dec!(0.865)),
    (7, dec!(0.85)),
    (8, dec!(0.83)),
    (9, dec!(0.81)),
    (10, dec!(0.79)),
    (11, dec!(0.77)),
    (12, dec!(0.75)),
];

const PHONE_RATES: &[(u32, Decimal)] = &[
    (1, dec!(1.1)),
    (2, dec!(1.18)),
    (3, dec!(1.25)),
    (4, dec!(1.32)),
    (5, dec!(1.39)),
    (6, dec!(1.46)),
    (7, dec!(1.53)),
    (8, dec!(1.59)),
    (9, dec!(1.65)),
    (10, dec!(1.71)),
    (11, dec!(1.77)),
    (12, dec!(1.83)),
    (13, dec!(1.89)),
    (14, dec!(1.95)),
];

/// The built-in purchase plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    /// Motorcycle bought on in-store installments.
    InStore,
    /// Motorcycle bought on credit card installments.
    CreditCard,
    /// Phone bought on in-store installments.
    Phone,
}

impl Plan {
    /// Every built-in plan, in the order they appear on the page.
    pub const ALL: [Plan; 3] = [Plan::InStore, Plan::CreditCard, Plan::Phone];

    /// Heading shown above the result card.
    pub fn label(self) -> &'static str {
        match self {
            Plan::InStore => "Elden taksitli",
            Plan::CreditCard => "Kredi kartı",
            Plan::Phone => "Telefon elden taksitli",
        }
    }

    /// Rate table and minimum down payment share of this plan.
    pub fn config(self) -> PlanConfig {
        match self {
            Plan::InStore => PlanConfig::from_table(dec!(0.35), IN_STORE_RATES),
            Plan::CreditCard => PlanConfig::from_table(dec!(0.20), CREDIT_CARD_RATES),
            Plan::Phone => PlanConfig::from_table(dec!(0.4), PHONE_RATES),
        }
    }
}

/// Minimum down payment share and the multiplier for each allowed term.
///
/// Fields are only reachable through validating constructors, deserialization
/// included, so a plan never holds a zero term or a fraction outside `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPlanConfig")]
pub struct PlanConfig {
    /// Share of the price that must be paid up front, between 0 and 1.
    minimum_down_payment_fraction: Decimal,
    /// Term in months mapped to the factor applied to the remaining amount.
    rate_by_term: BTreeMap<u32, Decimal>,
}

/// Unchecked shape of a plan as it appears in JSON.
#[derive(Deserialize)]
struct RawPlanConfig {
    minimum_down_payment_fraction: Decimal,
    rate_by_term: BTreeMap<u32, Decimal>,
}

impl TryFrom<RawPlanConfig> for PlanConfig {
    type Error = anyhow::Error;

    fn try_from(raw: RawPlanConfig) -> Result<Self, Self::Error> {
        PlanConfig::new(raw.minimum_down_payment_fraction, raw.rate_by_term)
    }
}

impl PlanConfig {
    /// Builds a validated plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the fraction is outside `[0, 1]`, the table is
    /// empty, or any term or multiplier is not positive.
    pub fn new(
        minimum_down_payment_fraction: Decimal,
        rate_by_term: BTreeMap<u32, Decimal>,
    ) -> Result<Self, anyhow::Error> {
        let config = Self {
            minimum_down_payment_fraction,
            rate_by_term,
        };

        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "rejected plan configuration");
            return Err(e);
        }

        Ok(config)
    }

    /// Parses and validates a plan from JSON.
    ///
    /// Amounts may be given as strings (`"0.35"`) to keep them exact.
    pub fn from_json(json: &str) -> Result<Self, anyhow::Error> {
        serde_json::from_str(json).context("Invalid plan configuration.")
    }

    fn from_table(minimum_down_payment_fraction: Decimal, table: &[(u32, Decimal)]) -> Self {
        Self {
            minimum_down_payment_fraction,
            rate_by_term: table.iter().copied().collect(),
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        let fraction = self.minimum_down_payment_fraction;
        if fraction < dec!(0) || fraction > dec!(1) {
            bail!("Minimum down payment fraction must be between 0 and 1, got {fraction}.");
        }
        if self.rate_by_term.is_empty() {
            bail!("Plan must offer at least one term.");
        }
        for (&term, &rate) in &self.rate_by_term {
            if term == 0 {
                bail!("Term cannot be zero.");
            }
            if rate <= dec!(0) {
                bail!("Multiplier for term {term} must be positive, got {rate}.");
            }
        }
        Ok(())
    }

    /// Share of the price that must be paid up front.
    pub fn minimum_down_payment_fraction(&self) -> Decimal {
        self.minimum_down_payment_fraction
    }

    /// Term in months mapped to its multiplier.
    pub fn rate_by_term(&self) -> &BTreeMap<u32, Decimal> {
        &self.rate_by_term
    }

    /// Smallest down payment accepted for `price`.
    pub fn minimum_down_payment(&self, price: Decimal) -> Decimal {
        // fraction <= 1, so the product never exceeds `price`
        price * self.minimum_down_payment_fraction
    }

    /// Minimum down payment share as a whole percentage, half rounded up.
    pub fn minimum_down_payment_percent(&self) -> u32 {
        (self.minimum_down_payment_fraction * dec!(100))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or_default()
    }

    /// Multiplier for `term`, or `None` when the plan does not offer it.
    pub fn rate_for(&self, term: u32) -> Option<Decimal> {
        self.rate_by_term.get(&term).copied()
    }

    /// Allowed terms in ascending order.
    pub fn terms(&self) -> impl Iterator<Item = u32> + '_ {
        self.rate_by_term.keys().copied()
    }
}
