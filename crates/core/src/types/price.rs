//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are never stored as floats: the catalog feed quotes prices like
//! `10.90`, and summing those as `f64` across a cart drifts by fractions of a
//! cent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price from an amount in minor units (e.g., cents).
    #[must_use]
    pub fn from_cents(cents: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(cents, 2), currency_code)
    }

    /// The price of `quantity` units, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(
            self.amount.saturating_mul(Decimal::from(quantity)),
            self.currency_code,
        )
    }

    /// Amount of each payment when split into `installments` equal parts,
    /// rounded to cents. `None` when installments are not offered.
    #[must_use]
    pub fn per_installment(&self, installments: u32) -> Option<Self> {
        if installments == 0 {
            return None;
        }
        let share = (self.amount / Decimal::from(installments)).round_dp(2);
        Some(Self::new(share, self.currency_code))
    }

    /// Add two prices of the same currency.
    ///
    /// Returns `None` when the currencies differ or the sum overflows.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        if self.currency_code != other.currency_code {
            return None;
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Self::new(amount, self.currency_code))
    }

    /// Format for display (e.g., "$ 19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{} {:.2}",
            self.currency_code.symbol(),
            self.amount.round_dp(2)
        )
    }

    /// Split the amount into whole and two-digit fractional parts for
    /// product cards ("10" and "90" for 10.90).
    #[must_use]
    pub fn split_parts(&self) -> (String, String) {
        let formatted = format!("{:.2}", self.amount.round_dp(2));
        match formatted.split_once('.') {
            Some((integer, fraction)) => (integer.to_owned(), fraction.to_owned()),
            None => (formatted, "00".to_owned()),
        }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}
