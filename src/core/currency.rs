use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::{AppError, Result};

/// Currencies accepted by the checkout provider, lowercase on the wire
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    /// US Dollar
    #[default]
    Usd,
    /// Euro
    Eur,
    /// British Pound
    Gbp,
    /// Nigerian Naira
    Ngn,
}

impl Currency {
    /// Lowercase ISO code as the payment provider expects it
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "usd",
            Currency::Eur => "eur",
            Currency::Gbp => "gbp",
            Currency::Ngn => "ngn",
        }
    }

    pub fn format_amount(&self, cents: i64) -> String {
        format!("{} {}", self.code().to_uppercase(), format_cents(cents))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "usd" => Ok(Currency::Usd),
            "eur" => Ok(Currency::Eur),
            "gbp" => Ok(Currency::Gbp),
            "ngn" => Ok(Currency::Ngn),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}

/// Parse a display price such as `"2,400"` or `"$1,900.50"` into cents.
///
/// Thousands separators and a leading dollar sign are ignored. At most two
/// decimal places are accepted; negative and empty prices are rejected.
pub fn parse_price_to_cents(price: &str) -> Result<i64> {
    let cleaned: String = price
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Err(AppError::validation("Price cannot be empty"));
    }

    let amount = Decimal::from_str(&cleaned)
        .map_err(|_| AppError::validation(format!("Invalid price: {}", price)))?;

    if amount.is_sign_negative() {
        return Err(AppError::validation("Price cannot be negative"));
    }

    if amount.normalize().scale() > 2 {
        return Err(AppError::validation(format!(
            "Price must have at most 2 decimal places: {}",
            price
        )));
    }

    (amount * Decimal::ONE_HUNDRED)
        .to_i64()
        .ok_or_else(|| AppError::validation(format!("Price out of range: {}", price)))
}

/// Format cents as a grouped decimal string, e.g. `240000` -> `"2,400.00"`
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let whole = (abs / 100).to_string();
    let fraction = abs % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{:02}", sign, grouped, fraction)
}
