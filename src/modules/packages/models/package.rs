use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::currency::parse_price_to_cents;
use crate::core::{AppError, Currency, Result};

/// Room occupancy; selects which package price applies per visitor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupancy {
    #[default]
    Single,
    Double,
}

impl Occupancy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Occupancy::Single => "single",
            Occupancy::Double => "double",
        }
    }
}

/// Catalog entry. Prices are per person, in cents.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Package {
    pub id: i64,
    /// URL slug, e.g. `summer-tech`
    pub package_id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub single_price: i64,
    pub double_price: i64,
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Package {
    pub fn price_for(&self, occupancy: Occupancy) -> i64 {
        match occupancy {
            Occupancy::Single => self.single_price,
            Occupancy::Double => self.double_price,
        }
    }

    /// Total for `visitor_count` people at the given occupancy
    pub fn total_for(&self, occupancy: Occupancy, visitor_count: i64) -> Result<i64> {
        if visitor_count < 1 {
            return Err(AppError::validation("Visitor count must be at least 1"));
        }

        self.price_for(occupancy)
            .checked_mul(visitor_count)
            .ok_or_else(|| AppError::validation("Booking total is out of range"))
    }
}

/// A price given either as integer cents or as a display string like `"2,400"`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Cents(i64),
    Display(String),
}

impl PriceInput {
    pub fn to_cents(&self) -> Result<i64> {
        let cents = match self {
            PriceInput::Cents(cents) => *cents,
            PriceInput::Display(display) => parse_price_to_cents(display)?,
        };

        if cents <= 0 {
            return Err(AppError::validation("Price must be greater than 0"));
        }

        Ok(cents)
    }
}

/// Insert payload for the package repository
#[derive(Debug, Clone)]
pub struct NewPackage {
    pub package_id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub single_price: i64,
    pub double_price: i64,
    pub currency: Currency,
}

/// POST /api/packages body
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePackageRequest {
    pub package_id: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    #[serde(alias = "singlePrice")]
    pub single_price: Option<PriceInput>,
    #[serde(alias = "doublePrice")]
    pub double_price: Option<PriceInput>,
    pub currency: Option<Currency>,
}

impl CreatePackageRequest {
    pub fn into_new_package(self) -> Result<NewPackage> {
        let (Some(package_id), Some(title), Some(single_price), Some(double_price)) = (
            self.package_id,
            self.title,
            self.single_price,
            self.double_price,
        ) else {
            return Err(AppError::validation("Missing required fields"));
        };

        let package_id = package_id.trim().to_lowercase();
        if package_id.is_empty() || package_id.contains('/') {
            return Err(AppError::validation("Package id is invalid"));
        }
        if title.trim().is_empty() {
            return Err(AppError::validation("Package title cannot be empty"));
        }

        Ok(NewPackage {
            package_id,
            title: title.trim().to_string(),
            description: self.description,
            date: self.date,
            single_price: single_price.to_cents()?,
            double_price: double_price.to_cents()?,
            currency: self.currency.unwrap_or_default(),
        })
    }
}

/// PUT /api/packages/{package_id} body; omitted fields are kept
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePackageRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    #[serde(alias = "singlePrice")]
    pub single_price: Option<PriceInput>,
    #[serde(alias = "doublePrice")]
    pub double_price: Option<PriceInput>,
    pub currency: Option<Currency>,
}

impl UpdatePackageRequest {
    pub fn apply_to(self, package: &mut Package) -> Result<()> {
        if let Some(title) = self.title {
            if title.trim().is_empty() {
                return Err(AppError::validation("Package title cannot be empty"));
            }
            package.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            package.description = description;
        }
        if let Some(date) = self.date {
            package.date = date;
        }
        if let Some(price) = self.single_price {
            package.single_price = price.to_cents()?;
        }
        if let Some(price) = self.double_price {
            package.double_price = price.to_cents()?;
        }
        if let Some(currency) = self.currency {
            package.currency = currency;
        }
        Ok(())
    }
}

/// PUT /api/admin/packages/{package_id} body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceUpdateRequest {
    #[serde(alias = "singlePrice")]
    pub single_price: Option<PriceInput>,
    #[serde(alias = "doublePrice")]
    pub double_price: Option<PriceInput>,
}

impl From<PriceUpdateRequest> for UpdatePackageRequest {
    fn from(prices: PriceUpdateRequest) -> Self {
        UpdatePackageRequest {
            single_price: prices.single_price,
            double_price: prices.double_price,
            ..Default::default()
        }
    }
}
