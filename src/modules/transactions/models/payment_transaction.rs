use crate::core::{AppError, Currency, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Booking payment status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Checkout session created, payment not yet confirmed
    #[default]
    #[serde(rename = "pending")]
    Pending,

    /// Payment confirmed by verification or webhook
    #[serde(rename = "completed", alias = "confirmed")]
    Completed,

    /// Checkout session expired before payment
    #[serde(rename = "expired")]
    Expired,
}

impl TransactionStatus {
    /// Completed is final. A confirmed payment wins over an earlier expiry.
    pub fn can_transition_to(self, next: TransactionStatus) -> bool {
        matches!(
            (self, next),
            (TransactionStatus::Pending, TransactionStatus::Completed)
                | (TransactionStatus::Pending, TransactionStatus::Expired)
                | (TransactionStatus::Expired, TransactionStatus::Completed)
        )
    }

    /// Statuses a booking may move to `self` from
    pub fn predecessors(self) -> Vec<TransactionStatus> {
        [
            TransactionStatus::Pending,
            TransactionStatus::Completed,
            TransactionStatus::Expired,
        ]
        .into_iter()
        .filter(|from| from.can_transition_to(self))
        .collect()
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Completed => write!(f, "completed"),
            TransactionStatus::Expired => write!(f, "expired"),
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TransactionStatus::Pending),
            "completed" | "confirmed" => Ok(TransactionStatus::Completed),
            "expired" => Ok(TransactionStatus::Expired),
            _ => Err(format!("Invalid transaction status: {}", s)),
        }
    }
}

/// A booking tied to one provider checkout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct PaymentTransaction {
    pub id: i64,

    /// Provider checkout session id
    pub session_id: String,

    /// Set when the checkout was made by a logged-in user
    pub user_id: Option<i64>,

    /// Package slug when priced from the catalog
    pub package_id: Option<String>,

    pub package_title: String,
    pub amount_cents: i64,
    pub currency: Currency,
    pub visitor_count: i64,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub status: TransactionStatus,
    #[serde(default)]
    pub attended: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload; new bookings always start as pending
#[derive(Debug, Clone, Default)]
pub struct NewTransaction {
    pub session_id: String,
    pub user_id: Option<i64>,
    pub package_id: Option<String>,
    pub package_title: String,
    pub amount_cents: i64,
    pub currency: Currency,
    pub visitor_count: i64,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

impl NewTransaction {
    pub fn validate(&self) -> Result<()> {
        if self.session_id.trim().is_empty() {
            return Err(AppError::validation("Session id is required"));
        }
        if self.package_title.trim().is_empty() {
            return Err(AppError::validation("Package title is required"));
        }
        if self.amount_cents <= 0 {
            return Err(AppError::validation("Amount must be greater than 0"));
        }
        if self.visitor_count < 1 {
            return Err(AppError::validation("Visitor count must be at least 1"));
        }
        Ok(())
    }

    /// Materialize the record a store persists for this payload
    pub fn into_transaction(self, id: i64, now: DateTime<Utc>) -> PaymentTransaction {
        PaymentTransaction {
            id,
            session_id: self.session_id,
            user_id: self.user_id,
            package_id: self.package_id,
            package_title: self.package_title,
            amount_cents: self.amount_cents,
            currency: self.currency,
            visitor_count: self.visitor_count,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            status: TransactionStatus::Pending,
            attended: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// PUT /api/transactions/{id}/attended body
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceUpdateRequest {
    #[serde(default = "default_attended")]
    pub attended: bool,
}

fn default_attended() -> bool {
    true
}
