use async_trait::async_trait;

use super::super::models::{NewTransaction, PaymentTransaction, TransactionStatus};
use crate::core::Result;

/// Outcome of a conditional status change
#[derive(Debug, Clone)]
pub struct StatusUpdate {
    /// The record as stored after the call
    pub transaction: PaymentTransaction,
    /// False when the current status did not allow the move
    pub changed: bool,
}

/// Persistence seam for bookings.
///
/// Implemented by the SQLite repository and the JSON file store; the active
/// backend is picked at startup from `BOOKING_STORE`.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Insert a pending booking. A duplicate session id is a conflict.
    async fn insert(&self, transaction: NewTransaction) -> Result<PaymentTransaction>;

    async fn find_by_id(&self, id: i64) -> Result<Option<PaymentTransaction>>;

    async fn find_by_session_id(&self, session_id: &str) -> Result<Option<PaymentTransaction>>;

    /// Newest first
    async fn list_all(&self) -> Result<Vec<PaymentTransaction>>;

    /// Newest first
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<PaymentTransaction>>;

    /// Move the booking to `status` if its current status allows it.
    ///
    /// The check and the write happen as one step. Returns `None` if the
    /// session is unknown.
    async fn update_status(
        &self,
        session_id: &str,
        status: TransactionStatus,
    ) -> Result<Option<StatusUpdate>>;

    /// Returns the updated record, or `None` if the id is unknown
    async fn set_attended(&self, id: i64, attended: bool) -> Result<Option<PaymentTransaction>>;

    /// Backend label for logs
    fn backend(&self) -> &'static str;
}
