use std::sync::Arc;

use super::super::models::{NewTransaction, PaymentTransaction, TransactionStatus};
use super::super::repositories::TransactionStore;
use crate::core::{AppError, Result};
use crate::modules::users::User;

/// Booking lifecycle on top of the configured store
pub struct TransactionService {
    store: Arc<dyn TransactionStore>,
}

impl TransactionService {
    pub fn new(store: Arc<dyn TransactionStore>) -> Self {
        Self { store }
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Record a booking for a freshly created checkout session
    pub async fn record_pending(&self, transaction: NewTransaction) -> Result<PaymentTransaction> {
        transaction.validate()?;
        let record = self.store.insert(transaction).await?;

        tracing::info!(
            session_id = %record.session_id,
            package_id = record.package_id.as_deref().unwrap_or("-"),
            amount_cents = record.amount_cents,
            backend = self.store.backend(),
            "Recorded pending transaction"
        );
        Ok(record)
    }

    /// Admins see every booking, customers only their own
    pub async fn list_transactions(&self, user: &User) -> Result<Vec<PaymentTransaction>> {
        if user.is_admin() {
            self.store.list_all().await
        } else {
            self.store.list_by_user(user.id).await
        }
    }

    pub async fn list_bookings(&self) -> Result<Vec<PaymentTransaction>> {
        self.store.list_all().await
    }

    pub async fn get_by_session(&self, session_id: &str) -> Result<PaymentTransaction> {
        self.store
            .find_by_session_id(session_id)
            .await?
            .ok_or_else(|| AppError::not_found("Transaction not found"))
    }

    pub async fn mark_attended(&self, id: i64, attended: bool) -> Result<PaymentTransaction> {
        let transaction = self
            .store
            .set_attended(id, attended)
            .await?
            .ok_or_else(|| AppError::not_found("Transaction not found"))?;

        tracing::info!(transaction_id = id, attended, "Attendance updated");
        Ok(transaction)
    }

    /// Mark a session's booking paid. Unknown sessions yield `None`.
    pub async fn mark_completed(&self, session_id: &str) -> Result<Option<PaymentTransaction>> {
        self.transition(session_id, TransactionStatus::Completed).await
    }

    /// Expire a booking that is still pending
    pub async fn mark_expired(&self, session_id: &str) -> Result<Option<PaymentTransaction>> {
        self.transition(session_id, TransactionStatus::Expired).await
    }

    async fn transition(
        &self,
        session_id: &str,
        next: TransactionStatus,
    ) -> Result<Option<PaymentTransaction>> {
        let Some(update) = self.store.update_status(session_id, next).await? else {
            tracing::warn!(session_id = %session_id, status = %next, "No transaction for session");
            return Ok(None);
        };

        if update.changed {
            tracing::info!(
                session_id = %session_id,
                status = %next,
                "Transaction status changed"
            );
        } else {
            tracing::debug!(
                session_id = %session_id,
                current = %update.transaction.status,
                requested = %next,
                "Status left unchanged"
            );
        }

        Ok(Some(update.transaction))
    }
}
