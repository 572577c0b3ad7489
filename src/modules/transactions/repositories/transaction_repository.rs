use super::super::models::{NewTransaction, PaymentTransaction, TransactionStatus};
use super::transaction_store::{StatusUpdate, TransactionStore};
use crate::core::{AppError, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

const TRANSACTION_COLUMNS: &str = r#"
    id, session_id, user_id, package_id, package_title,
    amount_cents, currency, visitor_count,
    email, first_name, last_name, phone,
    status, attended, created_at, updated_at
"#;

/// SQLite-backed booking store over `payment_transactions`
pub struct SqlTransactionRepository {
    pool: SqlitePool,
}

impl SqlTransactionRepository {
    /// Create a new SqlTransactionRepository
    ///
    /// # Arguments
    /// * `pool` - Database connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionStore for SqlTransactionRepository {
    /// Insert a pending booking
    ///
    /// # Returns
    /// * `Result<PaymentTransaction>` - The stored record
    ///
    /// # Notes
    /// Uniqueness of session_id is enforced by the table's UNIQUE constraint
    async fn insert(&self, transaction: NewTransaction) -> Result<PaymentTransaction> {
        transaction.validate()?;
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO payment_transactions (
                session_id, user_id, package_id, package_title,
                amount_cents, currency, visitor_count,
                email, first_name, last_name, phone,
                status, attended, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&transaction.session_id)
        .bind(transaction.user_id)
        .bind(&transaction.package_id)
        .bind(&transaction.package_title)
        .bind(transaction.amount_cents)
        .bind(transaction.currency)
        .bind(transaction.visitor_count)
        .bind(&transaction.email)
        .bind(&transaction.first_name)
        .bind(&transaction.last_name)
        .bind(&transaction.phone)
        .bind(TransactionStatus::Pending)
        .bind(false)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if AppError::is_unique_violation(&e) {
                AppError::conflict(format!(
                    "Transaction for session '{}' already exists",
                    transaction.session_id
                ))
            } else {
                AppError::Database(e)
            }
        })?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Transaction was created but not found"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PaymentTransaction>> {
        let transaction = sqlx::query_as::<_, PaymentTransaction>(&format!(
            "SELECT {} FROM payment_transactions WHERE id = ?",
            TRANSACTION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transaction)
    }

    async fn find_by_session_id(&self, session_id: &str) -> Result<Option<PaymentTransaction>> {
        let transaction = sqlx::query_as::<_, PaymentTransaction>(&format!(
            "SELECT {} FROM payment_transactions WHERE session_id = ?",
            TRANSACTION_COLUMNS
        ))
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(transaction)
    }

    async fn list_all(&self) -> Result<Vec<PaymentTransaction>> {
        let transactions = sqlx::query_as::<_, PaymentTransaction>(&format!(
            "SELECT {} FROM payment_transactions ORDER BY created_at DESC, id DESC",
            TRANSACTION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<PaymentTransaction>> {
        let transactions = sqlx::query_as::<_, PaymentTransaction>(&format!(
            "SELECT {} FROM payment_transactions WHERE user_id = ? ORDER BY created_at DESC, id DESC",
            TRANSACTION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }

    async fn update_status(
        &self,
        session_id: &str,
        status: TransactionStatus,
    ) -> Result<Option<StatusUpdate>> {
        let allowed_from = status.predecessors();

        let changed = if allowed_from.is_empty() {
            false
        } else {
            let sql = format!(
                "UPDATE payment_transactions SET status = ?, updated_at = ? \
                 WHERE session_id = ? AND status IN ({})",
                vec!["?"; allowed_from.len()].join(", ")
            );

            let mut query = sqlx::query(&sql)
                .bind(status)
                .bind(Utc::now())
                .bind(session_id);
            for from in &allowed_from {
                query = query.bind(*from);
            }

            query.execute(&self.pool).await?.rows_affected() > 0
        };

        Ok(self
            .find_by_session_id(session_id)
            .await?
            .map(|transaction| StatusUpdate {
                transaction,
                changed,
            }))
    }

    async fn set_attended(&self, id: i64, attended: bool) -> Result<Option<PaymentTransaction>> {
        let result =
            sqlx::query("UPDATE payment_transactions SET attended = ?, updated_at = ? WHERE id = ?")
                .bind(attended)
                .bind(Utc::now())
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
