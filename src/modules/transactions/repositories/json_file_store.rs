use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::super::models::{NewTransaction, PaymentTransaction, TransactionStatus};
use super::transaction_store::{StatusUpdate, TransactionStore};
use crate::core::{AppError, Result};

/// Booking store backed by a single JSON array file.
///
/// The whole list is held in memory behind an async `RwLock` and the file is
/// rewritten after every mutation while the write lock is still held, so
/// concurrent requests never interleave partial updates.
#[derive(Clone)]
pub struct JsonFileTransactionStore {
    path: PathBuf,
    transactions: Arc<RwLock<Vec<PaymentTransaction>>>,
}

impl JsonFileTransactionStore {
    /// Load `path`, creating it as an empty array if missing
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let transactions = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&path, b"[]").await?;
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            path = %path.display(),
            count = transactions.len(),
            "Opened booking file"
        );

        Ok(Self {
            path,
            transactions: Arc::new(RwLock::new(transactions)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write to a sibling temp file, then rename over the target
    async fn persist(&self, transactions: &[PaymentTransaction]) -> Result<()> {
        let body = serde_json::to_vec_pretty(transactions)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");

        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn newest_first(mut transactions: Vec<PaymentTransaction>) -> Vec<PaymentTransaction> {
        transactions.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        transactions
    }
}

#[async_trait]
impl TransactionStore for JsonFileTransactionStore {
    async fn insert(&self, transaction: NewTransaction) -> Result<PaymentTransaction> {
        transaction.validate()?;
        let mut transactions = self.transactions.write().await;

        if transactions
            .iter()
            .any(|t| t.session_id == transaction.session_id)
        {
            return Err(AppError::conflict(format!(
                "Transaction for session '{}' already exists",
                transaction.session_id
            )));
        }

        let id = transactions.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let record = transaction.into_transaction(id, Utc::now());

        transactions.push(record.clone());
        if let Err(e) = self.persist(&transactions).await {
            transactions.pop();
            return Err(e);
        }

        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PaymentTransaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions.iter().find(|t| t.id == id).cloned())
    }

    async fn find_by_session_id(&self, session_id: &str) -> Result<Option<PaymentTransaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions
            .iter()
            .find(|t| t.session_id == session_id)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<PaymentTransaction>> {
        let transactions = self.transactions.read().await;
        Ok(Self::newest_first(transactions.clone()))
    }

    async fn list_by_user(&self, user_id: i64) -> Result<Vec<PaymentTransaction>> {
        let transactions = self.transactions.read().await;
        Ok(Self::newest_first(
            transactions
                .iter()
                .filter(|t| t.user_id == Some(user_id))
                .cloned()
                .collect(),
        ))
    }

    async fn update_status(
        &self,
        session_id: &str,
        status: TransactionStatus,
    ) -> Result<Option<StatusUpdate>> {
        let mut transactions = self.transactions.write().await;

        let Some(index) = transactions.iter().position(|t| t.session_id == session_id) else {
            return Ok(None);
        };

        if !transactions[index].status.can_transition_to(status) {
            return Ok(Some(StatusUpdate {
                transaction: transactions[index].clone(),
                changed: false,
            }));
        }

        let previous = transactions[index].clone();
        transactions[index].status = status;
        transactions[index].updated_at = Utc::now();

        if let Err(e) = self.persist(&transactions).await {
            transactions[index] = previous;
            return Err(e);
        }

        Ok(Some(StatusUpdate {
            transaction: transactions[index].clone(),
            changed: true,
        }))
    }

    async fn set_attended(&self, id: i64, attended: bool) -> Result<Option<PaymentTransaction>> {
        let mut transactions = self.transactions.write().await;

        let Some(index) = transactions.iter().position(|t| t.id == id) else {
            return Ok(None);
        };

        let previous = transactions[index].clone();
        transactions[index].attended = attended;
        transactions[index].updated_at = Utc::now();

        if let Err(e) = self.persist(&transactions).await {
            transactions[index] = previous;
            return Err(e);
        }

        Ok(Some(transactions[index].clone()))
    }

    fn backend(&self) -> &'static str {
        "json"
    }
}
