//! # Transactions
//!
//! A [`Transaction`] is the client-side handle of the store's single active transaction.
//! Every read and write made through it is applied in order by the actor; nothing becomes
//! durable until [`Transaction::commit`].

use crate::client::{decode, send_request};
use crate::error::StoreError;
use crate::message::{StoreRequest, TxGrant, TxId};
use crate::record::{Record, RowKey};
use chrono::Utc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// An open store transaction.
///
/// Finish it with [`commit`](Self::commit) or [`rollback`](Self::rollback). Dropping the handle
/// without doing either rolls the transaction back.
#[derive(Debug)]
pub struct Transaction {
    id: TxId,
    sender: mpsc::Sender<StoreRequest>,
    _guard: oneshot::Sender<()>,
}

impl Transaction {
    pub(crate) fn new(grant: TxGrant, sender: mpsc::Sender<StoreRequest>) -> Self {
        Self {
            id: grant.id,
            sender,
            _guard: grant.guard,
        }
    }

    pub fn id(&self) -> TxId {
        self.id
    }

    /// Reads a record, including any uncommitted write made earlier in this transaction.
    #[instrument(skip(self), fields(tx = %self.id, table = R::TABLE))]
    pub async fn find_by_id<R: Record>(&self, id: &R::Id) -> Result<Option<R>, StoreError> {
        let key = RowKey::of::<R>(id);
        let row = send_request(&self.sender, |respond_to| StoreRequest::Find {
            tx: self.id,
            key,
            respond_to,
        })
        .await?;
        row.map(decode::<R>).transpose()
    }

    /// Writes a record in place, creating the row if it does not exist yet.
    #[instrument(skip(self, record), fields(tx = %self.id, table = R::TABLE, id = %record.id()))]
    pub async fn save<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        let row = serde_json::to_value(record)?;
        send_request(&self.sender, |respond_to| StoreRequest::Save {
            tx: self.id,
            key: RowKey::of::<R>(record.id()),
            row,
            respond_to,
        })
        .await
    }

    /// Inserts a new row. Runs the record's `pre_persist` hook first.
    ///
    /// # Errors
    /// Fails with [`StoreError::DuplicateKey`] if a row with the same id already exists.
    #[instrument(skip(self, record), fields(tx = %self.id, table = R::TABLE, id = %record.id()))]
    pub async fn insert<R: Record>(&self, record: &mut R) -> Result<(), StoreError> {
        record.pre_persist(Utc::now());
        let row = serde_json::to_value(&*record)?;
        send_request(&self.sender, |respond_to| StoreRequest::Insert {
            tx: self.id,
            key: RowKey::of::<R>(record.id()),
            row,
            respond_to,
        })
        .await
    }

    /// Makes every write of this transaction durable.
    #[instrument(skip(self), fields(tx = %self.id))]
    pub async fn commit(self) -> Result<(), StoreError> {
        debug!("Sending commit");
        send_request(&self.sender, |respond_to| StoreRequest::Commit {
            tx: self.id,
            respond_to,
        })
        .await
    }

    /// Undoes every write of this transaction.
    #[instrument(skip(self), fields(tx = %self.id))]
    pub async fn rollback(self) -> Result<(), StoreError> {
        debug!("Sending rollback");
        send_request(&self.sender, |respond_to| StoreRequest::Rollback {
            tx: self.id,
            respond_to,
        })
        .await
    }
}
