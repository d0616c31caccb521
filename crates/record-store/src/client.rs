//! # Store Client
//!
//! This module defines the client for communicating with the store actor.

use crate::error::StoreError;
use crate::message::{Response, StoreRequest};
use crate::record::{Record, RowKey};
use crate::transaction::Transaction;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

/// ## StoreClient
///
/// The `StoreClient` provides an async API over a [`StoreActor`](crate::StoreActor). It holds
/// only a sender, so cloning is inexpensive and clones can be shared across tasks.
///
/// * **Transactions** – [`begin`](Self::begin) opens a [`Transaction`] for reads and writes
///   that must commit or roll back together.
/// * **Committed reads** – [`get`](Self::get) and [`list`](Self::list) never observe the
///   uncommitted writes of an open transaction.
#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>) -> Self {
        Self { sender }
    }

    /// Opens a transaction, waiting while another transaction holds the store.
    pub async fn begin(&self) -> Result<Transaction, StoreError> {
        let grant = self
            .request(|respond_to| StoreRequest::Begin { respond_to })
            .await?;
        Ok(Transaction::new(grant, self.sender.clone()))
    }

    /// Reads the committed state of a record.
    pub async fn get<R: Record>(&self, id: &R::Id) -> Result<Option<R>, StoreError> {
        let key = RowKey::of::<R>(id);
        let row = self
            .request(|respond_to| StoreRequest::Get { key, respond_to })
            .await?;
        row.map(decode::<R>).transpose()
    }

    /// Reads the committed state of every record in `R`'s table, ordered by id.
    pub async fn list<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        let rows = self
            .request(|respond_to| StoreRequest::List {
                table: R::TABLE,
                respond_to,
            })
            .await?;
        rows.into_iter().map(decode::<R>).collect()
    }

    pub(crate) async fn request<T>(
        &self,
        make: impl FnOnce(Response<T>) -> StoreRequest,
    ) -> Result<T, StoreError> {
        send_request(&self.sender, make).await
    }
}

pub(crate) async fn send_request<T>(
    sender: &mpsc::Sender<StoreRequest>,
    make: impl FnOnce(Response<T>) -> StoreRequest,
) -> Result<T, StoreError> {
    let (respond_to, response) = oneshot::channel();
    sender
        .send(make(respond_to))
        .await
        .map_err(|_| StoreError::ActorClosed)?;
    response.await.map_err(|_| StoreError::ActorDropped)?
}

pub(crate) fn decode<R: Record>(row: Value) -> Result<R, StoreError> {
    Ok(serde_json::from_value(row)?)
}
