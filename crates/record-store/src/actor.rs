//! # Store Actor
//!
//! This module defines the `StoreActor`, the server half of the record store. It owns every
//! table, processes requests sequentially and implements transactions with an undo log.

use crate::client::StoreClient;
use crate::error::StoreError;
use crate::message::{Response, StoreRequest, TxGrant, TxId};
use crate::record::RowKey;
use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, VecDeque};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// The transaction currently holding the store.
struct ActiveTx {
    id: TxId,
    /// First before-image of every row the transaction wrote. `None` means the row did not exist.
    undo: HashMap<RowKey, Option<Value>>,
    /// Resolves when the client drops its `Transaction` handle.
    abandoned: oneshot::Receiver<()>,
}

enum Event {
    Request(Option<StoreRequest>),
    Abandoned,
}

/// The actor that owns all rows of the store.
///
/// # Concurrency Model
/// Requests are handled one at a time, so no locks guard `rows`. On top of that, at most one
/// transaction is active: a `Begin` arriving while another transaction is open waits in a FIFO
/// queue until that transaction commits, rolls back or is abandoned. Transactions are therefore
/// serializable, and two orders racing for the last unit of a book can never both succeed.
///
/// # Writes and Rollback
/// Writes are applied to `rows` in place, so a transaction always reads its own earlier
/// changes. Before the first write to a row, its previous value is kept in the undo log.
/// Rollback restores those before-images; commit simply discards them. Committed reads
/// (`Get`, `List`) made while a transaction is open are served from the before-images, so
/// uncommitted state never leaks out.
///
/// ```rust
/// use record_store::StoreActor;
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StoreActor::new(32);
///     let handle = tokio::spawn(actor.run());
///
///     let tx = client.begin().await.unwrap();
///     tx.commit().await.unwrap();
///
///     drop(client);
///     handle.await.unwrap();
/// }
/// ```
pub struct StoreActor {
    receiver: mpsc::Receiver<StoreRequest>,
    rows: BTreeMap<RowKey, Value>,
    active: Option<ActiveTx>,
    waiting: VecDeque<Response<TxGrant>>,
    next_tx: u64,
}

impl StoreActor {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            rows: BTreeMap::new(),
            active: None,
            waiting: VecDeque::new(),
            next_tx: 1,
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the actor's event loop until every client (and transaction handle) is dropped.
    pub async fn run(mut self) {
        info!("Store started");

        loop {
            let event = match self.active.as_mut() {
                Some(tx) => tokio::select! {
                    biased;
                    msg = self.receiver.recv() => Event::Request(msg),
                    _ = &mut tx.abandoned => Event::Abandoned,
                },
                None => Event::Request(self.receiver.recv().await),
            };

            match event {
                Event::Request(Some(msg)) => self.handle(msg),
                Event::Request(None) => break,
                Event::Abandoned => {
                    warn!("Transaction handle dropped without commit");
                    self.rollback_active();
                    self.admit_next();
                }
            }
        }

        info!(rows = self.rows.len(), "Shutdown");
    }

    fn handle(&mut self, msg: StoreRequest) {
        match msg {
            StoreRequest::Begin { respond_to } => {
                if self.active.is_some() {
                    self.waiting.push_back(respond_to);
                    debug!(waiting = self.waiting.len(), "Begin queued");
                } else {
                    self.admit(respond_to);
                }
            }
            StoreRequest::Find {
                tx,
                key,
                respond_to,
            } => {
                let result = self.check(tx).map(|()| self.rows.get(&key).cloned());
                debug!(%tx, %key, found = matches!(result, Ok(Some(_))), "Find");
                let _ = respond_to.send(result);
            }
            StoreRequest::Save {
                tx,
                key,
                row,
                respond_to,
            } => {
                debug!(%tx, %key, ?row, "Save");
                let result = self.check(tx).map(|()| self.write(key, row));
                let _ = respond_to.send(result);
            }
            StoreRequest::Insert {
                tx,
                key,
                row,
                respond_to,
            } => {
                debug!(%tx, %key, ?row, "Insert");
                let result = self.check(tx).and_then(|()| {
                    if self.rows.contains_key(&key) {
                        warn!(%tx, %key, "Duplicate key");
                        return Err(StoreError::DuplicateKey {
                            table: key.table,
                            id: key.id,
                        });
                    }
                    self.write(key, row);
                    Ok(())
                });
                let _ = respond_to.send(result);
            }
            StoreRequest::Commit { tx, respond_to } => {
                let result = self.check(tx).map(|()| {
                    if let Some(active) = self.active.take() {
                        info!(%tx, touched = active.undo.len(), "Committed");
                    }
                });
                let _ = respond_to.send(result);
                self.admit_next();
            }
            StoreRequest::Rollback { tx, respond_to } => {
                let result = self.check(tx).map(|()| self.rollback_active());
                let _ = respond_to.send(result);
                self.admit_next();
            }
            StoreRequest::Get { key, respond_to } => {
                let row = self.committed(&key).cloned();
                debug!(%key, found = row.is_some(), "Get");
                let _ = respond_to.send(Ok(row));
            }
            StoreRequest::List { table, respond_to } => {
                let rows: Vec<Value> = self
                    .rows
                    .keys()
                    .filter(|key| key.table == table)
                    .filter_map(|key| self.committed(key).cloned())
                    .collect();
                debug!(table, size = rows.len(), "List");
                let _ = respond_to.send(Ok(rows));
            }
        }
    }

    fn check(&self, tx: TxId) -> Result<(), StoreError> {
        match &self.active {
            Some(active) if active.id == tx => Ok(()),
            _ => {
                warn!(%tx, "Request for inactive transaction");
                Err(StoreError::UnknownTransaction(tx))
            }
        }
    }

    fn write(&mut self, key: RowKey, row: Value) {
        if let Some(active) = self.active.as_mut() {
            if let Entry::Vacant(slot) = active.undo.entry(key.clone()) {
                slot.insert(self.rows.get(&key).cloned());
            }
        }
        self.rows.insert(key, row);
    }

    /// The last committed value of a row, ignoring writes of the active transaction.
    fn committed(&self, key: &RowKey) -> Option<&Value> {
        if let Some(before) = self.active.as_ref().and_then(|a| a.undo.get(key)) {
            return before.as_ref();
        }
        self.rows.get(key)
    }

    fn rollback_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        let tx = active.id;
        let touched = active.undo.len();
        for (key, before) in active.undo {
            match before {
                Some(row) => {
                    self.rows.insert(key, row);
                }
                None => {
                    self.rows.remove(&key);
                }
            }
        }
        info!(%tx, touched, "Rolled back");
    }

    /// Grants the store to a waiting `Begin`. Returns `false` if the caller already gave up.
    fn admit(&mut self, respond_to: Response<TxGrant>) -> bool {
        let id = TxId(self.next_tx);
        self.next_tx += 1;

        let (guard, abandoned) = oneshot::channel();
        if respond_to.send(Ok(TxGrant { id, guard })).is_err() {
            debug!(tx = %id, "Begin cancelled by caller");
            return false;
        }

        self.active = Some(ActiveTx {
            id,
            undo: HashMap::new(),
            abandoned,
        });
        debug!(tx = %id, "Begin");
        true
    }

    fn admit_next(&mut self) {
        if self.active.is_some() {
            return;
        }
        while let Some(respond_to) = self.waiting.pop_front() {
            if self.admit(respond_to) {
                break;
            }
        }
    }
}
