//! # Store Messages
//!
//! This module defines the message types exchanged between the [`StoreClient`](crate::StoreClient)
//! (and its [`Transaction`](crate::Transaction) handles) and the [`StoreActor`](crate::StoreActor).

use crate::error::StoreError;
use crate::record::RowKey;
use serde_json::Value;
use std::fmt::Display;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Identifier of a store transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TxId(pub u64);

impl Display for TxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tx_{}", self.0)
    }
}

/// Handed to the client when its transaction becomes active.
///
/// The `guard` is the sending half of a channel the actor watches: when the client drops its
/// transaction without finishing it, the guard is dropped and the actor rolls back.
#[derive(Debug)]
pub struct TxGrant {
    pub id: TxId,
    pub guard: oneshot::Sender<()>,
}

/// Internal message type sent to the store actor.
///
/// # Transaction Scope
/// `Find`, `Save`, `Insert`, `Commit` and `Rollback` carry the id of the transaction they belong
/// to and are rejected unless that transaction is the active one. `Get` and `List` are
/// committed reads that run outside any transaction.
#[derive(Debug)]
pub enum StoreRequest {
    Begin {
        respond_to: Response<TxGrant>,
    },
    Find {
        tx: TxId,
        key: RowKey,
        respond_to: Response<Option<Value>>,
    },
    Save {
        tx: TxId,
        key: RowKey,
        row: Value,
        respond_to: Response<()>,
    },
    Insert {
        tx: TxId,
        key: RowKey,
        row: Value,
        respond_to: Response<()>,
    },
    Commit {
        tx: TxId,
        respond_to: Response<()>,
    },
    Rollback {
        tx: TxId,
        respond_to: Response<()>,
    },
    Get {
        key: RowKey,
        respond_to: Response<Option<Value>>,
    },
    List {
        table: &'static str,
        respond_to: Response<Vec<Value>>,
    },
}
