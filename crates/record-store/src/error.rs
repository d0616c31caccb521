//! # Store Errors
//!
//! Errors raised by the record store itself. These are infrastructure faults, never business
//! rejections: callers propagate them unchanged.

use crate::message::TxId;

/// Errors that can occur within the record store.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum StoreError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
    #[error("Duplicate key: {table}/{id}")]
    DuplicateKey { table: &'static str, id: String },
    #[error("Unknown transaction: {0}")]
    UnknownTransaction(TxId),
    #[error("Codec error: {0}")]
    Codec(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Codec(e.to_string())
    }
}
