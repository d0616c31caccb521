//! # Record Store
//!
//! An in-memory, transactional record store run as a single Tokio actor. Records of any
//! serializable type live in named tables, and a [`Transaction`] groups reads and writes
//! across tables so they commit or roll back together.
//!
//! ## Architecture Overview
//!
//! 1. **Record Layer** ([`Record`]) - Your domain types, their table and their identity
//! 2. **Runtime Layer** ([`StoreActor`]) - Owns every row, applies requests sequentially
//! 3. **Interface Layer** ([`StoreClient`], [`Transaction`]) - Type-safe async API
//!
//! ## Isolation
//!
//! The actor admits **one transaction at a time**. Further `begin` calls queue in FIFO order
//! until the active transaction commits, rolls back, or is dropped. Transactions are therefore
//! serializable: a read-check-write sequence inside a transaction can never be interleaved with
//! another transaction's writes.
//!
//! Writes are applied in place and the first before-image of every touched row is kept in an
//! undo log. Committed reads ([`StoreClient::get`], [`StoreClient::list`]) are answered from
//! those before-images, so they never observe uncommitted state.
//!
//! ## Example
//!
//! ```rust
//! use record_store::{Record, StoreActor};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, Serialize, Deserialize)]
//! struct Shelf { id: u32, items: u32 }
//!
//! impl Record for Shelf {
//!     type Id = u32;
//!     const TABLE: &'static str = "shelves";
//!     fn id(&self) -> &u32 { &self.id }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, store) = StoreActor::new(16);
//!     tokio::spawn(actor.run());
//!
//!     let tx = store.begin().await.unwrap();
//!     tx.insert(&mut Shelf { id: 1, items: 5 }).await.unwrap();
//!     tx.commit().await.unwrap();
//!
//!     let shelf: Shelf = store.get(&1).await.unwrap().unwrap();
//!     assert_eq!(shelf.items, 5);
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockStore`] answers store requests from a queue of expectations, so code that drives
//! a transaction can be tested without a running actor. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;
pub mod transaction;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::RecordClient;
pub use error::StoreError;
pub use message::{Response, StoreRequest, TxGrant, TxId};
pub use record::{Record, RowKey};
pub use transaction::Transaction;
