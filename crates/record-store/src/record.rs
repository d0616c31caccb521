//! # Record Trait
//!
//! The `Record` trait is the contract every persisted type (Book, Order, ...) implements to be
//! stored by the [`StoreActor`](crate::StoreActor). It names the table the record lives in, how
//! its identifier is obtained, and provides the `pre_persist` hook that runs right before a new
//! row is written.
//!
//! # Architecture Note
//! The store itself never knows the concrete record types. Rows travel as
//! `serde_json::Value`, so one actor can own every table and a single transaction can span
//! several record types (e.g. decrement Books and insert an Order atomically).

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};

/// Trait that any persisted type must implement to be managed by the store.
///
/// # Ownership
/// A record is serialized as one unit. Child values it owns (for example the line items of an
/// order) are stored inside the parent row and can never outlive it.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The unique identifier for this record. Its `Display` form is the row key.
    type Id: Display + Debug + Clone + Send + Sync;

    /// Name of the table holding records of this type.
    const TABLE: &'static str;

    /// Returns the record identifier.
    fn id(&self) -> &Self::Id;

    /// Called exactly once, immediately before the record is inserted as a new row.
    ///
    /// The default implementation does nothing.
    fn pre_persist(&mut self, _now: DateTime<Utc>) {}
}

/// Key of a single row: table name plus the display form of the record id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowKey {
    pub table: &'static str,
    pub id: String,
}

impl RowKey {
    /// Builds the key under which a record of type `R` with the given id is stored.
    pub fn of<R: Record>(id: &R::Id) -> Self {
        Self {
            table: R::TABLE,
            id: id.to_string(),
        }
    }
}

impl Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.table, self.id)
    }
}
