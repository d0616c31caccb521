//! # RecordClient Trait
//!
//! Provides a common interface for record-specific clients, adding default `get` and `list`
//! methods built on top of a shared [`StoreClient`].
use crate::{Record, StoreClient, StoreError};
use async_trait::async_trait;

/// Trait for record-specific clients to inherit standard read operations.
///
/// # Example
///
/// ```rust
/// use record_store::{Record, RecordClient, StoreActor, StoreClient, StoreError};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// struct Shelf { id: u32, label: String }
///
/// impl Record for Shelf {
///     type Id = u32;
///     const TABLE: &'static str = "shelves";
///     fn id(&self) -> &u32 { &self.id }
/// }
///
/// #[derive(Debug)]
/// struct ShelfError(String);
///
/// struct ShelfClient { store: StoreClient }
///
/// impl RecordClient<Shelf> for ShelfClient {
///     type Error = ShelfError;
///
///     fn store(&self) -> &StoreClient { &self.store }
///
///     fn map_error(e: StoreError) -> ShelfError { ShelfError(e.to_string()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, store) = StoreActor::new(8);
///     tokio::spawn(actor.run());
///     let shelves = ShelfClient { store };
///
///     // get() and list() are provided automatically
///     assert!(shelves.get(1).await.unwrap().is_none());
///     assert!(shelves.list().await.unwrap().is_empty());
/// }
/// ```
#[async_trait]
pub trait RecordClient<R: Record>: Send + Sync {
    /// The client-specific error type.
    type Error: Send;

    /// Access the underlying store client.
    fn store(&self) -> &StoreClient;

    /// Map store errors to the client-specific error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch the committed state of a record by id.
    #[tracing::instrument(skip(self), fields(table = R::TABLE))]
    async fn get(&self, id: R::Id) -> Result<Option<R>, Self::Error> {
        tracing::debug!("Sending request");
        self.store().get::<R>(&id).await.map_err(Self::map_error)
    }

    /// Fetch the committed state of every record of this type.
    #[tracing::instrument(skip(self), fields(table = R::TABLE))]
    async fn list(&self) -> Result<Vec<R>, Self::Error> {
        tracing::debug!("Sending request");
        self.store().list::<R>().await.map_err(Self::map_error)
    }
}
