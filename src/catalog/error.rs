//! Error types for the book catalog.

use crate::model::BookId;
use record_store::StoreError;
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The requested book was not found.
    #[error("Book not found: {0}")]
    NotFound(BookId),

    /// The record store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
