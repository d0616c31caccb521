//! Error types for order placement.

use crate::model::{BookId, OrderId};
use record_store::StoreError;
use thiserror::Error;

/// Errors that can occur while building or placing an order.
///
/// Every variant except [`Store`](OrderError::Store) is a business rejection: deterministic for a
/// given order and stock level, and never partially applied.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The order is absent or requests no books at all.
    #[error("Order is empty")]
    EmptyOrder,

    /// The order requests more books than a single order may contain.
    #[error("Order too large: {size} books requested, at most {max} allowed")]
    TooLargeOrder { size: u64, max: u64 },

    /// A line item asks for more units than the book has left.
    #[error("Out of stock: book {book_id} requested {requested}, available {available}")]
    OutOfStock {
        book_id: BookId,
        requested: u32,
        available: u32,
    },

    /// A line item references a book that is not in the catalog.
    #[error("Unknown book: {0}")]
    UnknownBook(BookId),

    /// The order was already placed and cannot be placed or changed again.
    #[error("Order already placed: {0}")]
    AlreadyPlaced(OrderId),

    /// A line item quantity must be positive.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// The record store failed. Propagated unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),
}
