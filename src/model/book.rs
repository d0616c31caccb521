use super::BookId;
use crate::orders::OrderError;
use serde::{Deserialize, Serialize};

/// A book in the catalog together with its available stock.
///
/// # Record Store
/// This struct implements the [`Record`](record_store::Record) trait (table `books`), see
/// [`crate::catalog`]. Order placement only ever reads a book and decrements `available`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub available: u32,
}

impl Book {
    /// Creates a new Book with a freshly generated id.
    pub fn new(title: impl Into<String>, available: u32) -> Self {
        Self {
            id: BookId::new(),
            title: title.into(),
            available,
        }
    }

    /// Takes `quantity` units out of the available stock.
    ///
    /// Fails with [`OrderError::OutOfStock`] and leaves the book untouched when fewer than
    /// `quantity` units are available.
    pub fn reserve(&mut self, quantity: u32) -> Result<(), OrderError> {
        if self.available < quantity {
            return Err(OrderError::OutOfStock {
                book_id: self.id,
                requested: quantity,
                available: self.available,
            });
        }
        self.available -= quantity;
        Ok(())
    }
}

/// DTO for adding a book to the catalog.
#[derive(Debug, Clone)]
pub struct BookCreate {
    pub title: String,
    pub available: u32,
}
