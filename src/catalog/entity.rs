//! [`Record`] implementation for the Book domain type.

use crate::model::{Book, BookId};
use record_store::Record;

impl Record for Book {
    type Id = BookId;
    const TABLE: &'static str = "books";

    fn id(&self) -> &BookId {
        &self.id
    }
}
