use crate::catalog::CatalogError;
use crate::model::{Book, BookCreate, BookId};
use async_trait::async_trait;
use record_store::{RecordClient, StoreClient, StoreError};
use tracing::{debug, info, instrument};

/// Client for the books stored in the record store.
///
/// `get` and `list` come from [`RecordClient`].
#[derive(Clone)]
pub struct BookCatalog {
    store: StoreClient,
}

impl BookCatalog {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    /// Adds a book with its initial stock and returns the generated id.
    #[instrument(skip(self))]
    pub async fn add_book(&self, params: BookCreate) -> Result<BookId, CatalogError> {
        debug!("Sending request");
        let mut book = Book::new(params.title, params.available);
        let tx = self.store.begin().await?;
        tx.insert(&mut book).await?;
        tx.commit().await?;
        info!(book_id = %book.id, available = book.available, "Book added");
        Ok(book.id)
    }

    /// Returns the committed stock level of a book.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: BookId) -> Result<u32, CatalogError> {
        self.get(id)
            .await?
            .map(|book| book.available)
            .ok_or(CatalogError::NotFound(id))
    }
}

#[async_trait]
impl RecordClient<Book> for BookCatalog {
    type Error = CatalogError;

    fn store(&self) -> &StoreClient {
        &self.store
    }

    fn map_error(e: StoreError) -> Self::Error {
        CatalogError::Store(e)
    }
}
