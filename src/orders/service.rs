use crate::model::{Book, Order, OrderId};
use crate::orders::OrderError;
use async_trait::async_trait;
use record_store::{RecordClient, StoreClient, StoreError, Transaction};
use tracing::{debug, info, instrument, warn};

/// Maximum total quantity a single order may request.
pub const MAX_ORDER_SIZE: u64 = 3;

/// Places orders: validates them, reserves stock for every line item and persists the order,
/// all inside one store transaction.
///
/// # All or Nothing
/// Size checks run before the store is touched. Stock is then checked and decremented item by
/// item in input order, so two items for the same book see each other's decrement. The first
/// failure rolls the whole transaction back: no book changes and no order row is written.
#[derive(Clone)]
pub struct OrderPlacementService {
    store: StoreClient,
}

impl OrderPlacementService {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    /// Places `order` and returns it with its creation timestamp set.
    ///
    /// # Errors
    /// - [`OrderError::EmptyOrder`] if `order` is `None` or requests nothing.
    /// - [`OrderError::TooLargeOrder`] if it requests more than [`MAX_ORDER_SIZE`] books.
    /// - [`OrderError::AlreadyPlaced`] if it was placed before.
    /// - [`OrderError::UnknownBook`] or [`OrderError::OutOfStock`] from the per-item scan.
    /// - [`OrderError::Store`] for any store failure, unchanged.
    #[instrument(skip(self, order), fields(order_id))]
    pub async fn place_order(&self, order: Option<Order>) -> Result<Order, OrderError> {
        let Some(mut order) = order else {
            warn!("Rejected absent order");
            return Err(OrderError::EmptyOrder);
        };
        tracing::Span::current().record("order_id", tracing::field::display(order.id));
        debug!(?order, "place_order called");

        if let Err(e) = validate(&order) {
            warn!(error = %e, "Rejected before stock check");
            return Err(e);
        }

        let tx = self.store.begin().await?;
        match reserve_and_insert(&tx, &mut order).await {
            Ok(()) => {
                tx.commit().await?;
                info!(size = order.size(), "Order placed");
                Ok(order)
            }
            Err(e) => {
                warn!(error = %e, "Order rejected, rolling back");
                if let Err(rollback) = tx.rollback().await {
                    warn!(error = %rollback, "Rollback failed");
                }
                Err(e)
            }
        }
    }

    /// Fetches a placed order.
    pub async fn find_order(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        self.get(id).await
    }

    /// Lists every placed order, oldest first.
    pub async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.list().await?;
        oldest_first(&mut orders);
        Ok(orders)
    }
}

/// Sorts by creation time, then by id for orders created at the same instant.
fn oldest_first(orders: &mut [Order]) {
    orders.sort_by_key(|order| (order.created_at(), order.id));
}

fn validate(order: &Order) -> Result<(), OrderError> {
    let size = order.size();
    if size == 0 {
        return Err(OrderError::EmptyOrder);
    }
    if size > MAX_ORDER_SIZE {
        return Err(OrderError::TooLargeOrder {
            size,
            max: MAX_ORDER_SIZE,
        });
    }
    if order.is_placed() {
        return Err(OrderError::AlreadyPlaced(order.id));
    }
    Ok(())
}

async fn reserve_and_insert(tx: &Transaction, order: &mut Order) -> Result<(), OrderError> {
    for item in order.items() {
        let book_id = item.book_id();
        let mut book: Book = tx
            .find_by_id::<Book>(&book_id)
            .await?
            .ok_or(OrderError::UnknownBook(book_id))?;
        book.reserve(item.quantity())?;
        tx.save(&book).await?;
        debug!(%book_id, requested = item.quantity(), remaining = book.available, "Reserved");
    }
    tx.insert(order).await?;
    Ok(())
}

#[async_trait]
impl RecordClient<Order> for OrderPlacementService {
    type Error = OrderError;

    fn store(&self) -> &StoreClient {
        &self.store
    }

    fn map_error(e: StoreError) -> Self::Error {
        OrderError::Store(e)
    }
}
