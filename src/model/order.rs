use super::{BookId, LineItemId, OrderId};
use crate::orders::OrderError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer's request for specific quantities of specific books.
///
/// An order is built empty by the caller, filled through [`add_item`](Self::add_item) and then
/// handed to
/// [`OrderPlacementService::place_order`](crate::orders::OrderPlacementService::place_order).
/// The creation timestamp is only set when the order is inserted into the store, after which
/// the order is placed and can no longer change.
///
/// # Ownership
/// The order owns its line items exclusively. They are stored inside the order row and can
/// only be created through the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    items: Vec<LineItem>,
    created_at: Option<DateTime<Utc>>,
}

/// One (book, quantity) pairing within an [`Order`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    id: LineItemId,
    book_id: BookId,
    quantity: u32,
}

impl LineItem {
    pub fn id(&self) -> LineItemId {
        self.id
    }

    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}

impl Order {
    /// Creates an empty, unplaced order with a freshly generated id.
    pub fn new() -> Self {
        Self {
            id: OrderId::new(),
            items: Vec::new(),
            created_at: None,
        }
    }

    /// Appends a line item. Items keep the order in which they were added.
    ///
    /// # Errors
    /// - [`OrderError::InvalidQuantity`] if `quantity` is zero.
    /// - [`OrderError::AlreadyPlaced`] if the order has already been placed.
    pub fn add_item(&mut self, book_id: BookId, quantity: u32) -> Result<LineItemId, OrderError> {
        if self.is_placed() {
            return Err(OrderError::AlreadyPlaced(self.id));
        }
        if quantity == 0 {
            return Err(OrderError::InvalidQuantity(quantity));
        }
        let item = LineItem {
            id: LineItemId::new(),
            book_id,
            quantity,
        };
        let id = item.id;
        self.items.push(item);
        Ok(id)
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Total requested quantity across all line items.
    pub fn size(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn is_placed(&self) -> bool {
        self.created_at.is_some()
    }

    pub(crate) fn mark_created(&mut self, now: DateTime<Utc>) {
        self.created_at = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_sums_quantities() {
        let mut order = Order::new();
        assert_eq!(order.size(), 0);

        let book = BookId::new();
        let first = order.add_item(book, 2).unwrap();
        let second = order.add_item(BookId::new(), 1).unwrap();
        let third = order.add_item(book, 1).unwrap();

        assert_eq!(order.size(), 4);
        let ids: Vec<LineItemId> = order.items().iter().map(LineItem::id).collect();
        assert_eq!(ids, vec![first, second, third]);
        assert_ne!(first, third);
        assert_eq!(order.items()[0].book_id(), book);
        assert_eq!(order.items()[2].quantity(), 1);
    }

    #[test]
    fn test_size_does_not_overflow() {
        let mut order = Order::new();
        order.add_item(BookId::new(), u32::MAX).unwrap();
        order.add_item(BookId::new(), u32::MAX).unwrap();
        assert_eq!(order.size(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_add_item_rejects_zero_quantity() {
        let mut order = Order::new();
        assert_eq!(
            order.add_item(BookId::new(), 0),
            Err(OrderError::InvalidQuantity(0))
        );
        assert!(order.items().is_empty());
    }

    #[test]
    fn test_placed_order_is_frozen() {
        let mut order = Order::new();
        order.add_item(BookId::new(), 1).unwrap();
        order.mark_created(Utc::now());

        assert!(order.is_placed());
        assert_eq!(
            order.add_item(BookId::new(), 1),
            Err(OrderError::AlreadyPlaced(order.id))
        );
        assert_eq!(order.size(), 1);
    }

    #[test]
    fn test_new_orders_get_distinct_ids() {
        assert_ne!(Order::new().id, Order::new().id);
    }
}
