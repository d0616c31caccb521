//! [`Record`] implementation for the Order domain type.

use crate::model::{Order, OrderId};
use chrono::{DateTime, Utc};
use record_store::Record;

impl Record for Order {
    type Id = OrderId;
    const TABLE: &'static str = "orders";

    fn id(&self) -> &OrderId {
        &self.id
    }

    /// Stamps the creation time right before the order row is written.
    fn pre_persist(&mut self, now: DateTime<Utc>) {
        self.mark_created(now);
    }
}
