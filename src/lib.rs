//! # Bookshop
//!
//! > **Order placement for a small book catalog, on top of an actor-owned record store.**
//!
//! Given a cart of line items (book + quantity), the [`OrderPlacementService`] validates the
//! order against size limits and stock availability, then atomically decrements inventory and
//! persists the order, or rejects the whole order.
//!
//! ## Core Concepts
//!
//! ### All-or-nothing placement
//! Every placement runs in a single [`record_store::Transaction`]. Stock is checked and
//! decremented line item by line item; the first failure rolls back every decrement made so
//! far and no order row is written.
//!
//! ### Serializable store
//! The record store admits one transaction at a time. Two orders racing for the last unit of
//! a book are therefore applied one after the other, and the second sees the first's
//! decrement.
//!
//! ### Type-safe errors
//! Business rejections ([`EmptyOrder`](orders::OrderError::EmptyOrder),
//! [`TooLargeOrder`](orders::OrderError::TooLargeOrder),
//! [`OutOfStock`](orders::OrderError::OutOfStock), ...) are distinct variants of
//! [`OrderError`](orders::OrderError). Store faults stay wrapped, unchanged, in
//! [`OrderError::Store`](orders::OrderError::Store).
//!
//! ## Module Tour
//!
//! - [`model`] - `Book`, `Order` and `LineItem`, with their UUID identities
//! - [`orders`] - [`OrderPlacementService`] and the order error taxonomy
//! - [`catalog`] - [`BookCatalog`](catalog::BookCatalog), adding books and checking stock
//! - [`lifecycle`] - [`ShopSystem`](lifecycle::ShopSystem) wiring and tracing setup
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Run the tests of every workspace member
//! cargo test --workspace
//! ```

pub mod catalog;
pub mod lifecycle;
pub mod model;
pub mod orders;

pub use orders::OrderPlacementService;
