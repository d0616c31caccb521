//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//! It uses a compact format that hides the module prefix (`with_target(false)`); the
//! structured fields (`tx`, `table`, `id`, `order_id`, `book_id`) carry the context instead.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Placements, commits and rejections
//! RUST_LOG=info cargo run
//!
//! # Full payloads and every store request
//! RUST_LOG=debug cargo run
//!
//! # Only the store
//! RUST_LOG=record_store=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**, an accepted order followed by a rejected one:
//!
//! ```text
//! INFO place_order: Committed tx=tx_4 touched=2
//! INFO place_order: Order placed order_id=6f1c... size=1
//! WARN place_order: Order rejected, rolling back order_id=0b7e... error=Out of stock: ...
//! INFO place_order: Rolled back tx=tx_5 touched=0
//! ```
//!
//! **With `RUST_LOG=debug`** the same placement also shows the payload once at entry and
//! every store round trip:
//!
//! ```text
//! DEBUG place_order: place_order called order_id=6f1c... order=Order { .. }
//! DEBUG place_order: Begin tx=tx_4
//! DEBUG place_order:find_by_id: Find tx=tx_4 key=books/9a2d... found=true
//! DEBUG place_order: Reserved order_id=6f1c... book_id=9a2d... requested=1 remaining=0
//! ```

/// Installs the global `tracing` subscriber, filtered by `RUST_LOG`.
///
/// Does nothing if a subscriber is already installed.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}
