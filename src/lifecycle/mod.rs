//! Runtime orchestration and lifecycle management.
//!
//! - **Store lifecycle**: Starting the store actor, wiring clients to it, and shutting it down
//! - **Observability setup**: Initializing tracing and logging
//!
//! # Main Components
//!
//! - [`ShopSystem`] - Owns the store actor task and the clients built on top of it
//! - [`ShopConfig`] - Constructor-level configuration
//! - [`setup_tracing`] - Initializes the tracing/logging infrastructure

pub mod shop_system;
pub mod tracing;

pub use shop_system::*;
pub use tracing::*;
