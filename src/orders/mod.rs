//! Order placement: the [`OrderPlacementService`] and its [`OrderError`] taxonomy.

pub mod entity;
pub mod error;
pub mod service;

pub use error::*;
pub use service::{OrderPlacementService, MAX_ORDER_SIZE};
