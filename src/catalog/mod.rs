//! The book catalog: [`Book`](crate::model::Book) persistence and the [`BookCatalog`] client.

pub mod client;
pub mod entity;
pub mod error;

pub use client::BookCatalog;
pub use error::*;
