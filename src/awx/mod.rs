//! AWX API client module
//!
//! This module provides the client, the lazy pagination machinery and the
//! typed managers built on top of it.

mod client;
mod entity;
mod filter;
mod locator;
mod manager;
mod pagination;
pub mod resources;
#[cfg(test)]
pub(crate) mod testing;
mod transport;

pub use client::{Auth, AwxClient, HttpTransport};
pub use entity::{Entity, EntityType, FieldKind, FieldSpec};
pub use filter::Filter;
pub use locator::Locator;
pub use manager::{EntityCursor, EntityManager, Patch, Resource};
pub use pagination::{Page, Record, RecordCursor};
pub use transport::{Method, Transport, TransportResponse};
