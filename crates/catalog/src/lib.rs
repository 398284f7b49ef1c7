//! Read-only access to the messaging platform's media records.
//!
//! The database is the source of truth for which media files exist and which
//! tenant each belongs to. Nothing in this crate writes to it.
//!
//! Consumers talk to a [`MediaCatalog`]. In production that's a [`Session`]
//! checked out from a [`Database`]: one connection, held for the whole run,
//! released when the session is dropped.

mod catalog;
mod db;
pub mod error;
#[cfg(feature = "mock")]
mod mock;
mod models;

pub use crate::catalog::MediaCatalog;
pub use crate::db::{Database, Session};
#[cfg(feature = "mock")]
pub use crate::mock::MemoryCatalog;
pub use crate::models::{MediaRecord, TenantId, TenantSummary};
