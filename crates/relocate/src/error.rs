//! Error types for relocation runs.
//!
//! Uses [`exn`] for automatic location tracking and error tree construction.
//! Only catalog and tenant-directory failures end up here; a file that
//! couldn't be moved is a [`RelocationOutcome::Failed`](rehome_storage::RelocationOutcome::Failed)
//! and is counted instead.

use derive_more::{Display, Error};
use rehome_catalog::TenantId;

/// A relocation error with automatic location tracking via [`exn::Exn`].
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for relocation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Classifies the origin of a relocation failure.
///
/// All of these stop at least the tenant they occurred in; [`Discovery`](Self::Discovery)
/// always stops the whole run.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The catalog couldn't list which tenants have media.
    #[display("could not list tenants with media")]
    Discovery,
    /// The catalog couldn't list a tenant's media records.
    #[display("could not list media for tenant {_0}")]
    TenantMedia(#[error(not(source))] TenantId),
    /// The tenant's destination directory couldn't be created.
    #[display("could not prepare directory for tenant {_0}")]
    TenantDirectory(#[error(not(source))] TenantId),
}
