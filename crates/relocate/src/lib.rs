//! Tenant media relocation.
//!
//! Moves every media file the catalog knows about from wherever its stored
//! reference points (beneath the storage root) into `<root>/company<id>/`,
//! one tenant at a time, smallest tenant first.
//!
//! The primary entry point is [`relocate_all`], which enumerates tenants and
//! drives [`relocate_tenant`] over each of them. File-level problems are
//! counted, never raised; catalog failures are raised (see
//! [`TenantErrorPolicy`] for how a single tenant's failure is treated).

mod batch;
pub mod error;
mod stats;
mod tenant;

pub use crate::batch::relocate_all;
pub use crate::stats::{GlobalStats, Stats, TenantStats};
pub use crate::tenant::relocate_tenant;
use rehome_storage::StorageRoot;

/// What to do when one tenant can't be processed (its directory can't be
/// created, or its media can't be fetched).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize), serde(rename_all = "lowercase"))]
pub enum TenantErrorPolicy {
    /// Stop the whole run and return the error.
    #[default]
    Abort,
    /// Log the error, count the tenant as failed, and move on to the next one.
    Continue,
}

/// Settings shared by every tenant in a run.
#[derive(Debug, Clone)]
pub struct Context {
    pub root: StorageRoot,
    /// Check sources, but don't create directories or move anything.
    pub dry_run: bool,
    pub on_tenant_error: TenantErrorPolicy,
}
impl Context {
    pub fn new(root: StorageRoot) -> Self {
        Self { root, dry_run: false, on_tenant_error: TenantErrorPolicy::default() }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_tenant_error_policy(mut self, policy: TenantErrorPolicy) -> Self {
        self.on_tenant_error = policy;
        self
    }
}
