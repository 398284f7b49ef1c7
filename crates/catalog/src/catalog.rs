use crate::error::Result;
use crate::models::{MediaRecord, TenantId, TenantSummary};
use async_trait::async_trait;

/// The two read queries relocation depends on.
///
/// Methods take `&mut self`: a catalog is a single session, and queries on
/// it run one after another.
#[async_trait]
pub trait MediaCatalog: Send {
    /// Every tenant with at least one non-null media reference, along with
    /// how many it has, smallest first.
    async fn list_tenants_with_media(&mut self) -> Result<Vec<TenantSummary>>;

    /// Every media record for `tenant` with a non-null media reference, in
    /// whatever order the database returns them.
    async fn list_media_for_tenant(&mut self, tenant: TenantId) -> Result<Vec<MediaRecord>>;
}
