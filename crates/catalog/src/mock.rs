//! In-memory catalog for testing.

use crate::catalog::MediaCatalog;
use crate::error::{ErrorKind, Result};
use crate::models::{MediaRecord, TenantId, TenantSummary};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};

/// In-memory [`MediaCatalog`] for testing.
///
/// Tenants are listed in ascending tenant id order, **not** by media count,
/// so callers that rely on count ordering have to impose it themselves.
/// Individual queries can be made to fail, and every tenant media query is
/// recorded so tests can assert on processing order.
///
/// # Examples
///
/// ```
/// use rehome_catalog::{MediaCatalog, MemoryCatalog, TenantId};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut catalog = MemoryCatalog::with_records([
///     ("msg-1", 3, "public/a.png"),
///     ("msg-2", 3, "public/b.png"),
///     ("msg-3", 9, "c.png"),
/// ])
/// .fail_tenant(TenantId(9));
///
/// assert_eq!(catalog.list_tenants_with_media().await.unwrap().len(), 2);
/// assert_eq!(catalog.list_media_for_tenant(TenantId(3)).await.unwrap().len(), 2);
/// assert!(catalog.list_media_for_tenant(TenantId(9)).await.is_err());
/// assert_eq!(catalog.queried(), &[TenantId(3), TenantId(9)]);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    records: BTreeMap<TenantId, Vec<MediaRecord>>,
    failing: HashSet<TenantId>,
    fail_discovery: bool,
    queried: Vec<TenantId>,
}

impl MemoryCatalog {
    /// Create a catalog pre-populated with `(message id, tenant id, media url)`
    /// records.
    pub fn with_records<'a>(records: impl IntoIterator<Item = (&'a str, u32, &'a str)>) -> Self {
        let mut catalog = Self::default();
        for (message_id, tenant_id, media_url) in records {
            catalog.insert(MediaRecord {
                message_id: message_id.to_string(),
                tenant_id: TenantId(tenant_id),
                media_url: media_url.to_string(),
            });
        }
        catalog
    }

    pub fn insert(&mut self, record: MediaRecord) {
        self.records.entry(record.tenant_id).or_default().push(record);
    }

    /// Make [`list_media_for_tenant`](MediaCatalog::list_media_for_tenant)
    /// fail for `tenant`.
    pub fn fail_tenant(mut self, tenant: TenantId) -> Self {
        self.failing.insert(tenant);
        self
    }

    /// Make [`list_tenants_with_media`](MediaCatalog::list_tenants_with_media)
    /// fail.
    pub fn fail_discovery(mut self) -> Self {
        self.fail_discovery = true;
        self
    }

    /// Tenants whose media was requested, in request order (failed requests
    /// included).
    pub fn queried(&self) -> &[TenantId] {
        &self.queried
    }
}

#[async_trait]
impl MediaCatalog for MemoryCatalog {
    async fn list_tenants_with_media(&mut self) -> Result<Vec<TenantSummary>> {
        if self.fail_discovery {
            exn::bail!(ErrorKind::Database);
        }
        Ok(self
            .records
            .iter()
            .map(|(tenant_id, records)| TenantSummary { tenant_id: *tenant_id, media_count: records.len() as u64 })
            .collect())
    }

    async fn list_media_for_tenant(&mut self, tenant: TenantId) -> Result<Vec<MediaRecord>> {
        self.queried.push(tenant);
        if self.failing.contains(&tenant) {
            exn::bail!(ErrorKind::Database);
        }
        Ok(self.records.get(&tenant).cloned().unwrap_or_default())
    }
}
