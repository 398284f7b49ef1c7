use crate::error::{ErrorKind, Result};
use crate::stats::GlobalStats;
use crate::tenant::relocate_tenant;
use crate::{Context, TenantErrorPolicy};
use exn::ResultExt;
use rehome_catalog::MediaCatalog;
use tracing::instrument;

/// Relocates the media of every tenant the `catalog` reports, smallest
/// tenant (by media count) first, and adds up the results.
///
/// Tenants are processed strictly one after another. When a tenant fails
/// (see [`relocate_tenant`]) the run either stops there with that tenant's
/// error, or logs it and carries on, depending on
/// [`Context::on_tenant_error`].
///
/// # Errors
/// [`ErrorKind::Discovery`] if the tenants can't be listed. Under
/// [`TenantErrorPolicy::Abort`], the first tenant failure; no later tenant is
/// touched.
#[instrument("relocating all tenants", skip_all, fields(dry_run = ctx.dry_run))]
pub async fn relocate_all<C: MediaCatalog + ?Sized>(catalog: &mut C, ctx: &Context) -> Result<GlobalStats> {
    let mut tenants = catalog.list_tenants_with_media().await.or_raise(|| ErrorKind::Discovery)?;
    // Stable: tenants with equal counts keep the catalog's order.
    tenants.sort_by_key(|summary| summary.media_count);
    let count = tenants.len();
    tracing::info!(tenants = count, "Found tenants with media");

    let mut global = GlobalStats::default();
    for (position, summary) in tenants.iter().enumerate() {
        tracing::info!(
            tenant = %summary.tenant_id,
            media = summary.media_count,
            "Processing tenant {} of {}",
            position + 1,
            count
        );
        match relocate_tenant(catalog, ctx, summary.tenant_id).await {
            Ok(stats) => global = global.with_tenant(stats),
            Err(e) if ctx.on_tenant_error == TenantErrorPolicy::Continue => {
                tracing::error!(tenant = %summary.tenant_id, error = ?e, "Tenant failed; continuing with the next one");
                global = global.with_failed_tenant();
            },
            Err(e) => return Err(e),
        }
    }
    Ok(global)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehome_catalog::{MediaRecord, MemoryCatalog, TenantId};
    use rehome_storage::StorageRoot;
    use std::fs;
    use std::path::Path;

    /// Tenant `n` gets `counts[n - 1]` records; every other record has a
    /// file on disk, the rest are missing.
    fn setup(root: &Path, counts: &[u64]) -> MemoryCatalog {
        let mut catalog = MemoryCatalog::default();
        for (tenant, count) in (1..).zip(counts) {
            for i in 0..*count {
                let name = format!("t{tenant}-{i}.png");
                if i % 2 == 0 {
                    fs::write(root.join(&name), b"media").unwrap();
                }
                catalog.insert(MediaRecord {
                    message_id: format!("{tenant}-{i}"),
                    tenant_id: TenantId(tenant),
                    media_url: format!("https://app.example.com/public/{name}"),
                });
            }
        }
        catalog
    }

    fn context(root: &Path) -> Context {
        Context::new(StorageRoot::new(root).unwrap())
    }

    #[tokio::test]
    async fn test_smallest_tenant_first() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut catalog = setup(temp_dir.path(), &[50, 3, 20]);

        let global = relocate_all(&mut catalog, &context(temp_dir.path())).await.unwrap();
        assert_eq!(catalog.queried(), &[TenantId(2), TenantId(3), TenantId(1)]);
        assert_eq!(global.tenants, 3);
        assert_eq!(global.tenants_failed, 0);
    }

    #[tokio::test]
    async fn test_counts_are_conserved() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut catalog = setup(temp_dir.path(), &[5, 8, 1]);

        let global = relocate_all(&mut catalog, &context(temp_dir.path())).await.unwrap();
        let files = global.files;
        assert_eq!(files.total(), 14);
        assert_eq!(files.moved() + files.failed() + files.skipped(), files.total());
        // Even indices have files: 3 + 4 + 1.
        assert_eq!(files.moved(), 8);
        assert_eq!(fs::read_dir(temp_dir.path().join("company2")).unwrap().count(), 4);
    }

    #[tokio::test]
    async fn test_rerun_moves_nothing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut catalog = setup(temp_dir.path(), &[4, 2]);
        let ctx = context(temp_dir.path());

        relocate_all(&mut catalog, &ctx).await.unwrap();
        let second = relocate_all(&mut catalog, &ctx).await.unwrap();
        assert_eq!(second.files.moved(), 0);
        assert_eq!(second.files.skipped(), second.files.total());
        assert_eq!(second.files.total(), 6);
    }

    #[tokio::test]
    async fn test_tenant_failure_aborts_run() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut catalog = setup(temp_dir.path(), &[50, 3, 20]).fail_tenant(TenantId(3));

        let err = relocate_all(&mut catalog, &context(temp_dir.path())).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::TenantMedia(TenantId(3))));
        assert_eq!(catalog.queried(), &[TenantId(2), TenantId(3)]);
        assert!(temp_dir.path().join("t1-0.png").exists());
        assert!(!temp_dir.path().join("company1").exists());
    }

    #[tokio::test]
    async fn test_tenant_failure_can_be_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut catalog = setup(temp_dir.path(), &[50, 3, 20]).fail_tenant(TenantId(3));
        let ctx = context(temp_dir.path()).with_tenant_error_policy(TenantErrorPolicy::Continue);

        let global = relocate_all(&mut catalog, &ctx).await.unwrap();
        assert_eq!(catalog.queried(), &[TenantId(2), TenantId(3), TenantId(1)]);
        assert_eq!(global.tenants, 2);
        assert_eq!(global.tenants_failed, 1);
        assert_eq!(global.files.total(), 53);
        assert!(temp_dir.path().join("t3-0.png").exists());
    }

    #[tokio::test]
    async fn test_discovery_failure_is_fatal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let ctx = context(temp_dir.path()).with_tenant_error_policy(TenantErrorPolicy::Continue);
        let mut catalog = setup(temp_dir.path(), &[1]).fail_discovery();

        let err = relocate_all(&mut catalog, &ctx).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Discovery));
        assert!(catalog.queried().is_empty());
    }

    #[tokio::test]
    async fn test_no_tenants() {
        let temp_dir = tempfile::tempdir().unwrap();
        let global = relocate_all(&mut MemoryCatalog::default(), &context(temp_dir.path())).await.unwrap();
        assert_eq!(global, GlobalStats::default());
    }
}
