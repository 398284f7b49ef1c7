use crate::Context;
use crate::error::{ErrorKind, Result};
use crate::stats::{Stats, TenantStats};
use exn::ResultExt;
use rehome_catalog::{MediaCatalog, MediaRecord, TenantId};
use rehome_storage::{DirState, RelocationOutcome, ResolvedPaths, SkipReason, ensure_dir, relocate};
use tracing::instrument;

/// Moves every media file recorded for `tenant` into its tenant directory.
///
/// 1. Ensure `<root>/company<tenant>` exists (skipped in a dry run).
/// 2. Fetch the tenant's media records from the `catalog`.
/// 3. Resolve and relocate each record in turn, counting the outcomes.
///
/// # Errors
/// [`ErrorKind::TenantDirectory`] if the tenant directory can't be created,
/// [`ErrorKind::TenantMedia`] if the records can't be fetched. Either way no
/// file of this tenant has been touched. Failures moving individual files
/// are counted in [`Stats::failed`] and never abort the loop.
#[instrument("relocating tenant", skip_all, fields(tenant = %tenant))]
pub async fn relocate_tenant<C: MediaCatalog + ?Sized>(
    catalog: &mut C,
    ctx: &Context,
    tenant: TenantId,
) -> Result<TenantStats> {
    let tenant_root = ctx.root.tenant_dir(tenant);
    if !ctx.dry_run {
        let state = ensure_dir(&tenant_root).await.or_raise(|| ErrorKind::TenantDirectory(tenant))?;
        if state == DirState::Created {
            tracing::info!(path = %tenant_root.display(), "Created tenant directory");
        }
    }

    let records = catalog.list_media_for_tenant(tenant).await.or_raise(|| ErrorKind::TenantMedia(tenant))?;
    tracing::info!(records = records.len(), "Found media records");

    let mut stats = TenantStats::default();
    for record in &records {
        let paths = ctx.root.resolve(&record.media_url, &tenant_root);
        let outcome = relocate(&paths, ctx.dry_run).await;
        log_outcome(record, &paths, &outcome);
        stats = stats + Stats::from(&outcome);
    }

    tracing::info!(
        moved = stats.moved(),
        failed = stats.failed(),
        skipped = stats.skipped(),
        total = stats.total(),
        "Tenant complete"
    );
    Ok(stats)
}

fn log_outcome(record: &MediaRecord, paths: &ResolvedPaths, outcome: &RelocationOutcome) {
    let source = paths.source.display();
    let destination = paths.destination.display();
    match outcome {
        RelocationOutcome::Moved => {
            tracing::info!(message_id = %record.message_id, %source, %destination, "Moved file");
        },
        RelocationOutcome::Skipped(SkipReason::NotFound) => {
            tracing::info!(message_id = %record.message_id, %source, "Source file not found; skipping");
        },
        RelocationOutcome::Failed(e) => {
            tracing::warn!(message_id = %record.message_id, %source, %destination, error = ?e, "Failed to move file");
        },
    }
}
