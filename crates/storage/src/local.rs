//! Local filesystem operations.
//!
//! Everything here goes through `tokio::fs` and is awaited one call at a
//! time; nothing is spawned or run concurrently.

use crate::error::{ErrorKind, Result};
use crate::models::{DirState, RelocationOutcome, ResolvedPaths, SkipReason};
use std::path::Path;
use tokio::fs;

/// Creates `dir` and any missing ancestors, unless it already exists.
///
/// Safe to call repeatedly for the same path. Fails with
/// [`ErrorKind::NotADirectory`] if something other than a directory is in
/// the way; nothing is retried.
pub async fn ensure_dir(dir: &Path) -> Result<DirState> {
    match fs::metadata(dir).await {
        Ok(metadata) if metadata.is_dir() => return Ok(DirState::Existing),
        Ok(_) => exn::bail!(ErrorKind::NotADirectory(dir.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {},
        Err(e) => exn::bail!(ErrorKind::from_io(e, dir)),
    }
    // `create_dir_all` tolerates another caller winning the race.
    fs::create_dir_all(dir).await.map_err(|e| ErrorKind::from_io(e, dir))?;
    tracing::debug!(path = %dir.display(), "Created directory");
    Ok(DirState::Created)
}

/// Moves `paths.source` to `paths.destination` with a single rename.
///
/// - Missing source: [`RelocationOutcome::Skipped`], nothing is created.
/// - Destination directory can't be created, or the rename fails:
///   [`RelocationOutcome::Failed`], the source is left untouched.
///
/// With `dry_run`, an existing source is reported as
/// [`RelocationOutcome::Moved`] without modifying anything.
///
/// An existing file at the destination is replaced (on Unix). Two
/// references sharing a file name in different directories therefore both
/// count as moved, and the later one wins.
pub async fn relocate(paths: &ResolvedPaths, dry_run: bool) -> RelocationOutcome {
    match relocate_inner(paths, dry_run).await {
        Ok(outcome) => outcome,
        Err(e) => RelocationOutcome::Failed(e),
    }
}

async fn relocate_inner(paths: &ResolvedPaths, dry_run: bool) -> Result<RelocationOutcome> {
    let ResolvedPaths { source, destination } = paths;
    if !fs::try_exists(source).await.map_err(|e| ErrorKind::from_io(e, source))? {
        return Ok(RelocationOutcome::Skipped(SkipReason::NotFound));
    }
    if dry_run {
        return Ok(RelocationOutcome::Moved);
    }
    if let Some(parent) = destination.parent() {
        ensure_dir(parent).await?;
    }
    // No copy-then-delete fallback: a cross-device move fails instead of
    // leaving a half-written destination behind.
    fs::rename(source, destination).await.map_err(|e| ErrorKind::from_io(e, destination))?;
    Ok(RelocationOutcome::Moved)
}
