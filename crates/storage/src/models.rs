//! Storage models.
//!
//! Values produced and consumed within a single relocation attempt. None of
//! them outlive the record they were derived from.

use crate::error::Error;
use std::path::PathBuf;

/// Where a media file currently lives and where it should end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Absolute path beneath the storage root.
    pub source: PathBuf,
    /// Absolute path directly inside the tenant's directory.
    pub destination: PathBuf,
}

/// Why a relocation was skipped rather than attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing exists at the source path. Already moved, purged, or never
    /// written in the first place.
    NotFound,
}

/// Result of one relocation attempt.
#[derive(Debug)]
pub enum RelocationOutcome {
    Moved,
    Skipped(SkipReason),
    /// The file was left where it was. Carries the filesystem error.
    Failed(Error),
}

/// What [`ensure_dir`](crate::ensure_dir) found (or did).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirState {
    /// The directory was already there.
    Existing,
    /// The directory (and any missing ancestors) had to be created.
    Created,
}
