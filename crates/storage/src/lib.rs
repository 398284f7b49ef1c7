//! Filesystem side of media relocation.
//!
//! Three pieces, leaf to root:
//! - [`resolve`] turns a stored media reference into a [`ResolvedPaths`]
//!   pair without touching the disk.
//! - [`ensure_dir`] creates a directory tree if it is missing.
//! - [`relocate`] moves one file, classifying the result as a
//!   [`RelocationOutcome`].
//!
//! [`StorageRoot`] ties them to one validated top-level directory.

pub mod error;
mod local;
mod models;
mod path;
mod root;

pub use crate::local::{ensure_dir, relocate};
pub use crate::models::{DirState, RelocationOutcome, ResolvedPaths, SkipReason};
pub use crate::path::{TENANT_DIR_PREFIX, clean_reference, resolve};
pub use crate::root::{StorageRoot, Survey};
