//! Media reference resolution.
//!
//! Stored references come in a few shapes: bare relative paths, absolute
//! paths or URLs that point somewhere inside a `public/` directory, and
//! references that still carry a `company<N>/` segment from an older
//! per-tenant layout. All of them resolve to a source beneath the storage
//! root and a destination directly inside the tenant's directory.
//!
//! Nothing in here touches the filesystem.

use crate::models::ResolvedPaths;
use regex::Regex;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

/// Tenant directories are named `<prefix><tenant id>`, e.g. `company7`.
pub const TENANT_DIR_PREFIX: &str = "company";

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Greedy: everything up to and including the *last* `/public/`.
regex!(PUBLIC_PREFIX_REGEX, r"^.*/public/");
regex!(LEGACY_TENANT_REGEX, r"company\d+/");

/// Strips the public prefix and the first stale tenant segment from a
/// stored media reference.
///
/// ```
/// use rehome_storage::clean_reference;
/// assert_eq!(clean_reference("https://cdn.example.com/public/company3/a.png"), "a.png");
/// assert_eq!(clean_reference("images/b.png"), "images/b.png");
/// ```
pub fn clean_reference(media_url: &str) -> String {
    let without_prefix = PUBLIC_PREFIX_REGEX.replace(media_url, "");
    LEGACY_TENANT_REGEX.replace(&without_prefix, "").into_owned()
}

/// Resolves a stored media reference into absolute source and destination
/// paths.
///
/// The source keeps whatever subdirectories remain after cleaning; the
/// destination keeps only the file name, so the tenant directory ends up
/// flat. Malformed references still resolve; at worst the source simply
/// won't exist.
pub fn resolve(media_url: &str, storage_root: &Path, tenant_root: &Path) -> ResolvedPaths {
    let cleaned = clean_reference(media_url);
    let components = normalize(Path::new(&cleaned));

    let mut source = storage_root.to_path_buf();
    source.extend(&components);
    let mut destination = tenant_root.to_path_buf();
    destination.extend(components.last());

    ResolvedPaths { source, destination }
}

/// Lexically normalizes a relative reference. Root and prefix components are
/// dropped so an absolute-looking reference can't replace the storage root,
/// and `..` never climbs above it.
fn normalize(path: &Path) -> Vec<&OsStr> {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(s) => components.push(s),
            Component::ParentDir => {
                components.pop();
            },
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {},
        }
    }
    components
}

/// The directory a tenant's media is moved into.
pub(crate) fn tenant_dir(storage_root: &Path, tenant: impl std::fmt::Display) -> PathBuf {
    storage_root.join(format!("{TENANT_DIR_PREFIX}{tenant}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/some/prefix/public/company7/images/a.png", "/root/images/a.png", "/root/company7/a.png")]
    #[case("relative/path/file.jpg", "/root/relative/path/file.jpg", "/root/company7/file.jpg")]
    #[case("https://cdn.example.com/public/photo.jpg", "/root/photo.jpg", "/root/company7/photo.jpg")]
    #[case("media/company12/voice.ogg", "/root/media/voice.ogg", "/root/company7/voice.ogg")]
    #[case("/srv/app/public/a/public/b.pdf", "/root/b.pdf", "/root/company7/b.pdf")]
    // Only the first stale segment goes.
    #[case("company3/company4/x.png", "/root/company4/x.png", "/root/company7/x.png")]
    // No leading slash, so `public/` is an ordinary directory.
    #[case("public/c.png", "/root/public/c.png", "/root/company7/c.png")]
    fn test_resolve(#[case] media_url: &str, #[case] source: &str, #[case] destination: &str) {
        let resolved = resolve(media_url, Path::new("/root"), Path::new("/root/company7"));
        assert_eq!(resolved.source, Path::new(source));
        assert_eq!(resolved.destination, Path::new(destination));
    }

    #[test]
    fn test_absolute_reference_stays_under_root() {
        let resolved = resolve("/etc/passwd", Path::new("/root"), Path::new("/root/company1"));
        assert_eq!(resolved.source, Path::new("/root/etc/passwd"));
        assert_eq!(resolved.destination, Path::new("/root/company1/passwd"));
    }

    #[test]
    fn test_traversal_is_clamped() {
        let resolved = resolve("../../secret/../key.pem", Path::new("/root"), Path::new("/root/company1"));
        assert_eq!(resolved.source, Path::new("/root/key.pem"));
        assert_eq!(resolved.destination, Path::new("/root/company1/key.pem"));
    }

    #[test]
    fn test_empty_reference() {
        let resolved = resolve("https://host/public/", Path::new("/root"), Path::new("/root/company1"));
        assert_eq!(resolved.source, Path::new("/root"));
        assert_eq!(resolved.destination, Path::new("/root/company1"));
    }

    #[test]
    fn test_clean_reference_is_deterministic() {
        let url = "/var/www/public/company9/docs/report.pdf";
        assert_eq!(clean_reference(url), "docs/report.pdf");
        assert_eq!(clean_reference(url), clean_reference(url));
    }

    #[test]
    fn test_tenant_dir() {
        assert_eq!(tenant_dir(Path::new("/root"), 42), Path::new("/root/company42"));
    }
}
