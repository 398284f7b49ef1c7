use crate::error::{ErrorKind, Result};
use crate::models::ResolvedPaths;
use crate::path::{resolve, tenant_dir};
use std::ffi::OsString;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tokio::fs;

/// The single top-level directory holding both the legacy flat files and
/// the per-tenant directories they are moved into.
#[derive(Debug, Clone)]
pub struct StorageRoot {
    root: PathBuf,
}
impl StorageRoot {
    /// Validates that `root` is an absolute path to an existing directory.
    ///
    /// Unlike tenant directories, the root is never created: if it's missing
    /// then the configuration is wrong.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_absolute() {
            exn::bail!(ErrorKind::InvalidPath(root));
        }
        // Non-async; it only happens once at startup.
        let metadata = std::fs::metadata(&root).map_err(|e| ErrorKind::from_io(e, &root))?;
        if !metadata.is_dir() {
            exn::bail!(ErrorKind::NotADirectory(root));
        }
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// `<root>/company<tenant>`
    pub fn tenant_dir(&self, tenant: impl Display) -> PathBuf {
        tenant_dir(&self.root, tenant)
    }

    /// See [`resolve`](crate::resolve).
    pub fn resolve(&self, media_url: &str, tenant_root: &Path) -> ResolvedPaths {
        resolve(media_url, &self.root, tenant_root)
    }

    /// Counts the entries directly inside the root, keeping the names of the
    /// first `preview` of them (in directory order).
    pub async fn survey(&self, preview: usize) -> Result<Survey> {
        let mut dir = fs::read_dir(&self.root).await.map_err(|e| ErrorKind::from_io(e, &self.root))?;
        let mut survey = Survey { entries: 0, preview: Vec::with_capacity(preview) };
        while let Some(entry) = dir.next_entry().await.map_err(|e| ErrorKind::from_io(e, &self.root))? {
            if survey.preview.len() < preview {
                survey.preview.push(entry.file_name());
            }
            survey.entries += 1;
        }
        Ok(survey)
    }
}

/// A shallow listing of the storage root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Survey {
    pub entries: usize,
    pub preview: Vec<OsString>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_absolute_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(StorageRoot::new(temp_dir.path()).is_ok());
        let err = StorageRoot::new("relative/path").unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidPath(_)));
    }

    #[test]
    fn test_new_requires_existing_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = StorageRoot::new(temp_dir.path().join("missing")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotFound(_)));
        let file = temp_dir.path().join("file");
        std::fs::write(&file, b"data").unwrap();
        let err = StorageRoot::new(&file).unwrap_err();
        assert!(matches!(&*err, ErrorKind::NotADirectory(_)));
    }

    #[test]
    fn test_tenant_dir_and_resolve() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = StorageRoot::new(temp_dir.path()).unwrap();
        let tenant_root = root.tenant_dir(7);
        assert_eq!(tenant_root, temp_dir.path().join("company7"));
        let resolved = root.resolve("https://host/public/company7/img/a.png", &tenant_root);
        assert_eq!(resolved.source, temp_dir.path().join("img/a.png"));
        assert_eq!(resolved.destination, temp_dir.path().join("company7/a.png"));
    }

    #[tokio::test]
    async fn test_survey() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = StorageRoot::new(temp_dir.path()).unwrap();
        assert_eq!(root.survey(5).await.unwrap(), Survey::default());
        for i in 0..7 {
            std::fs::write(temp_dir.path().join(format!("{i}.png")), b"data").unwrap();
        }
        std::fs::create_dir(temp_dir.path().join("company1")).unwrap();
        let survey = root.survey(5).await.unwrap();
        assert_eq!(survey.entries, 8);
        assert_eq!(survey.preview.len(), 5);
    }
}
