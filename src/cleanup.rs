//! Removal of transient page images

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Outcome of a cleanup pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Files that were deleted
    pub removed: Vec<PathBuf>,
    /// Files that were already gone
    pub missing: Vec<PathBuf>,
    /// Files that could not be deleted
    pub failed: Vec<PathBuf>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Delete every existing file in `paths`
///
/// Never fails: a file that cannot be removed is logged and skipped.
pub fn cleanup_images<P: AsRef<Path>>(paths: &[P]) -> CleanupReport {
    let mut report = CleanupReport::default();

    for path in paths {
        let path = path.as_ref();

        if !path.exists() {
            report.missing.push(path.to_path_buf());
            continue;
        }

        match std::fs::remove_file(path) {
            Ok(()) => {
                debug!("Image `{}' successfully deleted", path.display());
                report.removed.push(path.to_path_buf());
            }
            Err(e) => {
                warn!("Error on remove `{}': {}", path.display(), e);
                report.failed.push(path.to_path_buf());
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_removes_existing_files() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("abc-1.png");
        let b = dir.path().join("abc-2.png");
        std::fs::write(&a, b"1").unwrap();
        std::fs::write(&b, b"2").unwrap();

        let report = cleanup_images(&[&a, &b]);
        assert_eq!(report.removed, vec![a.clone(), b.clone()]);
        assert!(report.is_clean());
        assert!(!a.exists());
        assert!(!b.exists());
    }

    #[test]
    fn test_missing_file_is_noop() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("gone.png");

        let report = cleanup_images(&[&gone]);
        assert_eq!(report.missing, vec![gone]);
        assert!(report.removed.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_continues_after_failure() {
        let dir = TempDir::new().unwrap();
        // remove_file refuses directories
        let stubborn = dir.path().join("abc-1.png");
        std::fs::create_dir(&stubborn).unwrap();
        let next = dir.path().join("abc-2.png");
        std::fs::write(&next, b"2").unwrap();

        let report = cleanup_images(&[&stubborn, &next]);
        assert_eq!(report.failed, vec![stubborn.clone()]);
        assert_eq!(report.removed, vec![next.clone()]);
        assert!(!report.is_clean());
        assert!(stubborn.exists());
        assert!(!next.exists());
    }
}
