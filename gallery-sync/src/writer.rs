//! Atomic page writer.
//!
//! ## `atomic_write` protocol
//!
//! 1. Compare the new content with what is on disk → skip if identical.
//! 2. Write to `<path>.gallery.tmp` in the same directory.
//! 3. Copy the original file's permissions onto the tmp file.
//! 4. Rename to the final path (atomic on POSIX).
//!
//! A crash at any point leaves either the old page or the new one, never a
//! truncated file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{io_err, SyncError};

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped: new content matches what is on disk.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

/// Sibling tmp path used while rewriting `path`.
pub fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".gallery.tmp");
    PathBuf::from(tmp)
}

// ---------------------------------------------------------------------------
// read_target
// ---------------------------------------------------------------------------

/// Read the page at `path`, mapping a missing file to
/// [`SyncError::TargetNotFound`].
pub fn read_target(path: &Path) -> Result<String, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == ErrorKind::NotFound => Err(SyncError::TargetNotFound {
            path: path.to_path_buf(),
        }),
        Err(err) => Err(io_err(path, err)),
    }
}

// ---------------------------------------------------------------------------
// atomic_write
// ---------------------------------------------------------------------------

/// Atomically replace `path` with `content`.
///
/// `current` is the text the caller last read from `path` (`None` when the
/// file does not exist yet). Returns [`WriteResult`] indicating whether the
/// file was written or skipped.
pub fn atomic_write(
    path: &Path,
    content: &str,
    current: Option<&str>,
    dry_run: bool,
) -> Result<WriteResult, SyncError> {
    atomic_write_with_tmp(path, content, current, dry_run, &tmp_path_for(path))
}

fn atomic_write_with_tmp(
    path: &Path,
    content: &str,
    current: Option<&str>,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, SyncError> {
    if current == Some(content) {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| io_err(parent, e))?;
    }

    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;

    if let Ok(meta) = std::fs::metadata(path) {
        if let Err(e) = std::fs::set_permissions(tmp, meta.permissions()) {
            let _ = std::fs::remove_file(tmp);
            return Err(io_err(tmp, e));
        }
    }

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn first_write_returns_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.html");
        let result = atomic_write(&path, "hello", None, false).unwrap();
        assert!(matches!(result, WriteResult::Written { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn same_content_returns_unchanged_and_keeps_mtime() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.html");
        fs::write(&path, "same").unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        let result = atomic_write(&path, "same", Some("same"), false).unwrap();
        assert!(matches!(result, WriteResult::Unchanged { .. }));
        let after = fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(before, after, "unchanged content must not touch the file");
    }

    #[test]
    fn changed_content_returns_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.html");
        fs::write(&path, "v1").unwrap();
        let result = atomic_write(&path, "v2", Some("v1"), false).unwrap();
        assert!(matches!(result, WriteResult::Written { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "v2");
    }

    #[test]
    fn dry_run_does_not_write_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.html");
        fs::write(&path, "old").unwrap();
        let result = atomic_write(&path, "new", Some("old"), true).unwrap();
        assert!(matches!(result, WriteResult::WouldWrite { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
        assert!(!tmp_path_for(&path).exists());
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.html");
        atomic_write(&path, "data", None, false).unwrap();
        assert!(!tmp_path_for(&path).exists(), ".gallery.tmp must be cleaned up");
    }

    #[test]
    #[cfg(unix)]
    fn permissions_of_original_are_kept() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("index.html");
        fs::write(&path, "v1").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        atomic_write(&path, "v2", Some("v1"), false).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[test]
    fn tmp_path_is_a_sibling_with_suffix() {
        let path = Path::new("site/index.html");
        assert_eq!(tmp_path_for(path), PathBuf::from("site/index.html.gallery.tmp"));
    }

    #[test]
    #[cfg(unix)]
    fn tmp_path_keeps_non_utf8_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"gal\xffery.html"));
        let tmp = tmp_path_for(path);
        assert_eq!(tmp.as_os_str().as_bytes(), b"gal\xffery.html.gallery.tmp");
    }

    #[test]
    fn read_missing_target_is_target_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = read_target(&tmp.path().join("absent.html")).unwrap_err();
        assert!(matches!(err, SyncError::TargetNotFound { .. }));
    }

    #[test]
    fn rename_failure_leaves_original_and_cleans_tmp() {
        let root = TempDir::new().unwrap();
        // A non-empty directory at the target path makes the rename fail
        // regardless of the caller's privileges.
        let path = root.path().join("index.html");
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("keep.txt"), "original").unwrap();

        let tmp_path = root.path().join("index.html.gallery.tmp");
        let err = atomic_write_with_tmp(&path, "new content", Some("original"), false, &tmp_path)
            .expect_err("rename over a directory should fail");
        assert!(matches!(err, SyncError::Io { .. }));

        assert_eq!(
            fs::read_to_string(path.join("keep.txt")).unwrap(),
            "original",
            "original should be intact"
        );
        assert!(!tmp_path.exists(), ".gallery.tmp should be cleaned up");
    }
}
