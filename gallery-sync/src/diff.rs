//! Dry-run unified diff support for `gallery diff`.

use std::path::PathBuf;

use similar::TextDiff;

use gallery_core::GalleryConfig;
use gallery_renderer::ManifestLocator;

use crate::{writer::read_target, SyncError};

/// What `sync` would change in the target page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDiff {
    pub path: PathBuf,
    /// Number of images the regenerated manifest would hold.
    pub count: usize,
    /// Unified diff, `None` when the page is already current.
    pub unified_diff: Option<String>,
}

/// Regenerate the page in memory and diff it against the file on disk.
///
/// No files are written.
pub fn diff_target(config: &GalleryConfig) -> Result<TargetDiff, SyncError> {
    let path = config.target_path();
    let current = read_target(&path)?;
    let manifest = gallery_scanner::scan(config)?;
    let substitution = ManifestLocator::new(&config.identifier)?.substitute(&current, &manifest)?;

    let unified_diff = if substitution.unchanged {
        None
    } else {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let old_header = format!("a/{name}");
        let new_header = format!("b/{name}");
        Some(
            TextDiff::from_lines(&current, &substitution.content)
                .unified_diff()
                .header(&old_header, &new_header)
                .context_radius(3)
                .to_string(),
        )
    };

    Ok(TargetDiff {
        path,
        count: substitution.count,
        unified_diff,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::pipeline;

    use super::*;

    fn setup(files: &[&str]) -> (TempDir, GalleryConfig) {
        let dir = TempDir::new().expect("dir");
        for f in files {
            fs::write(dir.path().join(f), b"\x89PNG\r\n\x1a\n").expect("image");
        }
        fs::write(
            dir.path().join("index.html"),
            "<script>\nconst images = [];\nshow(images);\n</script>\n",
        )
        .expect("page");
        let config = GalleryConfig {
            image_dir: dir.path().to_path_buf(),
            ..GalleryConfig::default()
        };
        (dir, config)
    }

    #[test]
    fn no_diff_after_clean_sync() {
        let (_dir, config) = setup(&["a.png"]);
        pipeline::run(&config, false).expect("sync");

        let diff = diff_target(&config).expect("diff");
        assert!(diff.unified_diff.is_none(), "synced page should have no diff");
        assert_eq!(diff.count, 1);
    }

    #[test]
    fn new_image_produces_unified_diff() {
        let (dir, config) = setup(&["a.png"]);
        pipeline::run(&config, false).expect("sync");
        fs::write(dir.path().join("b.png"), b"\x89PNG\r\n\x1a\n").expect("new image");

        let diff = diff_target(&config).expect("diff");
        let text = diff.unified_diff.expect("diff text");
        assert!(text.contains("--- a/index.html"));
        assert!(text.contains("+++ b/index.html"));
        assert!(text.contains("@@"));
        assert!(text.lines().any(|l| l.starts_with('+') && l.contains("\"b.png\"")));
        assert_eq!(diff.count, 2);
    }

    #[test]
    fn diff_writes_nothing() {
        let (dir, config) = setup(&["a.png"]);
        let before = fs::read(dir.path().join("index.html")).unwrap();
        let diff = diff_target(&config).expect("diff");
        assert!(diff.unified_diff.is_some());
        assert_eq!(fs::read(dir.path().join("index.html")).unwrap(), before);
    }
}
