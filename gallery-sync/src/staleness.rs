//! Staleness signal for `gallery check`.
//!
//! Signal precedence:
//! 1. `MissingTarget` (page does not exist)
//! 2. `MissingManifest` (no single locatable array literal)
//! 3. `Stale` (embedded array differs from a fresh scan)
//! 4. `Current`

use std::path::PathBuf;

use gallery_core::{GalleryConfig, ImageName};
use gallery_renderer::{ManifestLocator, RenderError};

use crate::{writer::read_target, SyncError};

/// Staleness classification of the target page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StalenessSignal {
    MissingTarget,
    MissingManifest { reason: String },
    /// `added` are on disk but not embedded; `removed` are embedded but gone
    /// from disk. Both empty means only the formatting differs.
    Stale {
        added: Vec<ImageName>,
        removed: Vec<ImageName>,
    },
    Current,
}

impl StalenessSignal {
    pub fn is_current(&self) -> bool {
        matches!(self, StalenessSignal::Current)
    }
}

/// Result of [`check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StalenessReport {
    pub target: PathBuf,
    /// Images found by the scan.
    pub scanned: usize,
    pub signal: StalenessSignal,
}

/// Compare the embedded manifest with a fresh scan without writing anything.
pub fn check(config: &GalleryConfig) -> Result<StalenessReport, SyncError> {
    let target = config.target_path();
    let manifest = gallery_scanner::scan(config)?;
    let scanned = manifest.len();
    let report = |signal| StalenessReport {
        target: target.clone(),
        scanned,
        signal,
    };

    let current = match read_target(&target) {
        Ok(text) => text,
        Err(SyncError::TargetNotFound { .. }) => return Ok(report(StalenessSignal::MissingTarget)),
        Err(err) => return Err(err),
    };

    let locator = ManifestLocator::new(&config.identifier)?;
    let substitution = match locator.substitute(&current, &manifest) {
        Ok(s) => s,
        Err(err @ (RenderError::ManifestNotFound { .. } | RenderError::AmbiguousManifest { .. })) => {
            return Ok(report(StalenessSignal::MissingManifest {
                reason: err.to_string(),
            }));
        }
        Err(err) => return Err(err.into()),
    };
    if substitution.unchanged {
        return Ok(report(StalenessSignal::Current));
    }

    let signal = match locator.decode(&current) {
        Ok(embedded) => StalenessSignal::Stale {
            added: manifest.missing_from(&embedded),
            removed: embedded.missing_from(&manifest),
        },
        Err(RenderError::UnreadableManifest { .. }) => StalenessSignal::Stale {
            added: Vec::new(),
            removed: Vec::new(),
        },
        Err(err) => return Err(err.into()),
    };
    Ok(report(signal))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use crate::pipeline;

    use super::*;

    fn setup(files: &[&str], page: Option<&str>) -> (TempDir, GalleryConfig) {
        let dir = TempDir::new().expect("dir");
        for f in files {
            fs::write(dir.path().join(f), b"\x89PNG\r\n\x1a\n").expect("image");
        }
        if let Some(page) = page {
            fs::write(dir.path().join("index.html"), page).expect("page");
        }
        let config = GalleryConfig {
            image_dir: dir.path().to_path_buf(),
            ..GalleryConfig::default()
        };
        (dir, config)
    }

    #[test]
    fn missing_page() {
        let (_dir, config) = setup(&["a.png"], None);
        let report = check(&config).expect("check");
        assert_eq!(report.signal, StalenessSignal::MissingTarget);
        assert_eq!(report.scanned, 1);
    }

    #[test]
    fn page_without_literal() {
        let (_dir, config) = setup(&["a.png"], Some("<p>nothing here</p>"));
        let report = check(&config).expect("check");
        assert!(matches!(
            report.signal,
            StalenessSignal::MissingManifest { .. }
        ));
    }

    #[test]
    fn current_after_sync() {
        let (_dir, config) = setup(&["a.png", "b.png"], Some("const images = [];"));
        pipeline::run(&config, false).expect("sync");
        assert!(check(&config).expect("check").signal.is_current());
    }

    #[test]
    fn stale_lists_added_and_removed() {
        let (dir, config) = setup(&["a.png", "b.png"], Some("const images = [];"));
        pipeline::run(&config, false).expect("sync");
        fs::remove_file(dir.path().join("a.png")).expect("rm");
        fs::write(dir.path().join("c.png"), b"\x89PNG\r\n\x1a\n").expect("add");

        let report = check(&config).expect("check");
        assert_eq!(
            report.signal,
            StalenessSignal::Stale {
                added: vec![ImageName::from("c.png")],
                removed: vec![ImageName::from("a.png")],
            }
        );
    }

    #[test]
    fn formatting_only_drift_is_stale_without_names() {
        let (_dir, config) = setup(&["a.png"], Some("const images = [\"a.png\"];"));
        let report = check(&config).expect("check");
        assert_eq!(
            report.signal,
            StalenessSignal::Stale {
                added: vec![],
                removed: vec![],
            }
        );
    }

    #[test]
    fn hand_edited_literal_is_stale() {
        let (_dir, config) = setup(&["a.png"], Some("const images = ['a.png',];"));
        let report = check(&config).expect("check");
        assert!(matches!(report.signal, StalenessSignal::Stale { .. }));
    }
}
