//! Shared sync pipeline entrypoint: scan → substitute → atomic write.

use std::path::PathBuf;

use gallery_core::{GalleryConfig, Manifest};
use gallery_renderer::ManifestLocator;

use crate::writer::{atomic_write, read_target, WriteResult};
use crate::SyncError;

/// Outcome of one manifest regeneration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub target: PathBuf,
    pub manifest: Manifest,
    pub write: WriteResult,
}

impl SyncReport {
    /// Number of images embedded in the page.
    pub fn count(&self) -> usize {
        self.manifest.len()
    }
}

/// Regenerate the embedded manifest in `config`'s target page.
///
/// The target must exist and carry exactly one `<identifier> = [ ... ];`
/// literal; otherwise the page is left untouched and an error is returned.
pub fn run(config: &GalleryConfig, dry_run: bool) -> Result<SyncReport, SyncError> {
    let target = config.target_path();
    let current = read_target(&target)?;
    let manifest = gallery_scanner::scan(config)?;
    tracing::debug!(
        "scanned {} image(s) in {}",
        manifest.len(),
        config.image_dir.display()
    );

    let locator = ManifestLocator::new(&config.identifier)?;
    let substitution = locator.substitute(&current, &manifest)?;
    let write = atomic_write(&target, &substitution.content, Some(&current), dry_run)?;

    Ok(SyncReport {
        target,
        manifest,
        write,
    })
}
