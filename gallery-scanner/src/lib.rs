//! Image discovery for `gallery-scanner`.
//!
//! `scan(config)` lists the image directory (non-recursive) and returns every
//! regular file whose suffix matches the configured extensions, sorted into a
//! [`Manifest`]. Hidden files and names that are not valid UTF-8 are skipped.
//! Empty files and `.png` files without the PNG signature (typically an HTML
//! error page saved under an image name) are skipped with a warning.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use gallery_core::{GalleryConfig, ImageName, Manifest};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A matched image plus the metadata `gallery list` shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedImage {
    pub name: ImageName,
    pub path: PathBuf,
    pub size_bytes: u64,
}

/// Errors from directory scanning.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image directory '{path}' does not exist or is not a directory")]
    NotADirectory { path: PathBuf },
}

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ScanError {
    ScanError::Io {
        path: path.into(),
        source,
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the manifest for `config.image_dir`.
pub fn scan(config: &GalleryConfig) -> Result<Manifest, ScanError> {
    Ok(scan_detailed(config)?
        .into_iter()
        .map(|image| image.name)
        .collect())
}

/// Like [`scan`], but keeps per-file metadata. Results are sorted by name.
pub fn scan_detailed(config: &GalleryConfig) -> Result<Vec<ScannedImage>, ScanError> {
    let dir = config.image_dir.as_path();
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut images = Vec::new();
    let entries = fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();

        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            tracing::warn!("skipping non UTF-8 file name: {}", path.display());
            continue;
        };
        if name.starts_with('.') || !config.matches_extension(&name) {
            continue;
        }

        // Follows symlinks so a linked image counts like a copied one.
        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("skipping dangling link: {}", path.display());
                continue;
            }
            Err(e) => return Err(io_err(&path, e)),
        };
        if !meta.is_file() {
            tracing::debug!("skipping non-file entry: {}", path.display());
            continue;
        }
        if meta.len() == 0 {
            tracing::warn!("skipping empty file: {}", path.display());
            continue;
        }
        if has_png_extension(&name) && !has_png_signature(&path)? {
            tracing::warn!("skipping {}: not a PNG (bad signature)", path.display());
            continue;
        }

        tracing::debug!("matched: {name}");
        images.push(ScannedImage {
            name: ImageName::from(name),
            path,
            size_bytes: meta.len(),
        });
    }

    images.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(images)
}

/// First eight bytes of every PNG file.
pub const PNG_SIGNATURE: [u8; 8] = *b"\x89PNG\r\n\x1a\n";

fn has_png_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

fn has_png_signature(path: &Path) -> Result<bool, ScanError> {
    let file = File::open(path).map_err(|e| io_err(path, e))?;
    let mut header = Vec::with_capacity(PNG_SIGNATURE.len());
    file.take(PNG_SIGNATURE.len() as u64)
        .read_to_end(&mut header)
        .map_err(|e| io_err(path, e))?;
    Ok(header == PNG_SIGNATURE)
}
