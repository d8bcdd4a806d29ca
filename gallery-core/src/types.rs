//! Domain types for the gallery manifest.
//!
//! All path fields use `PathBuf`; image names are plain file names with no
//! directory component.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default image directory: the current working directory.
pub const DEFAULT_IMAGE_DIR: &str = ".";
/// Default page rewritten by `sync`.
pub const DEFAULT_TARGET: &str = "index.html";
/// Default JS identifier holding the embedded array.
pub const DEFAULT_IDENTIFIER: &str = "images";
/// Default suffixes picked up by the scanner.
pub const DEFAULT_EXTENSIONS: &[&str] = &["png"];

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A file name embedded in the manifest (e.g. `"01234567890128.png"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageName(pub String);

impl ImageName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ImageName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ImageName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

/// Sorted, deduplicated list of image names.
///
/// The ordering is byte-lexicographic so the embedded array is stable across
/// platforms and runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest(Vec<ImageName>);

impl Manifest {
    pub fn new(names: impl IntoIterator<Item = ImageName>) -> Self {
        let mut names: Vec<ImageName> = names.into_iter().collect();
        names.sort();
        names.dedup();
        Self(names)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageName> {
        self.0.iter()
    }

    pub fn names(&self) -> &[ImageName] {
        &self.0
    }

    /// Names in `self` that are absent from `other`.
    pub fn missing_from(&self, other: &Manifest) -> Vec<ImageName> {
        self.0
            .iter()
            .filter(|name| other.0.binary_search(name).is_err())
            .cloned()
            .collect()
    }
}

impl FromIterator<ImageName> for Manifest {
    fn from_iter<I: IntoIterator<Item = ImageName>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a ImageName;
    type IntoIter = std::slice::Iter<'a, ImageName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Directory scanned for images.
    pub image_dir: PathBuf,
    /// Page whose embedded array is rewritten. Relative paths are resolved
    /// against `image_dir` by [`GalleryConfig::target_path`].
    pub target: PathBuf,
    /// Identifier on the left-hand side of the array literal.
    pub identifier: String,
    /// Lowercase suffixes without the leading dot.
    pub extensions: Vec<String>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            target: PathBuf::from(DEFAULT_TARGET),
            identifier: DEFAULT_IDENTIFIER.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl GalleryConfig {
    /// Target path with relative targets anchored at the image directory.
    pub fn target_path(&self) -> PathBuf {
        if self.target.is_absolute() {
            self.target.clone()
        } else {
            self.image_dir.join(&self.target)
        }
    }

    /// Whether `file_name` carries one of the configured suffixes.
    ///
    /// Matching is case-insensitive on the final `.ext` component.
    pub fn matches_extension(&self, file_name: &str) -> bool {
        let Some(ext) = Path::new(file_name).extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = ext.to_ascii_lowercase();
        self.extensions.iter().any(|e| *e == ext)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_sorts_and_dedups() {
        let m = Manifest::new(["b.png", "a.png", "b.png"].map(ImageName::from));
        let names: Vec<&str> = m.iter().map(ImageName::as_str).collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    #[test]
    fn manifest_sort_is_bytewise() {
        let m = Manifest::new(["b.png", "B.png", "a.png"].map(ImageName::from));
        let names: Vec<&str> = m.iter().map(ImageName::as_str).collect();
        assert_eq!(names, vec!["B.png", "a.png", "b.png"]);
    }

    #[test]
    fn missing_from_reports_set_difference() {
        let current = Manifest::new(["a.png", "b.png", "c.png"].map(ImageName::from));
        let embedded = Manifest::new(["a.png", "z.png"].map(ImageName::from));
        assert_eq!(
            current.missing_from(&embedded),
            vec![ImageName::from("b.png"), ImageName::from("c.png")]
        );
        assert_eq!(embedded.missing_from(&current), vec![ImageName::from("z.png")]);
    }

    #[test]
    fn relative_target_is_anchored_at_image_dir() {
        let cfg = GalleryConfig {
            image_dir: PathBuf::from("/srv/gallery"),
            ..GalleryConfig::default()
        };
        assert_eq!(cfg.target_path(), PathBuf::from("/srv/gallery/index.html"));
    }

    #[test]
    fn extension_match_ignores_case() {
        let cfg = GalleryConfig::default();
        assert!(cfg.matches_extension("A.PNG"));
        assert!(cfg.matches_extension("photo.png"));
        assert!(!cfg.matches_extension("photo.png.bak"));
        assert!(!cfg.matches_extension("png"));
    }
}
