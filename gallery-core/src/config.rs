//! Layered configuration: defaults → `gallery.yaml` → CLI overrides.
//!
//! # File layout
//!
//! ```yaml
//! # <image_dir>/gallery.yaml — every key optional
//! target: index.html
//! identifier: images
//! extensions: [png, jpg]
//! ```
//!
//! A missing `gallery.yaml` next to the images is not an error. A config file
//! named explicitly (`--config`) must exist.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, ConfigError};
use crate::types::GalleryConfig;

/// File name looked up inside the image directory.
pub const CONFIG_FILE_NAME: &str = "gallery.yaml";

// ---------------------------------------------------------------------------
// 1. On-disk shape
// ---------------------------------------------------------------------------

/// Raw `gallery.yaml` contents. Unknown keys are rejected so typos surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Image directory, relative to the config file's own directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
}

/// Values supplied on the command line. `None` / empty means "not given".
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub image_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub target: Option<PathBuf>,
    pub identifier: Option<String>,
    pub extensions: Vec<String>,
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Parse a config file from `path`.
pub fn load_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge defaults, the config file (if any) and `overrides` into a validated
/// [`GalleryConfig`].
pub fn resolve(overrides: ConfigOverrides) -> Result<GalleryConfig, ConfigError> {
    let mut config = GalleryConfig::default();
    let cli_dir = overrides.image_dir.clone();
    let base_dir = cli_dir
        .clone()
        .unwrap_or_else(|| config.image_dir.clone());

    let file = match overrides.config.as_deref() {
        Some(explicit) => {
            if !explicit.exists() {
                return Err(ConfigError::ConfigNotFound {
                    path: explicit.to_path_buf(),
                });
            }
            Some((explicit.to_path_buf(), load_file(explicit)?))
        }
        None => {
            let implicit = base_dir.join(CONFIG_FILE_NAME);
            if implicit.is_file() {
                Some((implicit.clone(), load_file(&implicit)?))
            } else {
                None
            }
        }
    };

    config.image_dir = base_dir;
    if let Some((path, file)) = file {
        apply_file(&mut config, &path, file, cli_dir.is_some());
    }

    if let Some(target) = overrides.target {
        config.target = target;
    }
    if let Some(identifier) = overrides.identifier {
        config.identifier = identifier;
    }
    if !overrides.extensions.is_empty() {
        config.extensions = overrides.extensions;
    }

    config.extensions = normalize_extensions(&config.extensions);
    validate(&config)?;
    Ok(config)
}

fn apply_file(config: &mut GalleryConfig, path: &Path, file: ConfigFile, dir_pinned: bool) {
    if let (Some(dir), false) = (file.image_dir, dir_pinned) {
        let anchor = path.parent().unwrap_or_else(|| Path::new(""));
        config.image_dir = if dir.is_absolute() {
            dir
        } else {
            anchor.join(dir)
        };
    }
    if let Some(target) = file.target {
        config.target = target;
    }
    if let Some(identifier) = file.identifier {
        config.identifier = identifier;
    }
    if let Some(extensions) = file.extensions {
        config.extensions = extensions;
    }
}

/// Lowercase and strip a leading `.` / `*.` so `"*.PNG"`, `".png"` and
/// `"png"` all mean the same suffix.
pub fn normalize_extensions(extensions: &[String]) -> Vec<String> {
    let mut out: Vec<String> = extensions
        .iter()
        .map(|e| {
            e.trim()
                .trim_start_matches('*')
                .trim_start_matches('.')
                .to_ascii_lowercase()
        })
        .collect();
    out.sort();
    out.dedup();
    out
}

// ---------------------------------------------------------------------------
// 3. Validation
// ---------------------------------------------------------------------------

/// Reject settings the rewrite cannot work with.
pub fn validate(config: &GalleryConfig) -> Result<(), ConfigError> {
    if config.extensions.is_empty() || config.extensions.iter().any(String::is_empty) {
        return Err(ConfigError::Invalid {
            field: "extensions",
            reason: "at least one non-empty suffix is required".to_string(),
        });
    }
    if !is_js_identifier_path(&config.identifier) {
        return Err(ConfigError::Invalid {
            field: "identifier",
            reason: format!(
                "'{}' is not a JavaScript identifier (e.g. `images` or `window.images`)",
                config.identifier
            ),
        });
    }
    if config.target.as_os_str().is_empty() {
        return Err(ConfigError::Invalid {
            field: "target",
            reason: "target path is empty".to_string(),
        });
    }
    Ok(())
}

/// `images`, `$gallery`, `window.images` — dot-separated identifier segments.
fn is_js_identifier_path(s: &str) -> bool {
    !s.is_empty()
        && s.split('.').all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
                _ => return false,
            }
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        })
}

// ---------------------------------------------------------------------------
// 4. Save (atomic)
// ---------------------------------------------------------------------------

/// Write `config` as `gallery.yaml` at `path`.
///
/// Write flow: serialize → `.tmp` sibling → `rename`. The image directory is
/// not persisted; the file is expected to live next to the images.
pub fn save_at(path: &Path, config: &GalleryConfig) -> Result<(), ConfigError> {
    let file = ConfigFile {
        image_dir: None,
        target: Some(config.target.clone()),
        identifier: Some(config.identifier.clone()),
        extensions: Some(config.extensions.clone()),
    };
    let yaml = serde_yaml::to_string(&file)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| CONFIG_FILE_NAME.to_string());
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));
    std::fs::write(&tmp_path, yaml).map_err(|e| io_err(&tmp_path, e))?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(io_err(path, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
