//! `gallery init` — write a fresh gallery page (and optionally its config).

use std::path::PathBuf;

use gallery_core::{config, GalleryConfig, CONFIG_FILE_NAME};
use gallery_renderer::{PageContext, PageRenderer};

use crate::writer::{atomic_write, read_target, WriteResult};
use crate::SyncError;

/// Options for [`init_gallery`].
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Page title; defaults to the image directory's name.
    pub title: Option<String>,
    /// Custom `.tera` page template.
    pub template: Option<PathBuf>,
    /// Replace an existing target page.
    pub force: bool,
    /// Also persist the resolved settings as `gallery.yaml`.
    pub write_config: bool,
}

/// Outcome of [`init_gallery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub write: WriteResult,
    pub count: usize,
    pub config_path: Option<PathBuf>,
}

/// Render a gallery page pre-populated with the current scan.
pub fn init_gallery(config: &GalleryConfig, options: &InitOptions) -> Result<InitReport, SyncError> {
    let target = config.target_path();
    let existing = match read_target(&target) {
        Ok(text) if options.force => Some(text),
        Ok(_) => return Err(SyncError::TargetExists { path: target }),
        Err(SyncError::TargetNotFound { .. }) => None,
        Err(err) => return Err(err),
    };

    let manifest = gallery_scanner::scan(config)?;
    let title = options
        .title
        .clone()
        .unwrap_or_else(|| default_title(config));
    let ctx = PageContext::new(title, config, &manifest)?;
    let content = PageRenderer::with_template(options.template.as_deref())?.render(&ctx)?;
    let write = atomic_write(&target, &content, existing.as_deref(), false)?;

    let config_path = if options.write_config {
        let path = config.image_dir.join(CONFIG_FILE_NAME);
        config::save_at(&path, config)?;
        tracing::info!("wrote config: {}", path.display());
        Some(path)
    } else {
        None
    };

    Ok(InitReport {
        write,
        count: manifest.len(),
        config_path,
    })
}

fn default_title(config: &GalleryConfig) -> String {
    config
        .image_dir
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "Gallery".to_string())
}
