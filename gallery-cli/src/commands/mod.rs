//! Subcommand implementations and the arguments they share.

pub mod check;
pub mod diff;
pub mod init;
pub mod list;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use gallery_core::{
    config::{self, ConfigOverrides},
    GalleryConfig,
};

/// Flags accepted before any subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Directory scanned for images (default: current directory).
    #[arg(long, short = 'd', global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Config file to use instead of `<DIR>/gallery.yaml`.
    #[arg(long, short = 'c', global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Per-command overrides of the manifest settings.
#[derive(Args, Debug, Clone, Default)]
pub struct ManifestArgs {
    /// Page to rewrite, relative to the image directory (default: index.html).
    #[arg(long, short = 't', value_name = "FILE")]
    pub target: Option<PathBuf>,

    /// JavaScript identifier holding the array (default: images).
    #[arg(long, short = 'i', value_name = "IDENT")]
    pub identifier: Option<String>,

    /// Image suffix to include; repeat for several (default: png).
    #[arg(long = "ext", short = 'e', value_name = "EXT")]
    pub extensions: Vec<String>,
}

impl ManifestArgs {
    /// Layer these flags over `gallery.yaml` and the defaults.
    pub fn resolve(&self, global: &GlobalArgs) -> Result<GalleryConfig> {
        config::resolve(ConfigOverrides {
            image_dir: global.dir.clone(),
            config: global.config.clone(),
            target: self.target.clone(),
            identifier: self.identifier.clone(),
            extensions: self.extensions.clone(),
        })
        .context("failed to load gallery configuration")
        .inspect(|config| {
            tracing::debug!(
                "image_dir={} target={} identifier={} extensions={:?}",
                config.image_dir.display(),
                config.target.display(),
                config.identifier,
                config.extensions,
            )
        })
    }
}

/// Target path as shown to the user: relative to the image directory when
/// possible.
pub fn display_target(config: &GalleryConfig) -> String {
    let target = config.target_path();
    target
        .strip_prefix(&config.image_dir)
        .unwrap_or(target.as_path())
        .display()
        .to_string()
}

/// `1 image` / `2 images`.
pub fn plural_images(count: usize) -> String {
    if count == 1 {
        "1 image".to_string()
    } else {
        format!("{count} images")
    }
}
