//! `gallery init [--title T] [--template F] [--force] [--write-config]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use gallery_sync::{
    scaffold::{init_gallery, InitOptions},
    WriteResult,
};

use super::{display_target, plural_images, GlobalArgs, ManifestArgs};

/// Create a gallery page in the image directory.
#[derive(Args, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Page title (default: the image directory's name).
    #[arg(long)]
    pub title: Option<String>,

    /// Tera template to render instead of the built-in page. It must emit
    /// exactly one `<identifier> = {{ manifest_literal | safe }};` line.
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Overwrite an existing page.
    #[arg(long)]
    pub force: bool,

    /// Also save the resolved settings to `<DIR>/gallery.yaml`.
    #[arg(long)]
    pub write_config: bool,
}

impl InitArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let config = self.manifest.resolve(global)?;
        let target = display_target(&config);
        let options = InitOptions {
            title: self.title,
            template: self.template,
            force: self.force,
            write_config: self.write_config,
        };
        let report = init_gallery(&config, &options)
            .with_context(|| format!("failed to create '{target}'"))?;

        let images = plural_images(report.count);
        match report.write {
            WriteResult::Unchanged { .. } => println!("✓ '{target}' already matches ({images})"),
            _ => println!("✓ Created '{target}' with {images}"),
        }
        if let Some(path) = report.config_path {
            println!("  Saved settings to: {}", path.display());
        }
        Ok(())
    }
}
