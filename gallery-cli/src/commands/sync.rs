//! `gallery sync` — regenerate the embedded manifest.

use anyhow::{Context, Result};
use clap::Args;
use gallery_sync::{pipeline, SyncReport, WriteResult};

use super::{display_target, plural_images, GlobalArgs, ManifestArgs};

/// Arguments for `gallery sync`.
#[derive(Args, Debug, Default)]
pub struct SyncArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Show what would be written without touching the page.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let config = self.manifest.resolve(global)?;
        let target = display_target(&config);
        let report = pipeline::run(&config, self.dry_run)
            .with_context(|| format!("failed to update '{target}'"))?;
        print_report(&target, &report);
        Ok(())
    }
}

fn print_report(target: &str, report: &SyncReport) {
    let images = plural_images(report.count());
    match &report.write {
        WriteResult::Written { .. } => println!("✓ {target} updated with {images}"),
        WriteResult::Unchanged { .. } => println!("✓ {target} already up to date ({images})"),
        WriteResult::WouldWrite { .. } => {
            println!("[dry-run] ~ {target} would be updated with {images}")
        }
    }
}
