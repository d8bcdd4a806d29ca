//! `gallery diff` — show the unified diff sync would apply.

use anyhow::{Context, Result};
use clap::Args;

use gallery_sync::diff::diff_target;

use super::{display_target, GlobalArgs, ManifestArgs};

/// Arguments for `gallery diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,
}

impl DiffArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let config = self.manifest.resolve(global)?;
        let target = display_target(&config);
        let result = diff_target(&config).with_context(|| format!("diff failed for '{target}'"))?;

        let Some(diff) = result.unified_diff else {
            println!("No differences for '{target}'.");
            return Ok(());
        };
        print!("{diff}");
        if !diff.ends_with('\n') {
            println!();
        }
        Ok(())
    }
}
