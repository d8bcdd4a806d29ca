//! `gallery list` — the images sync would embed.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use gallery_scanner::{scan_detailed, ScannedImage};

use super::{plural_images, GlobalArgs, ManifestArgs};

/// Arguments for `gallery list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ImageJson {
    name: String,
    size_bytes: u64,
}

#[derive(Tabled)]
struct ImageRow {
    #[tabled(rename = "image")]
    name: String,
    #[tabled(rename = "size")]
    size: String,
}

impl ListArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let config = self.manifest.resolve(global)?;
        let images = scan_detailed(&config)
            .with_context(|| format!("failed to scan '{}'", config.image_dir.display()))?;

        if self.json {
            let payload: Vec<ImageJson> = images
                .iter()
                .map(|img| ImageJson {
                    name: img.name.to_string(),
                    size_bytes: img.size_bytes,
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize image list")?
            );
            return Ok(());
        }

        print_table(&images);
        Ok(())
    }
}

fn print_table(images: &[ScannedImage]) {
    if images.is_empty() {
        println!("No matching images.");
        return;
    }
    let rows: Vec<ImageRow> = images
        .iter()
        .map(|img| ImageRow {
            name: img.name.to_string(),
            size: format_size(img.size_bytes),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!("{}", plural_images(images.len()));
}

fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}
