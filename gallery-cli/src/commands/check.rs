//! `gallery check` — staleness of the embedded manifest, for CI.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use gallery_core::ImageName;
use gallery_sync::{staleness::check, StalenessReport, StalenessSignal};

use super::{display_target, plural_images, GlobalArgs, ManifestArgs};

/// Arguments for `gallery check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct CheckReportJson {
    target: String,
    status: &'static str,
    detail: String,
    scanned: usize,
    added: Vec<String>,
    removed: Vec<String>,
}

impl CheckArgs {
    pub fn run(self, global: &GlobalArgs) -> Result<()> {
        let config = self.manifest.resolve(global)?;
        let target = display_target(&config);
        let report = check(&config).with_context(|| format!("check failed for '{target}'"))?;

        if self.json {
            print_json(&target, &report)?;
        } else {
            print_line(&target, &report);
        }

        if !report.signal.is_current() {
            bail!("'{target}' is {}", signal_label(&report.signal).to_lowercase());
        }
        Ok(())
    }
}

fn print_json(target: &str, report: &StalenessReport) -> Result<()> {
    let (added, removed) = match &report.signal {
        StalenessSignal::Stale { added, removed } => (names(added), names(removed)),
        _ => (Vec::new(), Vec::new()),
    };
    let payload = CheckReportJson {
        target: target.to_string(),
        status: signal_key(&report.signal),
        detail: signal_detail(&report.signal),
        scanned: report.scanned,
        added,
        removed,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize check JSON")?
    );
    Ok(())
}

fn print_line(target: &str, report: &StalenessReport) {
    println!(
        "{} {target}: {} ({} on disk)",
        signal_indicator(&report.signal),
        signal_detail(&report.signal),
        plural_images(report.scanned),
    );
    if !report.signal.is_current() {
        println!("Run 'gallery sync' to update the page.");
    }
}

fn names(list: &[ImageName]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

fn signal_key(signal: &StalenessSignal) -> &'static str {
    match signal {
        StalenessSignal::MissingTarget => "missing_target",
        StalenessSignal::MissingManifest { .. } => "missing_manifest",
        StalenessSignal::Stale { .. } => "stale",
        StalenessSignal::Current => "current",
    }
}

fn signal_label(signal: &StalenessSignal) -> &'static str {
    match signal {
        StalenessSignal::MissingTarget => "MISSING",
        StalenessSignal::MissingManifest { .. } => "NO MANIFEST",
        StalenessSignal::Stale { .. } => "STALE",
        StalenessSignal::Current => "CURRENT",
    }
}

fn signal_indicator(signal: &StalenessSignal) -> String {
    let label = signal_label(signal);
    match signal {
        StalenessSignal::MissingTarget => label.red().bold().to_string(),
        StalenessSignal::MissingManifest { .. } => label.magenta().bold().to_string(),
        StalenessSignal::Stale { .. } => label.yellow().bold().to_string(),
        StalenessSignal::Current => label.green().bold().to_string(),
    }
}

fn signal_detail(signal: &StalenessSignal) -> String {
    match signal {
        StalenessSignal::MissingTarget => "target file not found".to_string(),
        StalenessSignal::MissingManifest { reason } => reason.clone(),
        StalenessSignal::Current => "up to date".to_string(),
        StalenessSignal::Stale { added, removed } if added.is_empty() && removed.is_empty() => {
            "array formatting differs".to_string()
        }
        StalenessSignal::Stale { added, removed } => {
            let mut parts = Vec::new();
            if !added.is_empty() {
                parts.push(format!("{} new: {}", added.len(), summarize(added)));
            }
            if !removed.is_empty() {
                parts.push(format!("{} gone: {}", removed.len(), summarize(removed)));
            }
            parts.join("; ")
        }
    }
}

fn summarize(list: &[ImageName]) -> String {
    let mut shown: Vec<String> = list.iter().take(2).map(ToString::to_string).collect();
    if list.len() > shown.len() {
        shown.push(format!("+{} more", list.len() - shown.len()));
    }
    shown.join(", ")
}
