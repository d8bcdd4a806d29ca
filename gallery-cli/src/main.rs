//! Gallery — regenerate the image manifest embedded in a static gallery page.
//!
//! # Usage
//!
//! ```text
//! gallery [--dir DIR] [--config FILE]                 # same as `gallery sync`
//! gallery sync  [--dry-run] [--target F] [--identifier ID] [--ext EXT]...
//! gallery diff  [--target F] [--identifier ID] [--ext EXT]...
//! gallery check [--json] [...]
//! gallery list  [--json] [...]
//! gallery init  [--title T] [--template F] [--force] [--write-config] [...]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    check::CheckArgs, diff::DiffArgs, init::InitArgs, list::ListArgs, sync::SyncArgs, GlobalArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "gallery",
    version,
    about = "Regenerate the image list embedded in a static gallery page",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rewrite the page's embedded image array from the directory listing.
    Sync(SyncArgs),

    /// Show a unified diff of what sync would write.
    Diff(DiffArgs),

    /// Exit non-zero when the embedded array is out of date.
    Check(CheckArgs),

    /// List the images sync would embed.
    List(ListArgs),

    /// Create a gallery page pre-populated with the current images.
    Init(InitArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let global = cli.global;
    match cli.command {
        None => SyncArgs::default().run(&global),
        Some(Commands::Sync(args)) => args.run(&global),
        Some(Commands::Diff(args)) => args.run(&global),
        Some(Commands::Check(args)) => args.run(&global),
        Some(Commands::List(args)) => args.run(&global),
        Some(Commands::Init(args)) => args.run(&global),
    }
}

/// Logs go to stderr so stdout stays clean for `--json`.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
