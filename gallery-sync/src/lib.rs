//! # gallery-sync
//!
//! Regenerates the manifest embedded in a gallery page and writes it back
//! atomically.
//!
//! [`pipeline::run`] is the `sync` operation; [`diff::diff_target`] and
//! [`staleness::check`] inspect the same result without writing, and
//! [`scaffold::init_gallery`] creates a new page.

pub mod diff;
pub mod error;
pub mod pipeline;
pub mod scaffold;
pub mod staleness;
pub mod writer;

pub use error::SyncError;
pub use pipeline::SyncReport;
pub use staleness::{StalenessReport, StalenessSignal};
pub use writer::WriteResult;
