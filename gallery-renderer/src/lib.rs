//! # gallery-renderer
//!
//! Turns a [`Manifest`](gallery_core::Manifest) into page text: JSON array
//! encoding, in-place substitution of the `<identifier> = [ ... ];` literal,
//! and Tera rendering of a fresh gallery page.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gallery_core::{ImageName, Manifest};
//! use gallery_renderer::ManifestLocator;
//!
//! fn refresh(page: &str) -> Result<String, gallery_renderer::RenderError> {
//!     let manifest: Manifest = ["a.png", "b.png"].into_iter().map(ImageName::from).collect();
//!     let locator = ManifestLocator::new("images")?;
//!     Ok(locator.substitute(page, &manifest)?.content)
//! }
//! ```

pub mod context;
pub mod embed;
pub mod encode;
pub mod error;
pub mod page;

pub use context::PageContext;
pub use embed::{ManifestLocator, Substitution};
pub use encode::{encode_manifest, LineEnding};
pub use error::RenderError;
pub use page::PageRenderer;
