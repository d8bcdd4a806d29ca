//! Gallery core library — domain types, configuration loading, errors.
//!
//! - [`types`] — [`ImageName`], [`Manifest`], [`GalleryConfig`]
//! - [`error`] — [`ConfigError`]
//! - [`config`] — layered load / save of `gallery.yaml`

pub mod config;
pub mod error;
pub mod types;

pub use config::{ConfigOverrides, CONFIG_FILE_NAME};
pub use error::ConfigError;
pub use types::{GalleryConfig, ImageName, Manifest};
