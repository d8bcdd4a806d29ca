//! Page context — serializable rendering payload for the scaffold template.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gallery_core::{GalleryConfig, Manifest};

use crate::encode::{encode_manifest, LineEnding};
use crate::error::RenderError;

/// Everything the gallery page template can reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContext {
    /// `<title>` and heading text.
    pub title: String,
    /// JS identifier holding the array.
    pub identifier: String,
    /// `const ` for plain identifiers, empty for member paths such as
    /// `window.images`.
    pub declaration: String,
    /// Pre-encoded JSON array, inserted verbatim.
    pub manifest_literal: String,
    pub image_count: usize,
    pub meta: MetaCtx,
}

/// Generator metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaCtx {
    pub gallery_version: String,
    pub generated_at: DateTime<Utc>,
}

impl PageContext {
    /// Build a [`PageContext`] for `config` with the current scan.
    pub fn new(
        title: impl Into<String>,
        config: &GalleryConfig,
        manifest: &Manifest,
    ) -> Result<Self, RenderError> {
        let declaration = if config.identifier.contains('.') {
            String::new()
        } else {
            "const ".to_string()
        };
        Ok(PageContext {
            title: title.into(),
            identifier: config.identifier.clone(),
            declaration,
            manifest_literal: encode_manifest(manifest, LineEnding::Lf)?,
            image_count: manifest.len(),
            meta: MetaCtx {
                gallery_version: env!("CARGO_PKG_VERSION").to_string(),
                generated_at: Utc::now(),
            },
        })
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}
