//! Tera rendering for the scaffolded gallery page.
//!
//! The default template is baked into the binary; `gallery init --template`
//! can swap in a user `.tera` file. Any template must emit exactly one
//! `<identifier> = [ ... ];` literal so later `sync` runs can find it.

use std::path::Path;

use tera::Tera;

use crate::context::PageContext;
use crate::embed::ManifestLocator;
use crate::error::RenderError;

// Registered under a `.tera` name so tera's HTML autoescape stays off; the
// template escapes `title` itself and inserts the JSON literal verbatim.
const PAGE_TEMPLATE: &str = "page/index.html.tera";
const DEFAULT_PAGE: &str = include_str!("templates/index.html.tera");

fn io_err(path: &Path, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn build_tera(user_template: Option<&Path>) -> Result<Tera, RenderError> {
    let body = match user_template {
        Some(path) => std::fs::read_to_string(path).map_err(|e| io_err(path, e))?,
        None => DEFAULT_PAGE.to_string(),
    };
    let mut tera = Tera::default();
    tera.add_raw_template(PAGE_TEMPLATE, &body)?;
    Ok(tera)
}

/// Renders the gallery page. Create once and reuse.
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    /// Renderer using the embedded default template.
    pub fn new() -> Result<Self, RenderError> {
        Self::with_template(None)
    }

    /// Renderer using `user_template` when given, the default otherwise.
    pub fn with_template(user_template: Option<&Path>) -> Result<Self, RenderError> {
        Ok(PageRenderer {
            tera: build_tera(user_template)?,
        })
    }

    /// Render the page and check that it carries exactly one locatable
    /// manifest literal.
    pub fn render(&self, ctx: &PageContext) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        let content = self.tera.render(PAGE_TEMPLATE, &tera_ctx)?;
        ManifestLocator::new(&ctx.identifier)?.locate(&content)?;
        Ok(content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
