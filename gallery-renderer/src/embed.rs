//! Locate and replace the `<identifier> = [ ... ];` literal in page text.
//!
//! The literal may span lines. Only the bracketed array is replaced; the
//! declaration prefix (`const images = `) and the closing `;` are kept, and
//! every byte outside the array is left untouched.
//!
//! Exactly one literal must be present. Zero or several matches are errors,
//! never a silent no-op.

use std::ops::Range;

use regex::Regex;

use gallery_core::{ImageName, Manifest};

use crate::encode::{encode_manifest, LineEnding};
use crate::error::RenderError;

/// Result of substituting a fresh manifest into page text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    /// Full page text with the new array in place.
    pub content: String,
    /// Number of names embedded.
    pub count: usize,
    /// `true` when `content` is byte-identical to the input.
    pub unchanged: bool,
}

/// Compiled locator for one identifier.
#[derive(Debug, Clone)]
pub struct ManifestLocator {
    identifier: String,
    pattern: Regex,
}

impl ManifestLocator {
    /// Build a locator for `identifier` (e.g. `images`, `window.images`).
    pub fn new(identifier: &str) -> Result<Self, RenderError> {
        // Inside the brackets a `]` only counts when it is outside a string
        // literal. The left-hand boundary is checked in `locate`.
        let source = format!(
            r#"{}\s*=\s*(?P<array>\[(?:[^\]"]|"(?:[^"\\]|\\.)*")*\])\s*;"#,
            regex::escape(identifier)
        );
        Ok(Self {
            identifier: identifier.to_string(),
            pattern: Regex::new(&source)?,
        })
    }

    /// Byte range of the single array literal (`[` through `]`) in `text`.
    pub fn locate(&self, text: &str) -> Result<Range<usize>, RenderError> {
        let mut spans: Vec<Range<usize>> = Vec::new();
        let mut start = 0;
        while let Some(caps) = self.pattern.captures_at(text, start) {
            let (Some(whole), Some(array)) = (caps.get(0), caps.name("array")) else {
                break;
            };
            if continues_a_name(&text[..whole.start()]) {
                // Retry from the next character; a rejected candidate must
                // not consume a literal that follows it.
                let step = text[whole.start()..].chars().next().map_or(1, char::len_utf8);
                start = whole.start() + step;
                continue;
            }
            spans.push(array.range());
            start = whole.end();
        }

        match spans.len() {
            0 => Err(RenderError::ManifestNotFound {
                identifier: self.identifier.clone(),
            }),
            1 => Ok(spans[0].clone()),
            count => Err(RenderError::AmbiguousManifest {
                identifier: self.identifier.clone(),
                count,
            }),
        }
    }

    /// Replace the array literal in `text` with `manifest`.
    pub fn substitute(&self, text: &str, manifest: &Manifest) -> Result<Substitution, RenderError> {
        let span = self.locate(text)?;
        let encoded = encode_manifest(manifest, LineEnding::detect(text))?;

        let mut content = String::with_capacity(text.len() - span.len() + encoded.len());
        content.push_str(&text[..span.start]);
        content.push_str(&encoded);
        content.push_str(&text[span.end..]);

        let unchanged = content == text;
        Ok(Substitution {
            content,
            count: manifest.len(),
            unchanged,
        })
    }

    /// Parse the names currently embedded in `text`.
    ///
    /// Only JSON-compatible literals are understood; a hand-edited array with
    /// single quotes or a trailing comma yields
    /// [`RenderError::UnreadableManifest`].
    pub fn decode(&self, text: &str) -> Result<Manifest, RenderError> {
        let span = self.locate(text)?;
        let names: Vec<String> =
            serde_json::from_str(&text[span]).map_err(|source| RenderError::UnreadableManifest {
                identifier: self.identifier.clone(),
                source,
            })?;
        Ok(names.into_iter().map(ImageName::from).collect())
    }
}

/// `true` when the identifier would be the tail of a longer name or a
/// member expression (`myimages`, `$images`, `this.images`).
fn continues_a_name(before: &str) -> bool {
    before
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$' || c == '.')
}
