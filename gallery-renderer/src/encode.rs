//! Manifest → JSON array literal.
//!
//! Output is `serde_json`'s pretty form: two-space indentation, one name per
//! line, `[]` when empty.

use gallery_core::Manifest;

use crate::error::RenderError;

/// Line terminator used inside the encoded array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// CRLF if the text contains any `\r\n`, LF otherwise.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Encode `manifest` as a pretty-printed JSON string array.
pub fn encode_manifest(manifest: &Manifest, line_ending: LineEnding) -> Result<String, RenderError> {
    let json = serde_json::to_string_pretty(manifest)?;
    Ok(match line_ending {
        LineEnding::Lf => json,
        LineEnding::CrLf => json.replace('\n', "\r\n"),
    })
}
