//! The single entry point used by the command-line layer.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::builder::{BuildError, HtmlBuilder, StandardHtmlBuilder};
use crate::io::IoError;
use crate::parsing::BlockParser;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Which rendering of the assembled document to return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// A complete page with doctype, head and title.
    #[default]
    Full,
    /// Only the block fragments.
    Body,
}

impl OutputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::Full => "full",
            OutputMode::Body => "body",
        }
    }

    fn render(self, builder: &impl HtmlBuilder) -> Result<String, BuildError> {
        match self {
            OutputMode::Full => builder.full_page(),
            OutputMode::Body => builder.body(),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown output mode '{0}' (expected 'full' or 'body')")]
pub struct ParseOutputModeError(String);

impl FromStr for OutputMode {
    type Err = ParseOutputModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(OutputMode::Full),
            "body" => Ok(OutputMode::Body),
            _ => Err(ParseOutputModeError(s.to_string())),
        }
    }
}

/// Convert Markdown text to HTML with a fresh builder.
pub fn build_from_text(text: &str, mode: OutputMode) -> Result<String, BuildError> {
    let mut builder = StandardHtmlBuilder::new();
    BlockParser::new(&mut builder).parse_text(text)?;
    mode.render(&builder)
}

/// Convert a Markdown file (read as UTF-8) to HTML with a fresh builder.
pub fn build_from_file(path: &Path, mode: OutputMode) -> Result<String, ConvertError> {
    log::debug!("converting {} ({mode})", path.display());
    let mut builder = StandardHtmlBuilder::new();
    BlockParser::new(&mut builder).parse_file(path)?;
    Ok(mode.render(&builder)?)
}
