//! # Block Parsing
//!
//! Single-pass, line-oriented parsing that drives an [`HtmlBuilder`].
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified on its
//!    own into a [`LineClass`] (blank, heading, list item, paragraph)
//! 2. **Block Emission** ([`BlockParser`]): classes are turned into builder
//!    calls, tracking whether a list is currently open
//!
//! Every non-blank line that is neither a heading nor a list item is its own
//! paragraph; there are no multi-line blocks.

pub mod classify;

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::builder::{BuildError, HtmlBuilder};
use crate::convert::ConvertError;
use crate::inline::render_inline;
use crate::io;

pub use classify::{LineClass, classify_line};

fn line_break_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\r\n|[\n\r\x0b\x0c\x1c-\x1e\x{85}\x{2028}\x{2029}]")
            .expect("Invalid line break regex")
    })
}

/// Split `text` into lines without their terminators.
///
/// `\r\n`, `\n` and a lone `\r` all end a line, as do vertical tab, form
/// feed, the file/group/record separators, NEL and the Unicode line and
/// paragraph separators. A final terminator does not start an extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = line_break_regex().split(text).collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Drives one [`HtmlBuilder`] from Markdown lines.
///
/// Text is passed through the inline renderer `R` before it reaches the
/// builder. The title is always left for the builder to infer.
pub struct BlockParser<'b, B: HtmlBuilder + ?Sized, R = fn(&str) -> String> {
    builder: &'b mut B,
    render: R,
    in_list: bool,
}

impl<'b, B: HtmlBuilder + ?Sized> BlockParser<'b, B> {
    /// A parser using [`render_inline`] for inline text.
    pub fn new(builder: &'b mut B) -> Self {
        Self::with_renderer(builder, render_inline)
    }
}

impl<'b, B, R> BlockParser<'b, B, R>
where
    B: HtmlBuilder + ?Sized,
    R: Fn(&str) -> String,
{
    pub fn with_renderer(builder: &'b mut B, render: R) -> Self {
        Self {
            builder,
            render,
            in_list: false,
        }
    }

    /// Read a UTF-8 file and parse its contents.
    pub fn parse_file(&mut self, path: &Path) -> Result<(), ConvertError> {
        let text = io::read_file(path)?;
        self.parse_text(&text)?;
        Ok(())
    }

    /// Split `text` into lines and parse them.
    pub fn parse_text(&mut self, text: &str) -> Result<(), BuildError> {
        self.parse_lines(split_lines(text))
    }

    /// Parse a complete document: start, one block per line, end.
    pub fn parse_lines<I, S>(&mut self, lines: I) -> Result<(), BuildError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.builder.start(None);
        self.in_list = false;

        for (index, raw) in lines.into_iter().enumerate() {
            let line = raw.as_ref().trim_end_matches(['\r', '\n']);
            let class = classify_line(line);
            log::trace!("line {}: {:?}", index + 1, class);
            self.emit(class)?;
        }

        self.close_list_if_open()?;
        self.builder.end()
    }

    fn emit(&mut self, class: LineClass<'_>) -> Result<(), BuildError> {
        match class {
            LineClass::Blank => self.close_list_if_open(),
            LineClass::Heading { level, text } => {
                self.close_list_if_open()?;
                let text = (self.render)(text);
                self.builder.add_heading(&text, level)
            }
            LineClass::ListItem { text } => {
                let text = (self.render)(text);
                if !self.in_list {
                    self.builder.start_list()?;
                    self.in_list = true;
                }
                self.builder.add_list_item(&text)
            }
            LineClass::Paragraph { text } => {
                self.close_list_if_open()?;
                let text = (self.render)(text);
                self.builder.add_paragraph(&text)
            }
        }
    }

    fn close_list_if_open(&mut self) -> Result<(), BuildError> {
        if self.in_list {
            self.builder.end_list()?;
            self.in_list = false;
        }
        Ok(())
    }
}
