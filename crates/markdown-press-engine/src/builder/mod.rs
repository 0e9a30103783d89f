//! # Document Assembly
//!
//! Block-level HTML emission behind a lifecycle guard.
//!
//! ## Lifecycle
//!
//! ```text
//! NotStarted --start--> Open --end--> Ended
//!                        ^  |
//!                        +--+ start (re-initialises)
//! ```
//!
//! Content operations require `Open`. Readers (`body`, `full_page`) work in
//! `Open` and `Ended` but not before the first `start`.
//!
//! ## Key Invariants
//!
//! - Fragments are appended in document order and only while `Open`
//! - A list is always closed before a heading, a paragraph, or `end`
//! - Lists never nest: `start_list` on an open list is rejected
//! - The first level-1 heading is captured as the title at most once, and
//!   only when no explicit title was given

mod error;
mod page;
mod standard;

pub use error::{BuildError, StateError};
pub use page::{FALLBACK_TITLE, wrap_page};
pub use standard::{Lifecycle, StandardHtmlBuilder};

/// Capability interface for anything that can assemble a document from
/// block events.
///
/// [`BlockParser`](crate::parsing::BlockParser) drives this trait only, so an
/// alternative renderer can be swapped in without touching the parser.
pub trait HtmlBuilder {
    /// Begin a new document, discarding anything accumulated so far.
    fn start(&mut self, title: Option<&str>);

    /// Seal the document, closing an open list first.
    fn end(&mut self) -> Result<(), BuildError>;

    fn add_heading(&mut self, text: &str, level: u8) -> Result<(), BuildError>;

    fn start_list(&mut self) -> Result<(), BuildError>;

    fn add_list_item(&mut self, text: &str) -> Result<(), BuildError>;

    fn end_list(&mut self) -> Result<(), BuildError>;

    fn add_paragraph(&mut self, text: &str) -> Result<(), BuildError>;

    /// The fragments so far, concatenated. Does not close an open list.
    fn body(&self) -> Result<String, BuildError>;

    /// [`body`](Self::body) wrapped in a complete HTML page.
    fn full_page(&self) -> Result<String, BuildError>;
}
