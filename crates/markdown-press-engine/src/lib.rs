pub mod builder;
pub mod convert;
pub mod inline;
pub mod io;
pub mod parsing;

// Re-export key types for easier usage
pub use builder::{BuildError, HtmlBuilder, StandardHtmlBuilder, StateError};
pub use convert::{ConvertError, OutputMode, build_from_file, build_from_text};
pub use inline::render_inline;
pub use io::IoError;
pub use parsing::BlockParser;
