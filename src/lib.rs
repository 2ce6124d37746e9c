//! Embed Markup - a line-oriented markup language for chat embeds
//!
//! This library parses embed markup into a document model and serializes it
//! into a structured JSON object with `title`, `description`, `fields`,
//! `author`, `footer` and friends.
//!
//! # Example
//!
//! ```rust
//! use embed_markup::compile;
//!
//! let value = compile("# Release notes\n@color 88,101,242\nEverything is faster.").unwrap();
//! assert_eq!(value["title"], "Release notes");
//! assert_eq!(value["description"], "Everything is faster.");
//! assert_eq!(value["color"], 0x58_65F2);
//! ```

pub mod blueprint;
pub mod compiler;
pub mod config;
pub mod error;
pub mod library;
pub mod parser;
pub mod serialize;
pub mod template;

pub use blueprint::Blueprint;
pub use compiler::Compiler;
pub use config::{CompilerConfig, ConfigError};
pub use error::{EmbedError, ParseError};
pub use library::Library;
pub use parser::{Embed, Field, Template};
pub use template::{FileSource, LineSource, MemorySource};

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur anywhere in the compile pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Error while parsing markup
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Error while serializing or substituting
    #[error(transparent)]
    Embed(#[from] EmbedError),

    /// Lookup by symbolic name before the document was compiled
    #[error("embed \"{name}\" is not loaded")]
    NotLoaded { name: String },
}

/// Parse markup source text with the default compiler
///
/// Templates are resolved relative to the current directory.
pub fn parse(source: &str) -> Result<Embed, ParseError> {
    Compiler::new().parse_str(source)
}

/// Parse a markup file with the default compiler
pub fn parse_file(path: impl AsRef<Path>) -> Result<Embed, ParseError> {
    Compiler::new().parse_file(path)
}

/// Parse and serialize markup source text
///
/// This is the main entry point for the library.
///
/// # Example
///
/// ```rust
/// use embed_markup::compile;
///
/// let source = "# Server status\nAll systems operational.\n\n## Uptime\n99.9%&";
/// let value = compile(source).unwrap();
///
/// assert_eq!(value["fields"][0]["name"], "Uptime");
/// assert_eq!(value["fields"][0]["inline"], true);
/// ```
pub fn compile(source: &str) -> Result<Value, Error> {
    Compiler::new().compile_str(source)
}

/// Parse and serialize a markup file
pub fn compile_file(path: impl AsRef<Path>) -> Result<Value, Error> {
    Compiler::new().compile_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compile_simple_embed() {
        let value = compile("# Hello\nworld").unwrap();
        assert_eq!(value, json!({"title": "Hello", "description": "world"}));
    }

    #[test]
    fn test_compile_with_fields() {
        let value = compile("# T\nbody\n## A\none&\n## B\ntwo").unwrap();
        assert_eq!(
            value["fields"],
            json!([
                {"name": "A", "value": "one", "inline": true},
                {"name": "B", "value": "two"}
            ])
        );
    }

    #[test]
    fn test_compile_parse_error() {
        let err = compile("# T\n@bogus x").unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::UnknownCommand { .. })));
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_compile_missing_title() {
        let err = compile("just text").unwrap_err();
        assert!(matches!(err, Error::Embed(EmbedError::MissingTitle { .. })));
    }

    #[test]
    fn test_parse_keeps_name() {
        let embed = parse("@name status\n# T\nbody").unwrap();
        assert_eq!(embed.name.as_deref(), Some("status"));
    }

    #[test]
    fn test_parse_file_missing() {
        let err = parse_file("does/not/exist.dem").unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }
}
