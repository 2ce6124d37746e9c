//! Error types for parsing and serialization

use std::path::PathBuf;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Fatal errors raised while reading markup into a document
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("line {line}: unsupported command: {name}")]
    UnknownCommand { name: String, line: usize, span: Span },

    #[error("line {line}: command '{name}' is not allowed in a {kind}")]
    CommandNotAllowed {
        name: String,
        kind: &'static str,
        line: usize,
        span: Span,
    },

    #[error("line {line}: templates cannot contain titles, fields or text, found '{content}'")]
    TextInTemplate {
        content: String,
        line: usize,
        span: Span,
    },

    #[error("line {line}: '{argument}' could not be converted into a color: {reason}")]
    InvalidColor {
        argument: String,
        reason: String,
        line: usize,
        span: Span,
    },

    #[error("line {line}: '{argument}' is not a timestamp (expected '$' or epoch seconds)")]
    InvalidTimestamp {
        argument: String,
        line: usize,
        span: Span,
    },

    #[error("line {line}: invalid replacement declaration '{argument}'")]
    InvalidReplacement {
        argument: String,
        line: usize,
        span: Span,
    },

    #[error("cyclic template inclusion: {}", format_chain(chain))]
    CyclicTemplate { chain: Vec<PathBuf> },

    #[error("template nesting deeper than {limit} at {path}")]
    TemplateTooDeep { path: PathBuf, limit: usize },

    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("in template {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: Box<ParseError>,
    },
}

fn format_chain(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl ParseError {
    /// Get the source span if the error points at a single line
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::UnknownCommand { span, .. }
            | Self::CommandNotAllowed { span, .. }
            | Self::TextInTemplate { span, .. }
            | Self::InvalidColor { span, .. }
            | Self::InvalidTimestamp { span, .. }
            | Self::InvalidReplacement { span, .. } => Some(span),
            _ => None,
        }
    }

    /// Get the 1-based line number if available
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::UnknownCommand { line, .. }
            | Self::CommandNotAllowed { line, .. }
            | Self::TextInTemplate { line, .. }
            | Self::InvalidColor { line, .. }
            | Self::InvalidTimestamp { line, .. }
            | Self::InvalidReplacement { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Unwrap nested template errors down to the one that was raised first
    pub fn root(&self) -> &ParseError {
        match self {
            Self::Template { source, .. } => source.root(),
            other => other,
        }
    }

    /// Format the error with source context using ariadne
    ///
    /// Errors raised inside a template point into the template file, not
    /// `source`, so they fall back to the plain message.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span() else {
            return format!("Error: {}\n", self);
        };
        let span = span.start.min(source.len())..span.end.min(source.len());

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(self.label())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("Error: {}\n", self),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::UnknownCommand { .. } => "unknown command",
            Self::CommandNotAllowed { .. } => "not allowed here",
            Self::TextInTemplate { .. } => "template content must be directives",
            Self::InvalidColor { .. } => "expected 1 or 3 values between 0 and 255",
            Self::InvalidTimestamp { .. } => "invalid timestamp",
            Self::InvalidReplacement { .. } => "expected '<token>' or '<token>? <default>'",
            _ => "",
        }
    }
}

/// Errors raised when turning a parsed document into structured output
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EmbedError {
    #[error("title cannot be empty ({context})")]
    MissingTitle { context: String },

    #[error("text cannot be empty ({context})")]
    MissingText { context: String },

    #[error("missing replacement for '{token}'")]
    MissingReplacement { token: String },
}
