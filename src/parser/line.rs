//! Line classification
//!
//! Every source line is comment-stripped, trimmed and then sorted into one
//! syntactic category by its leading characters.

use super::lexer::{strip_comments, COMMAND_SIGIL};

const HEADING: &str = "# ";
const SUB_HEADING: &str = "## ";
const COLOR_SIGIL: char = '%';
const TIMESTAMP_SIGIL: char = '?';

/// One classified source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// `# <title>`
    Heading(String),
    /// `## <title>`
    SubHeading(String),
    /// `@<name> <argument>`
    Command { name: String, argument: String },
    /// `%<r>[,<g>,<b>]`
    Color(String),
    /// `?<epoch seconds>` or `?$`
    Timestamp(String),
    /// Anything else, possibly empty
    Text(String),
}

impl Line {
    /// Whether this line is a directive rather than text
    pub fn is_directive(&self) -> bool {
        !matches!(self, Line::Text(_))
    }
}

/// A classified line with the comment flag from stripping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub line: Line,
    pub had_comment: bool,
}

/// Strip comments from a raw line and classify it
pub fn classify(raw: &str) -> ClassifiedLine {
    let (content, had_comment) = strip_comments(raw);
    let content = content.trim();

    let line = if let Some(title) = content.strip_prefix(HEADING) {
        Line::Heading(title.to_string())
    } else if let Some(title) = content.strip_prefix(SUB_HEADING) {
        Line::SubHeading(title.to_string())
    } else if let Some(command) = content.strip_prefix(COMMAND_SIGIL) {
        let (name, argument) = split_command(command);
        Line::Command {
            name: name.to_string(),
            argument: argument.to_string(),
        }
    } else if let Some(color) = content.strip_prefix(COLOR_SIGIL) {
        Line::Color(color.to_string())
    } else if let Some(timestamp) = content.strip_prefix(TIMESTAMP_SIGIL) {
        Line::Timestamp(timestamp.to_string())
    } else {
        Line::Text(content.to_string())
    };

    ClassifiedLine { line, had_comment }
}

/// Split `name argument` at the first space; the argument may be empty
fn split_command(command: &str) -> (&str, &str) {
    match command.split_once(' ') {
        Some((name, argument)) => (name, argument),
        None => (command, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(raw: &str) -> Line {
        classify(raw).line
    }

    #[test]
    fn test_heading() {
        assert_eq!(line("# Title\n"), Line::Heading("Title".to_string()));
        assert_eq!(line("  # Title  "), Line::Heading("Title".to_string()));
    }

    #[test]
    fn test_sub_heading() {
        assert_eq!(line("## Field"), Line::SubHeading("Field".to_string()));
    }

    #[test]
    fn test_hash_without_space_is_text() {
        assert_eq!(line("#hashtag"), Line::Text("#hashtag".to_string()));
        assert_eq!(line("###"), Line::Text("###".to_string()));
    }

    #[test]
    fn test_command() {
        assert_eq!(
            line("@url https://example.com/a:b"),
            Line::Command {
                name: "url".to_string(),
                argument: "https://example.com/a:b".to_string()
            }
        );
        assert_eq!(
            line("@author& https://example.com/icon.png"),
            Line::Command {
                name: "author&".to_string(),
                argument: "https://example.com/icon.png".to_string()
            }
        );
    }

    #[test]
    fn test_command_without_argument() {
        assert_eq!(
            line("@?"),
            Line::Command {
                name: "?".to_string(),
                argument: String::new()
            }
        );
    }

    #[test]
    fn test_directives() {
        assert_eq!(line("%255,0,0"), Line::Color("255,0,0".to_string()));
        assert_eq!(line("?$"), Line::Timestamp("$".to_string()));
        assert!(line("?1600000000").is_directive());
    }

    #[test]
    fn test_text_with_comment() {
        let classified = classify("hello world: a note");
        assert_eq!(classified.line, Line::Text("hello world".to_string()));
        assert!(classified.had_comment);
    }

    #[test]
    fn test_comment_only_line_is_empty_text() {
        assert_eq!(line(": just a comment"), Line::Text(String::new()));
    }

    #[test]
    fn test_comment_applies_before_classification() {
        // Headings are comment-stripped like text
        assert_eq!(line("# Title: subtitle"), Line::Heading("Title".to_string()));
    }
}
