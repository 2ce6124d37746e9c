//! Comment lexer for embed markup lines using logos
//!
//! A comment starts at the first `:` and runs to the end of the line.
//! `\:` writes a literal colon. Command lines are never comment-stripped so
//! urls and arguments can contain colons.

use logos::Logos;

/// Sigil that starts a command line
pub const COMMAND_SIGIL: char = '@';

/// Character that starts a comment
pub const COMMENT_DELIMITER: char = ':';

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum Token {
    #[token("\\:")]
    EscapedDelimiter,

    #[token(":")]
    Delimiter,

    #[token("\\")]
    Backslash,

    #[regex(r"[^:\\]+")]
    Text,
}

/// Strip the comment from a raw line
///
/// Returns the remaining content and whether a comment was removed.
pub fn strip_comments(line: &str) -> (String, bool) {
    if line.trim_start().starts_with(COMMAND_SIGIL) {
        return (line.to_string(), false);
    }

    let mut content = String::with_capacity(line.len());
    let mut lexer = Token::lexer(line);
    while let Some(token) = lexer.next() {
        match token {
            Ok(Token::Delimiter) => return (content, true),
            Ok(Token::EscapedDelimiter) => content.push(COMMENT_DELIMITER),
            Ok(Token::Backslash) | Ok(Token::Text) | Err(()) => content.push_str(lexer.slice()),
        }
    }
    (content, false)
}
