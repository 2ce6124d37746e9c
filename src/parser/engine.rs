//! Line-by-line parser state machine
//!
//! Each line is classified, then either dispatched as a directive or appended
//! to the active context. The active context is the embed itself after a
//! `# ` heading or the latest field after a `## ` heading; text before any
//! heading is dropped.

use std::path::Path;

use crate::error::{ParseError, Span};
use crate::template::Resolver;

use super::ast::{Embed, Field, Replacement};
use super::command::{parse_color, parse_timestamp, Command, CommandError};
use super::line::{classify, Line};

/// What kind of document is being parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Embed,
    Blueprint,
    /// Only directives are allowed; titles, fields and text are errors
    Template,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Embed => "embed",
            Mode::Blueprint => "blueprint",
            Mode::Template => "template",
        }
    }
}

/// Result of parsing one file
#[derive(Debug, Clone, Default)]
pub struct Parsed {
    pub embed: Embed,
    /// Placeholders declared with `@replace`, in declaration order
    pub replacements: Vec<Replacement>,
}

/// Accumulator that receives text lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveContext {
    Embed,
    Field(usize),
}

/// Source position of the line being processed
#[derive(Debug, Clone)]
struct Position {
    line: usize,
    span: Span,
}

struct Engine<'d> {
    mode: Mode,
    directory: &'d Path,
    parsed: Parsed,
    context: Option<ActiveContext>,
    previous_empty: bool,
}

/// Parse a sequence of lines
///
/// `directory` is where `@template` names are resolved from.
pub fn parse_lines<I, L>(
    lines: I,
    mode: Mode,
    directory: &Path,
    resolver: &mut Resolver<'_>,
) -> Result<Parsed, ParseError>
where
    I: IntoIterator<Item = L>,
    L: AsRef<str>,
{
    let mut engine = Engine {
        mode,
        directory,
        parsed: Parsed::default(),
        context: None,
        previous_empty: false,
    };

    let mut offset = 0;
    for (index, raw) in lines.into_iter().enumerate() {
        let raw = raw.as_ref();
        let content = raw.trim_end_matches(['\n', '\r']);
        let position = Position {
            line: index + 1,
            span: offset..offset + content.len(),
        };
        offset = position.span.end + 1;
        engine.line(content, &position, resolver)?;
    }

    Ok(engine.parsed)
}

impl Engine<'_> {
    fn line(
        &mut self,
        raw: &str,
        at: &Position,
        resolver: &mut Resolver<'_>,
    ) -> Result<(), ParseError> {
        // Only text lines touch the paragraph flag
        match classify(raw).line {
            Line::Text(text) => self.text(text, raw, at)?,
            Line::Heading(title) => {
                self.reject_in_template(raw, at)?;
                self.parsed.embed.title = title;
                self.context = Some(ActiveContext::Embed);
            }
            Line::SubHeading(title) => {
                self.reject_in_template(raw, at)?;
                self.parsed.embed.fields.push(Field::new(title));
                self.context = Some(ActiveContext::Field(self.parsed.embed.fields.len() - 1));
            }
            Line::Command { name, argument } => self.command(&name, &argument, at, resolver)?,
            Line::Color(argument) => {
                self.parsed.embed.attributes.color =
                    parse_color(&argument).map_err(|reason| ParseError::InvalidColor {
                        argument: argument.clone(),
                        reason,
                        line: at.line,
                        span: at.span.clone(),
                    })?;
            }
            Line::Timestamp(argument) => {
                self.parsed.embed.attributes.timestamp =
                    parse_timestamp(&argument).ok_or_else(|| ParseError::InvalidTimestamp {
                        argument: argument.clone(),
                        line: at.line,
                        span: at.span.clone(),
                    })?;
            }
        }
        Ok(())
    }

    /// Append a text line, folding blank lines into one paragraph break
    fn text(&mut self, text: String, raw: &str, at: &Position) -> Result<(), ParseError> {
        if text.is_empty() {
            self.previous_empty = true;
            return Ok(());
        }
        self.reject_in_template(raw, at)?;

        let separator = if self.previous_empty { '\n' } else { ' ' };
        self.previous_empty = false;

        let buffer = match self.context {
            Some(ActiveContext::Embed) => &mut self.parsed.embed.text,
            Some(ActiveContext::Field(index)) => &mut self.parsed.embed.fields[index].text,
            None => return Ok(()),
        };
        buffer.push(separator);
        buffer.push_str(&text);
        Ok(())
    }

    fn command(
        &mut self,
        name: &str,
        argument: &str,
        at: &Position,
        resolver: &mut Resolver<'_>,
    ) -> Result<(), ParseError> {
        let command = Command::decode(name, argument).map_err(|e| match e {
            CommandError::Unknown => ParseError::UnknownCommand {
                name: name.to_string(),
                line: at.line,
                span: at.span.clone(),
            },
            CommandError::Color(reason) => ParseError::InvalidColor {
                argument: argument.to_string(),
                reason,
                line: at.line,
                span: at.span.clone(),
            },
            CommandError::Replacement => ParseError::InvalidReplacement {
                argument: argument.to_string(),
                line: at.line,
                span: at.span.clone(),
            },
        })?;

        match command {
            Command::Set(attribute, value) => self.parsed.embed.attributes.set(attribute, value),
            Command::Color(color) => self.parsed.embed.attributes.color = color,
            Command::Template(template) => {
                if let Some(template) = resolver.load(self.directory, &template)? {
                    self.parsed.embed.attributes.fill_from(&template.attributes);
                }
            }
            Command::Image(url) => {
                self.allow(name, self.mode != Mode::Template, at)?;
                self.parsed.embed.image = url;
            }
            Command::Name(symbol) => {
                self.allow(name, self.mode != Mode::Template, at)?;
                self.parsed.embed.name = (!symbol.is_empty()).then_some(symbol);
            }
            Command::Replace { token, default } => {
                self.allow(name, self.mode == Mode::Blueprint, at)?;
                let replacements = &mut self.parsed.replacements;
                match replacements.iter_mut().find(|r| r.token == token) {
                    Some(existing) => existing.default = default,
                    None => replacements.push(Replacement { token, default }),
                }
            }
        }
        Ok(())
    }

    fn allow(&self, name: &str, allowed: bool, at: &Position) -> Result<(), ParseError> {
        if allowed {
            return Ok(());
        }
        Err(ParseError::CommandNotAllowed {
            name: name.to_string(),
            kind: self.mode.name(),
            line: at.line,
            span: at.span.clone(),
        })
    }

    fn reject_in_template(&self, raw: &str, at: &Position) -> Result<(), ParseError> {
        if self.mode != Mode::Template {
            return Ok(());
        }
        Err(ParseError::TextInTemplate {
            content: raw.trim().to_string(),
            line: at.line,
            span: at.span.clone(),
        })
    }
}
