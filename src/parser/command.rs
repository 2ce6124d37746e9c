//! Command decoding
//!
//! Command names are decoded once into [`Command`] so that dispatch is an
//! exhaustive match. Color and timestamp arguments are validated here too,
//! since `%` and `?` directives share the same argument grammar.

use chrono::{DateTime, SecondsFormat, Utc};
use chumsky::prelude::*;
use chumsky::text;

use super::ast::Attribute;

/// A decoded `@` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `@author`, `@author&`, `@author?`, `@url`, `@?`, `@thumbnail`, `@footer`, `@footer&`
    Set(Attribute, String),
    /// `@color <r>[,<g>,<b>]`
    Color(u32),
    /// `@template <name>`
    Template(String),
    /// `@image <url>`
    Image(String),
    /// `@name <name>`
    Name(String),
    /// `@replace <token>[? <default>]`
    Replace { token: String, default: Option<String> },
}

/// Why a command could not be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    Unknown,
    Color(String),
    Replacement,
}

impl Command {
    /// Decode a command name and its argument
    pub fn decode(name: &str, argument: &str) -> Result<Self, CommandError> {
        let set = |attribute: Attribute| -> Result<Self, CommandError> {
            Ok(Command::Set(attribute, argument.to_string()))
        };
        match name {
            "author" => set(Attribute::AuthorName),
            "author&" => set(Attribute::AuthorIcon),
            "author?" => set(Attribute::AuthorUrl),
            "url" | "?" => set(Attribute::Url),
            "thumbnail" => set(Attribute::Thumbnail),
            "footer" => set(Attribute::FooterText),
            "footer&" => set(Attribute::FooterIcon),
            "color" => parse_color(argument)
                .map(Command::Color)
                .map_err(CommandError::Color),
            "template" => Ok(Command::Template(argument.trim().to_string())),
            "image" => Ok(Command::Image(argument.to_string())),
            "name" => Ok(Command::Name(argument.trim().to_string())),
            "replace" => parse_replacement(argument).ok_or(CommandError::Replacement),
            _ => Err(CommandError::Unknown),
        }
    }
}

fn channels<'a>() -> impl Parser<'a, &'a str, Vec<String>, extra::Err<Rich<'a, char>>> {
    text::digits(10)
        .collect::<String>()
        .padded()
        .separated_by(just(','))
        .at_least(1)
        .collect::<Vec<_>>()
        .then_ignore(end())
}

/// Parse 1 or 3 comma separated values between 0 and 255 into `0xRRGGBB`
///
/// A single value is used for all three channels.
pub fn parse_color(argument: &str) -> Result<u32, String> {
    let parts = channels().parse(argument).into_result().map_err(|errs| {
        errs.into_iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    })?;

    let mut rgb = Vec::with_capacity(parts.len());
    for part in parts {
        let channel = part
            .parse::<u8>()
            .map_err(|_| format!("{} is out of range 0-255", part))?;
        rgb.push(u32::from(channel));
    }

    match rgb.as_slice() {
        [gray] => Ok(pack_rgb(*gray, *gray, *gray)),
        [r, g, b] => Ok(pack_rgb(*r, *g, *b)),
        other => Err(format!("expected 1 or 3 values, found {}", other.len())),
    }
}

fn pack_rgb(r: u32, g: u32, b: u32) -> u32 {
    (r << 16) | (g << 8) | b
}

/// Parse a timestamp argument: `$` for now, otherwise Unix epoch seconds
///
/// Returns an ISO-8601 string with second precision.
pub fn parse_timestamp(argument: &str) -> Option<String> {
    let argument = argument.trim();
    let time = if argument == "$" {
        Utc::now()
    } else {
        let seconds = argument.parse::<i64>().ok()?;
        DateTime::from_timestamp(seconds, 0)?
    };
    Some(time.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Parse `<token>` or `<token>? <default>`
///
/// Tokens cannot contain spaces or `?`.
fn parse_replacement(argument: &str) -> Option<Command> {
    let argument = argument.trim();
    let (head, rest) = match argument.split_once(' ') {
        Some((head, rest)) => (head, Some(rest)),
        None => (argument, None),
    };

    let (token, default) = match (head.strip_suffix('?'), rest) {
        (Some(token), rest) => (token, Some(rest.unwrap_or("").trim().to_string())),
        (None, None) => (head, None),
        // A default needs the `?` marker
        (None, Some(_)) => return None,
    };

    if token.is_empty() || token.contains('?') {
        return None;
    }
    Some(Command::Replace {
        token: token.to_string(),
        default,
    })
}
