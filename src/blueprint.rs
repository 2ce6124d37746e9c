//! Blueprints - embeds with placeholder tokens filled in at render time
//!
//! A blueprint declares tokens with `@replace <token>[? <default>]`. Rendering
//! serializes the embed, then replaces every literal occurrence of each token
//! in every string value of the result.
//!
//! # Usage
//!
//! ```
//! use std::collections::HashMap;
//! use embed_markup::Compiler;
//!
//! let blueprint = Compiler::new()
//!     .parse_blueprint_str("@replace name? Guest\n# Welcome\nHello name")
//!     .unwrap();
//!
//! let value = blueprint.render(&HashMap::new()).unwrap();
//! assert_eq!(value["description"], "Hello Guest");
//!
//! let overrides = HashMap::from([("name".to_string(), "Ada".to_string())]);
//! let value = blueprint.render(&overrides).unwrap();
//! assert_eq!(value["description"], "Hello Ada");
//! ```

use std::collections::HashMap;

use serde_json::Value;

use crate::error::EmbedError;
use crate::parser::ast::{Embed, Replacement};
use crate::serialize::{assert_filled, field_context, is_empty_value};

/// A parsed blueprint: an embed plus its declared placeholders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blueprint {
    pub embed: Embed,
    /// Declared placeholders in declaration order
    pub replacements: Vec<Replacement>,
}

impl Blueprint {
    /// Symbolic name set by `@name`
    pub fn name(&self) -> Option<&str> {
        self.embed.name.as_deref()
    }

    /// Resolve the value of every declared token
    ///
    /// Overrides win over defaults. Overrides for undeclared tokens are ignored.
    pub fn resolve<'a>(
        &'a self,
        overrides: &'a HashMap<String, String>,
    ) -> Result<Vec<(&'a str, &'a str)>, EmbedError> {
        self.replacements
            .iter()
            .map(|r| {
                overrides
                    .get(&r.token)
                    .or(r.default.as_ref())
                    .map(|value| (r.token.as_str(), value.as_str()))
                    .ok_or_else(|| EmbedError::MissingReplacement {
                        token: r.token.clone(),
                    })
            })
            .collect()
    }

    /// Serialize the embed and substitute every placeholder
    ///
    /// Values emptied by substitution are dropped, and the title and text
    /// of the embed and its fields must still be filled afterwards.
    pub fn render(&self, overrides: &HashMap<String, String>) -> Result<Value, EmbedError> {
        let replacements = self.resolve(overrides)?;
        let mut value = self.embed.to_value()?;
        substitute(&mut value, &replacements);
        prune_empty(&mut value);
        check_rendered(&value)?;
        Ok(value)
    }
}

/// Remove object entries that are empty, innermost first
fn prune_empty(value: &mut Value) {
    match value {
        Value::Array(items) => items.iter_mut().for_each(prune_empty),
        Value::Object(map) => {
            map.values_mut().for_each(prune_empty);
            map.retain(|_, item| !is_empty_value(item));
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

fn string_at<'v>(value: &'v Value, key: &str) -> &'v str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

fn check_rendered(value: &Value) -> Result<(), EmbedError> {
    assert_filled(string_at(value, "title"), string_at(value, "description"), || {
        "embed".to_string()
    })?;
    let fields = value.get("fields").and_then(Value::as_array);
    for field in fields.into_iter().flatten() {
        let name = string_at(field, "name");
        assert_filled(name, string_at(field, "value"), || field_context(name))?;
    }
    Ok(())
}

/// Replace tokens in every string leaf of `value`; keys are left alone
pub fn substitute(value: &mut Value, replacements: &[(&str, &str)]) {
    match value {
        Value::String(s) => *s = replace_tokens(s, replacements),
        Value::Array(items) => {
            for item in items {
                substitute(item, replacements);
            }
        }
        Value::Object(map) => {
            for (_, item) in map.iter_mut() {
                substitute(item, replacements);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

/// Single left-to-right pass; at each position the first declared token that
/// matches wins. Substituted text is never scanned again.
fn replace_tokens(text: &str, replacements: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    'scan: while let Some(c) = rest.chars().next() {
        for (token, value) in replacements {
            if !token.is_empty() && rest.starts_with(token) {
                result.push_str(value);
                rest = &rest[token.len()..];
                continue 'scan;
            }
        }
        result.push(c);
        rest = &rest[c.len_utf8()..];
    }

    result
}
