//! Conversion of parsed embeds into structured JSON values
//!
//! Only non-empty values are emitted: empty strings, zero, `false`, empty
//! lists and empty objects are left out entirely.

use serde_json::{Map, Value};

use crate::error::EmbedError;
use crate::parser::ast::{Embed, Field};

/// An object builder that drops empty values
#[derive(Debug, Default)]
pub struct NonEmptyMap(Map<String, Value>);

impl NonEmptyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` unless it is empty. Returns `&mut Self` for chaining.
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        if !is_empty_value(&value) {
            self.0.insert(key.to_string(), value);
        }
        self
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Whether a value counts as unset
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

pub(crate) fn assert_filled(
    title: &str,
    text: &str,
    context: impl Fn() -> String,
) -> Result<(), EmbedError> {
    if title.trim().is_empty() {
        return Err(EmbedError::MissingTitle { context: context() });
    }
    if text.trim().is_empty() {
        return Err(EmbedError::MissingText { context: context() });
    }
    Ok(())
}

/// Error context naming a field by its title
pub(crate) fn field_context(title: &str) -> String {
    if title.trim().is_empty() {
        "untitled field".to_string()
    } else {
        format!("field '{}'", title)
    }
}

impl Field {
    /// Whether the text ends with an unescaped `&`
    pub fn is_inline(&self) -> bool {
        let text = self.text.trim();
        text.ends_with('&') && !text.ends_with("\\&")
    }

    /// Trimmed text with the inline marker removed and `\&` unescaped
    pub fn value(&self) -> String {
        let text = self.text.trim();
        if let Some(escaped) = text.strip_suffix("\\&") {
            format!("{}&", escaped)
        } else if let Some(inline) = text.strip_suffix('&') {
            inline.trim_end().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn to_value(&self) -> Result<Value, EmbedError> {
        // The inline marker alone is not text
        let value = self.value();
        assert_filled(&self.title, &value, || field_context(&self.title))?;

        let mut out = NonEmptyMap::new();
        out.insert("name", self.title.as_str())
            .insert("value", value)
            .insert("inline", self.is_inline());
        Ok(out.into_value())
    }
}

impl Embed {
    /// Serialize into the structured embed object
    ///
    /// Fails when the title or text of the embed or of any field is empty.
    pub fn to_value(&self) -> Result<Value, EmbedError> {
        assert_filled(&self.title, &self.text, || "embed".to_string())?;

        let fields = self
            .fields
            .iter()
            .map(Field::to_value)
            .collect::<Result<Vec<_>, _>>()?;

        let attrs = &self.attributes;

        let mut footer = NonEmptyMap::new();
        footer
            .insert("text", attrs.footer.text.trim())
            .insert("icon_url", attrs.footer.icon_url.as_str());

        let mut image = NonEmptyMap::new();
        image.insert("url", self.image.as_str());

        let mut thumbnail = NonEmptyMap::new();
        thumbnail.insert("url", attrs.thumbnail.as_str());

        let mut author = NonEmptyMap::new();
        author
            .insert("name", attrs.author.name.as_str())
            .insert("url", attrs.author.url.as_str())
            .insert("icon_url", attrs.author.icon_url.as_str());

        let mut out = NonEmptyMap::new();
        out.insert("title", self.title.as_str())
            .insert("description", self.text.trim())
            .insert("url", attrs.url.as_str())
            .insert("timestamp", attrs.timestamp.as_str())
            .insert("color", attrs.color)
            .insert("footer", footer.into_value())
            .insert("fields", fields)
            .insert("image", image.into_value())
            .insert("thumbnail", thumbnail.into_value())
            .insert("author", author.into_value());
        Ok(out.into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::Attributes;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn embed(title: &str, text: &str) -> Embed {
        Embed {
            title: title.to_string(),
            text: text.to_string(),
            ..Default::default()
        }
    }

    fn field(title: &str, text: &str) -> Field {
        Field {
            title: title.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_minimal_embed() {
        let value = embed("Hello", " world ").to_value().expect("Should serialize");
        assert_eq!(value, json!({"title": "Hello", "description": "world"}));
    }

    #[test]
    fn test_all_attributes() {
        let mut e = embed("T", "body");
        e.image = "i.png".to_string();
        e.attributes = Attributes {
            url: "https://u".to_string(),
            color: 0xFF0000,
            timestamp: "1970-01-01T00:00:00Z".to_string(),
            thumbnail: "t.png".to_string(),
            ..Default::default()
        };
        e.attributes.author.name = "Ada".to_string();
        e.attributes.author.icon_url = "a.png".to_string();
        e.attributes.footer.icon_url = "f.png".to_string();
        e.fields.push(field("F", "v&"));

        let value = e.to_value().expect("Should serialize");
        assert_eq!(
            value,
            json!({
                "title": "T",
                "description": "body",
                "url": "https://u",
                "timestamp": "1970-01-01T00:00:00Z",
                "color": 16711680,
                "footer": {"icon_url": "f.png"},
                "fields": [{"name": "F", "value": "v", "inline": true}],
                "image": {"url": "i.png"},
                "thumbnail": {"url": "t.png"},
                "author": {"name": "Ada", "icon_url": "a.png"}
            })
        );
    }

    #[test]
    fn test_missing_title() {
        assert_eq!(
            embed("  ", "body").to_value(),
            Err(EmbedError::MissingTitle {
                context: "embed".to_string()
            })
        );
    }

    #[test]
    fn test_missing_text() {
        assert_eq!(
            embed("T", " \n ").to_value(),
            Err(EmbedError::MissingText {
                context: "embed".to_string()
            })
        );
    }

    #[test]
    fn test_field_errors_are_independent() {
        let mut e = embed("T", "body");
        e.fields.push(field("Good", "value"));
        e.fields.push(field("Empty", ""));
        assert_eq!(
            e.to_value(),
            Err(EmbedError::MissingText {
                context: "field 'Empty'".to_string()
            })
        );

        let mut e = embed("T", "body");
        e.fields.push(field("", "value"));
        assert!(matches!(e.to_value(), Err(EmbedError::MissingTitle { .. })));
    }

    #[test]
    fn test_inline_field() {
        let f = field("F", " value& ");
        assert!(f.is_inline());
        assert_eq!(
            f.to_value().expect("Should serialize"),
            json!({"name": "F", "value": "value", "inline": true})
        );
    }

    #[test]
    fn test_inline_marker_alone_is_missing_text() {
        assert_eq!(
            field("F", " & ").to_value(),
            Err(EmbedError::MissingText {
                context: "field 'F'".to_string()
            })
        );
        assert_eq!(
            field("F", "\\&").to_value().expect("Should serialize"),
            json!({"name": "F", "value": "&"})
        );
    }

    #[test]
    fn test_escaped_inline_marker() {
        let f = field("F", "value\\&");
        assert!(!f.is_inline());
        assert_eq!(
            f.to_value().expect("Should serialize"),
            json!({"name": "F", "value": "value&"})
        );
    }

    #[test]
    fn test_is_empty_value() {
        assert!(is_empty_value(&json!(null)));
        assert!(is_empty_value(&json!(0)));
        assert!(is_empty_value(&json!(false)));
        assert!(is_empty_value(&json!("")));
        assert!(is_empty_value(&json!([])));
        assert!(is_empty_value(&json!({})));
        assert!(!is_empty_value(&json!(1)));
        assert!(!is_empty_value(&json!(" ")));
    }
}
