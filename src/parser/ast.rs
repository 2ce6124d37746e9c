//! Document model produced by the embed markup parser

use std::path::PathBuf;

/// Author block of an embed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub icon_url: String,
    pub url: String,
}

/// Footer block of an embed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Footer {
    pub text: String,
    pub icon_url: String,
}

/// A single string-valued attribute that commands can set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    AuthorName,
    AuthorIcon,
    AuthorUrl,
    Url,
    Thumbnail,
    FooterText,
    FooterIcon,
}

/// Metadata shared by embeds, blueprints and templates
///
/// Empty strings and a zero color mean "unset"; template merging only ever
/// fills unset values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pub url: String,
    /// 24-bit RGB packed as `0xRRGGBB`
    pub color: u32,
    /// ISO-8601 timestamp
    pub timestamp: String,
    pub author: Author,
    pub footer: Footer,
    pub thumbnail: String,
}

impl Attributes {
    /// Set a string attribute, overwriting any previous value
    pub fn set(&mut self, attribute: Attribute, value: impl Into<String>) {
        *self.slot(attribute) = value.into();
    }

    /// Read a string attribute
    pub fn get(&self, attribute: Attribute) -> &str {
        match attribute {
            Attribute::AuthorName => &self.author.name,
            Attribute::AuthorIcon => &self.author.icon_url,
            Attribute::AuthorUrl => &self.author.url,
            Attribute::Url => &self.url,
            Attribute::Thumbnail => &self.thumbnail,
            Attribute::FooterText => &self.footer.text,
            Attribute::FooterIcon => &self.footer.icon_url,
        }
    }

    fn slot(&mut self, attribute: Attribute) -> &mut String {
        match attribute {
            Attribute::AuthorName => &mut self.author.name,
            Attribute::AuthorIcon => &mut self.author.icon_url,
            Attribute::AuthorUrl => &mut self.author.url,
            Attribute::Url => &mut self.url,
            Attribute::Thumbnail => &mut self.thumbnail,
            Attribute::FooterText => &mut self.footer.text,
            Attribute::FooterIcon => &mut self.footer.icon_url,
        }
    }

    /// Copy every value set on `defaults` into attributes that are still unset here
    pub fn fill_from(&mut self, defaults: &Attributes) {
        const STRINGS: [Attribute; 7] = [
            Attribute::AuthorName,
            Attribute::AuthorIcon,
            Attribute::AuthorUrl,
            Attribute::Url,
            Attribute::Thumbnail,
            Attribute::FooterText,
            Attribute::FooterIcon,
        ];
        for attribute in STRINGS {
            let value = defaults.get(attribute);
            let slot = self.slot(attribute);
            if slot.is_empty() && !value.is_empty() {
                *slot = value.to_string();
            }
        }
        if self.color == 0 {
            self.color = defaults.color;
        }
        if self.timestamp.is_empty() {
            self.timestamp = defaults.timestamp.clone();
        }
    }
}

/// A titled sub-section of an embed body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    pub title: String,
    pub text: String,
}

impl Field {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: String::new(),
        }
    }
}

/// A parsed embed document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub text: String,
    pub attributes: Attributes,
    pub image: String,
    pub fields: Vec<Field>,
    /// Symbolic name set by `@name`, used for lookups by caching layers
    pub name: Option<String>,
}

/// A metadata-only default supplier loaded through `@template`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    pub path: PathBuf,
    pub attributes: Attributes,
}

/// A placeholder declared with `@replace`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub token: String,
    pub default: Option<String>,
}
