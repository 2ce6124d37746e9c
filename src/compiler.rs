//! Entry points tying line sources, template resolution and parsing together

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::blueprint::Blueprint;
use crate::config::CompilerConfig;
use crate::error::ParseError;
use crate::parser::ast::{Embed, Template};
use crate::parser::engine::{parse_lines, Mode, Parsed};
use crate::template::{FileSource, LineSource, Resolver};
use crate::Error;

/// Parses embed markup from strings, line sequences or files
#[derive(Debug, Clone)]
pub struct Compiler<S = FileSource> {
    source: S,
    config: CompilerConfig,
    /// Directory templates are resolved from when parsing strings
    base_dir: PathBuf,
}

impl Default for Compiler<FileSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler<FileSource> {
    /// Create a compiler that reads templates from disk
    pub fn new() -> Self {
        Self::with_source(FileSource)
    }
}

impl<S: LineSource> Compiler<S> {
    /// Create a compiler over any line source
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            config: CompilerConfig::default(),
            base_dir: PathBuf::from("."),
        }
    }

    /// Set the configuration
    pub fn with_config(mut self, config: CompilerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the directory templates are resolved from for string input
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn run<I, L>(&self, lines: I, mode: Mode, directory: &Path) -> Result<Parsed, ParseError>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut resolver = Resolver::new(&self.source, &self.config);
        parse_lines(lines, mode, directory, &mut resolver)
    }

    fn run_file(&self, path: &Path, mode: Mode) -> Result<Parsed, ParseError> {
        tracing::debug!(path = %path.display(), mode = mode.name(), "parsing file");
        let lines = self.source.read_lines(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let directory = path.parent().unwrap_or_else(|| Path::new("."));
        self.run(&lines, mode, directory)
    }

    /// Parse a sequence of lines into an embed
    pub fn parse_lines<I, L>(&self, lines: I) -> Result<Embed, ParseError>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        Ok(self.run(lines, Mode::Embed, &self.base_dir)?.embed)
    }

    /// Parse markup source text into an embed
    pub fn parse_str(&self, source: &str) -> Result<Embed, ParseError> {
        self.parse_lines(source.lines())
    }

    /// Parse a markup file into an embed
    ///
    /// A missing file is a fatal [`ParseError::Io`], unlike a missing template.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Embed, ParseError> {
        Ok(self.run_file(path.as_ref(), Mode::Embed)?.embed)
    }

    /// Parse a template file on its own
    pub fn parse_template_file(&self, path: impl AsRef<Path>) -> Result<Template, ParseError> {
        let path = path.as_ref();
        let parsed = self.run_file(path, Mode::Template)?;
        Ok(Template {
            path: path.to_path_buf(),
            attributes: parsed.embed.attributes,
        })
    }

    /// Parse a sequence of lines into a blueprint
    pub fn parse_blueprint_lines<I, L>(&self, lines: I) -> Result<Blueprint, ParseError>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let parsed = self.run(lines, Mode::Blueprint, &self.base_dir)?;
        Ok(Blueprint {
            embed: parsed.embed,
            replacements: parsed.replacements,
        })
    }

    /// Parse blueprint source text
    pub fn parse_blueprint_str(&self, source: &str) -> Result<Blueprint, ParseError> {
        self.parse_blueprint_lines(source.lines())
    }

    /// Parse a blueprint file
    pub fn parse_blueprint_file(&self, path: impl AsRef<Path>) -> Result<Blueprint, ParseError> {
        let parsed = self.run_file(path.as_ref(), Mode::Blueprint)?;
        Ok(Blueprint {
            embed: parsed.embed,
            replacements: parsed.replacements,
        })
    }

    /// Parse and serialize markup source text
    pub fn compile_str(&self, source: &str) -> Result<Value, Error> {
        Ok(self.parse_str(source)?.to_value()?)
    }

    /// Parse and serialize a markup file
    pub fn compile_file(&self, path: impl AsRef<Path>) -> Result<Value, Error> {
        Ok(self.parse_file(path)?.to_value()?)
    }
}
