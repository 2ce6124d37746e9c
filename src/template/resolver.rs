//! Template resolution - loads `@template` files and tracks the inclusion chain

use std::io;
use std::path::{Path, PathBuf};

use crate::config::CompilerConfig;
use crate::error::ParseError;
use crate::parser::ast::Template;
use crate::parser::engine::{parse_lines, Mode};

use super::source::{normalize_path, LineSource};

/// Loads templates and guards against cyclic inclusion
pub struct Resolver<'a> {
    source: &'a dyn LineSource,
    config: &'a CompilerConfig,
    /// Template files currently being parsed, outermost first
    chain: Vec<PathBuf>,
}

impl<'a> Resolver<'a> {
    pub fn new(source: &'a dyn LineSource, config: &'a CompilerConfig) -> Self {
        Self {
            source,
            config,
            chain: Vec::new(),
        }
    }

    /// Path of template `name` included from a file in `directory`
    pub fn template_path(&self, directory: &Path, name: &str) -> PathBuf {
        normalize_path(&directory.join(self.config.template_file_name(name)))
    }

    /// Templates currently being resolved, outermost first
    pub fn chain(&self) -> &[PathBuf] {
        &self.chain
    }

    /// Load and parse template `name` relative to `directory`
    ///
    /// Returns `Ok(None)` when the template file does not exist; the include
    /// is skipped with a warning.
    pub fn load(&mut self, directory: &Path, name: &str) -> Result<Option<Template>, ParseError> {
        let path = self.template_path(directory, name);

        if self.chain.contains(&path) {
            let mut chain = self.chain.clone();
            chain.push(path);
            return Err(ParseError::CyclicTemplate { chain });
        }
        if self.chain.len() >= self.config.max_template_depth {
            return Err(ParseError::TemplateTooDeep {
                path,
                limit: self.config.max_template_depth,
            });
        }

        let lines = match self.source.read_lines(&path) {
            Ok(lines) => lines,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(template = name, path = %path.display(), "could not load template");
                return Ok(None);
            }
            Err(source) => return Err(ParseError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), depth = self.chain.len(), "loading template");
        let template_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        self.chain.push(path.clone());
        let parsed = parse_lines(&lines, Mode::Template, &template_dir, self);
        self.chain.pop();

        let parsed = parsed.map_err(|e| ParseError::Template {
            path: path.clone(),
            source: Box::new(e),
        })?;

        Ok(Some(Template {
            path,
            attributes: parsed.embed.attributes,
        }))
    }
}
