//! Caching layer over the compiler
//!
//! Compiled embeds and parsed blueprints are cached by file path and, when
//! the document sets `@name`, by that symbolic name. Each cache is locked for
//! the whole computation, so every key is computed at most once.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::Value;

use crate::blueprint::Blueprint;
use crate::compiler::Compiler;
use crate::template::{normalize_path, FileSource, LineSource};
use crate::Error;

#[derive(Debug, Default)]
struct Cache<T> {
    by_path: HashMap<PathBuf, T>,
    by_name: HashMap<String, T>,
}

/// A cache of compiled embeds and blueprints
#[derive(Debug)]
pub struct Library<S = FileSource> {
    compiler: Compiler<S>,
    caching: bool,
    embeds: Mutex<Cache<Value>>,
    blueprints: Mutex<Cache<Arc<Blueprint>>>,
}

impl Default for Library<FileSource> {
    fn default() -> Self {
        Self::new(Compiler::new())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<S: LineSource> Library<S> {
    pub fn new(compiler: Compiler<S>) -> Self {
        Self {
            compiler,
            caching: true,
            embeds: Mutex::new(Cache::default()),
            blueprints: Mutex::new(Cache::default()),
        }
    }

    /// Always recompile; nothing is stored or served from the cache
    pub fn disable_caching(&mut self) {
        self.caching = false;
    }

    pub fn compiler(&self) -> &Compiler<S> {
        &self.compiler
    }

    /// Compile an embed file, serving repeated requests from the cache
    pub fn compile(&self, path: impl AsRef<Path>) -> Result<Value, Error> {
        let path = path.as_ref();
        if !self.caching {
            return self.compiler.compile_file(path);
        }

        let key = normalize_path(path);
        let mut cache = lock(&self.embeds);
        if let Some(value) = cache.by_path.get(&key) {
            return Ok(value.clone());
        }

        let embed = self.compiler.parse_file(path)?;
        let value = embed.to_value()?;
        if let Some(name) = embed.name {
            cache.by_name.insert(name, value.clone());
        }
        cache.by_path.insert(key, value.clone());
        Ok(value)
    }

    /// Parse a blueprint file, serving repeated requests from the cache
    pub fn blueprint(&self, path: impl AsRef<Path>) -> Result<Arc<Blueprint>, Error> {
        let path = path.as_ref();
        if !self.caching {
            return Ok(Arc::new(self.compiler.parse_blueprint_file(path)?));
        }

        let key = normalize_path(path);
        let mut cache = lock(&self.blueprints);
        if let Some(blueprint) = cache.by_path.get(&key) {
            return Ok(Arc::clone(blueprint));
        }

        let blueprint = Arc::new(self.compiler.parse_blueprint_file(path)?);
        if let Some(name) = blueprint.name() {
            cache.by_name.insert(name.to_string(), Arc::clone(&blueprint));
        }
        cache.by_path.insert(key, Arc::clone(&blueprint));
        Ok(blueprint)
    }

    /// Look up a compiled embed by its `@name`
    pub fn load_embed(&self, name: &str) -> Result<Value, Error> {
        lock(&self.embeds)
            .by_name
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotLoaded {
                name: name.to_string(),
            })
    }

    /// Look up a parsed blueprint by its `@name`
    pub fn load_blueprint(&self, name: &str) -> Result<Arc<Blueprint>, Error> {
        lock(&self.blueprints)
            .by_name
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotLoaded {
                name: name.to_string(),
            })
    }
}
