//! Ordered registry of source types and the URL classifier over it.

mod builtin;

use std::collections::HashMap;

use crate::error::{FetchError, SourceTypeError};
use crate::source_type::{CommandMode, SourceType, SourceTypeDef};

pub use builtin::builtin_defs;

/// Process-wide table of source types. Built once, then only queried.
///
/// Iteration (and so classification) follows declaration order; lookup by key
/// goes through a hash index.
#[derive(Debug, Clone)]
pub struct SourceTypeRegistry {
    types: Vec<SourceType>,
    index: HashMap<String, usize>,
}

impl SourceTypeRegistry {
    /// Build from descriptors in priority order, validating each one.
    pub fn new<'a, I>(defs: I) -> Result<Self, SourceTypeError>
    where
        I: IntoIterator<Item = &'a SourceTypeDef>,
    {
        let mut types = Vec::new();
        let mut index = HashMap::new();
        for def in defs {
            let source_type = SourceType::compile(def)?;
            let key = source_type.key().to_string();
            if index.contains_key(&key) {
                return Err(SourceTypeError::DuplicateKey(key));
            }
            index.insert(key, types.len());
            types.push(source_type);
        }
        tracing::debug!(count = types.len(), "source type registry built");
        Ok(Self { types, index })
    }

    /// The built-in table only.
    pub fn builtin() -> Result<Self, SourceTypeError> {
        Self::new(&builtin_defs())
    }

    /// User-defined types first (in the given order), then the built-ins.
    pub fn with_custom(custom: &[SourceTypeDef]) -> Result<Self, SourceTypeError> {
        let builtin = builtin_defs();
        Self::new(custom.iter().chain(builtin.iter()))
    }

    pub fn get(&self, key: &str) -> Option<&SourceType> {
        self.index.get(key).map(|&i| &self.types[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// First source type whose `url_pattern` occurs in `url`, if any.
    pub fn classify(&self, url: &str) -> Option<&SourceType> {
        if url.is_empty() {
            return None;
        }
        self.types.iter().find(|t| t.matches(url))
    }

    /// Directory name for `url` under the source type `key`.
    pub fn resolve_name(&self, key: &str, url: &str) -> Result<String, FetchError> {
        let source_type = self.lookup(key)?;
        Ok(source_type.resolve_name(url)?)
    }

    /// Expanded command line for `(key, url, name)` in `mode`.
    pub fn expand(
        &self,
        key: &str,
        url: &str,
        name: &str,
        mode: CommandMode,
    ) -> Result<String, FetchError> {
        Ok(self.lookup(key)?.expand(url, name, mode))
    }

    fn lookup(&self, key: &str) -> Result<&SourceType, FetchError> {
        self.get(key)
            .ok_or_else(|| FetchError::UnknownSourceType(key.to_string()))
    }
}
