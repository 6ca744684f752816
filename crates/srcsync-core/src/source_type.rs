//! Source-type descriptors: the raw (config-facing) record and its compiled form.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{NameResolutionError, SourceTypeError};
use crate::naming;
use crate::template::{self, DOWNLOAD_DIRECTIVE};

/// One source kind as written in the built-in table or in `config.toml`.
///
/// ```toml
/// [[source_types]]
/// key = "xz"
/// url_pattern = '(\.tar\.xz)$'
/// extension = ".tar.xz"
/// download = "mkdir ./$filename; wget $url; tar xJf $filename.tar.xz -C ./$filename; rm -f $filename.tar.xz;"
/// update = "rm $filename -rf; #download"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTypeDef {
    /// Unique short identifier (e.g. "git").
    pub key: String,
    /// Regex searched (unanchored) in the URL.
    pub url_pattern: String,
    /// Literal suffix stripped from the URL basename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Regex with exactly one capture group that yields the directory name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename_pattern: Option<String>,
    /// Command run when the target directory does not exist yet.
    pub download: String,
    /// Command run when the target directory exists; may contain `#download`.
    pub update: String,
}

/// Whether the target is fetched for the first time or refreshed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandMode {
    Download,
    Update,
}

impl fmt::Display for CommandMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandMode::Download => write!(f, "download"),
            CommandMode::Update => write!(f, "update"),
        }
    }
}

/// A validated descriptor with its patterns compiled. Never mutated after construction.
#[derive(Debug, Clone)]
pub struct SourceType {
    key: String,
    url_pattern: Regex,
    extension: Option<String>,
    filename_pattern: Option<Regex>,
    download: String,
    update: String,
}

impl SourceType {
    /// Validate and compile a descriptor.
    pub fn compile(def: &SourceTypeDef) -> Result<Self, SourceTypeError> {
        let key = def.key.trim();
        if key.is_empty() {
            return Err(SourceTypeError::EmptyKey);
        }
        let empty = |field| SourceTypeError::EmptyField {
            key: key.to_string(),
            field,
        };
        if def.url_pattern.is_empty() {
            return Err(empty("url_pattern"));
        }
        if def.download.trim().is_empty() {
            return Err(empty("download"));
        }
        if def.update.trim().is_empty() {
            return Err(empty("update"));
        }
        if def.download.contains(DOWNLOAD_DIRECTIVE) {
            return Err(SourceTypeError::NestedDirective {
                key: key.to_string(),
            });
        }

        let compile = |pattern: &str, field| {
            Regex::new(pattern).map_err(|source| SourceTypeError::InvalidPattern {
                key: key.to_string(),
                field,
                source,
            })
        };
        let url_pattern = compile(&def.url_pattern, "url_pattern")?;
        let filename_pattern = match def.filename_pattern.as_deref() {
            Some(pattern) => {
                let re = compile(pattern, "filename_pattern")?;
                // captures_len counts the implicit whole-match group.
                let found = re.captures_len() - 1;
                if found != 1 {
                    return Err(SourceTypeError::CaptureGroups {
                        key: key.to_string(),
                        found,
                    });
                }
                Some(re)
            }
            None => None,
        };

        Ok(Self {
            key: key.to_string(),
            url_pattern,
            extension: def.extension.clone().filter(|e| !e.is_empty()),
            filename_pattern,
            download: def.download.clone(),
            update: def.update.clone(),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn url_pattern(&self) -> &str {
        self.url_pattern.as_str()
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    pub fn filename_pattern(&self) -> Option<&str> {
        self.filename_pattern.as_ref().map(Regex::as_str)
    }

    /// Raw (unexpanded) template for the given mode.
    pub fn template(&self, mode: CommandMode) -> &str {
        match mode {
            CommandMode::Download => &self.download,
            CommandMode::Update => &self.update,
        }
    }

    /// True if `url_pattern` is found anywhere in `url`.
    pub fn matches(&self, url: &str) -> bool {
        self.url_pattern.is_match(url)
    }

    /// Local directory name for `url`. See [`naming::resolve_name`].
    pub fn resolve_name(&self, url: &str) -> Result<String, NameResolutionError> {
        naming::resolve_name(self.filename_pattern.as_ref(), self.extension.as_deref(), url)
    }

    /// Shell command line for `url` / `name` in the given mode.
    pub fn expand(&self, url: &str, name: &str, mode: CommandMode) -> String {
        template::expand(&self.download, &self.update, url, name, mode)
    }
}
