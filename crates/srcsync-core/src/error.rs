//! Error types shared by the registry, name resolver and orchestrator.

use thiserror::Error;

/// A malformed source-type descriptor. Raised while building the registry,
/// before any URL is processed.
#[derive(Debug, Error)]
pub enum SourceTypeError {
    #[error("source type has an empty key")]
    EmptyKey,

    #[error("duplicate source type key '{0}'")]
    DuplicateKey(String),

    #[error("source type '{key}': {field} must not be empty")]
    EmptyField { key: String, field: &'static str },

    #[error("source type '{key}': invalid {field}")]
    InvalidPattern {
        key: String,
        field: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("source type '{key}': filename_pattern needs exactly one capture group, found {found}")]
    CaptureGroups { key: String, found: usize },

    #[error("source type '{key}': download template must not contain the #download directive")]
    NestedDirective { key: String },
}

/// A URL matched a source type but no usable directory name could be derived.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameResolutionError {
    #[error("URL path of '{url}' has no final segment to name a directory after")]
    EmptyName { url: String },

    #[error("'{name}' derived from '{url}' is not a usable directory name")]
    InvalidName { url: String, name: String },
}

/// Per-URL failure before a command could be run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("no source type matches '{0}'")]
    UnclassifiableUrl(String),

    #[error("unknown source type '{0}'")]
    UnknownSourceType(String),

    #[error(transparent)]
    Name(#[from] NameResolutionError),
}
