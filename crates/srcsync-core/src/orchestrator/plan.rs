//! Per-URL planning: classify, resolve the name, pick download or update, expand.

use std::path::Path;

use crate::error::FetchError;
use crate::registry::SourceTypeRegistry;
use crate::source_type::CommandMode;

/// Everything needed to run one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPlan {
    /// Key of the matching source type.
    pub key: String,
    pub url: String,
    /// Local directory name, relative to the working directory.
    pub name: String,
    pub mode: CommandMode,
    pub command: String,
}

impl FetchPlan {
    /// Progress line printed before the command runs.
    pub fn announcement(&self) -> String {
        match self.mode {
            CommandMode::Download => format!("- Downloading {}...", self.url),
            CommandMode::Update => format!("- Updating {}...", self.url),
        }
    }
}

/// Plans `url` against `work_dir`: update when an entry named after the URL
/// already exists there, download otherwise.
pub fn plan_fetch(
    registry: &SourceTypeRegistry,
    work_dir: &Path,
    url: &str,
) -> Result<FetchPlan, FetchError> {
    let source_type = registry
        .classify(url)
        .ok_or_else(|| FetchError::UnclassifiableUrl(url.to_string()))?;
    let name = source_type.resolve_name(url)?;
    let mode = if work_dir.join(&name).exists() {
        CommandMode::Update
    } else {
        CommandMode::Download
    };
    let command = source_type.expand(url, &name, mode);
    tracing::debug!(key = source_type.key(), %url, %name, %mode, "planned");

    Ok(FetchPlan {
        key: source_type.key().to_string(),
        url: url.to_string(),
        name,
        mode,
        command,
    })
}
