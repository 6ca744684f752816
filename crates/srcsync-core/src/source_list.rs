//! Line-oriented source list (`source.txt`): one URL per line, `#` starts a comment.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Default file name of the source list.
pub const DEFAULT_SOURCE_LIST: &str = "source.txt";

/// One input line. `url` is `None` for blank and comment-only lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number.
    pub line_no: usize,
    pub url: Option<String>,
}

/// URL part of a line: everything before the first `#`, trimmed.
/// A `#fragment` inside a URL is therefore treated as a comment.
pub fn parse_source_line(line: &str) -> Option<&str> {
    let url = line.split('#').next().unwrap_or("").trim();
    if url.is_empty() {
        None
    } else {
        Some(url)
    }
}

pub fn parse_source_list(text: &str) -> Vec<SourceLine> {
    text.lines()
        .enumerate()
        .map(|(i, line)| SourceLine {
            line_no: i + 1,
            url: parse_source_line(line).map(str::to_string),
        })
        .collect()
}

pub fn read_source_list(path: &Path) -> Result<Vec<SourceLine>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading source list {}", path.display()))?;
    let lines = parse_source_list(&text);
    tracing::debug!(path = %path.display(), lines = lines.len(), "read source list");
    Ok(lines)
}
