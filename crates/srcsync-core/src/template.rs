//! Command template expansion.
//!
//! Expansion is two explicit phases: the `#download` directive in an update
//! template is replaced by the raw download template, then `$url` and
//! `$filename` are substituted in one scan over the combined string. Doing the
//! directive first is what lets the inlined download text get its placeholders
//! filled.
//!
//! Nothing is quoted or escaped; URLs and names reach the shell verbatim. The
//! source list is operator-controlled input.

use crate::source_type::CommandMode;

/// Update-template directive meaning "the download command goes here".
pub const DOWNLOAD_DIRECTIVE: &str = "#download";
pub const URL_PLACEHOLDER: &str = "$url";
pub const FILENAME_PLACEHOLDER: &str = "$filename";

/// Phase one: replace every `#download` in `update` with `download`.
/// `download` itself never carries the directive (checked when the registry is built),
/// so one pass is complete.
pub fn inline_download_directive(update: &str, download: &str) -> String {
    update.replace(DOWNLOAD_DIRECTIVE, download)
}

/// Phase two: single left-to-right substitution of `$url` and `$filename`.
/// Substituted text is not rescanned.
pub fn substitute_placeholders(template: &str, url: &str, name: &str) -> String {
    let mut out = String::with_capacity(template.len() + url.len() + name.len());
    let mut rest = template;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix(URL_PLACEHOLDER) {
            out.push_str(url);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(FILENAME_PLACEHOLDER) {
            out.push_str(name);
            rest = after;
        } else {
            out.push('$');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Selects the template for `mode` and runs both phases.
pub fn expand(download: &str, update: &str, url: &str, name: &str, mode: CommandMode) -> String {
    match mode {
        CommandMode::Download => substitute_placeholders(download, url, name),
        CommandMode::Update => {
            substitute_placeholders(&inline_download_directive(update, download), url, name)
        }
    }
}
