//! Local directory name derivation for a classified URL.

use regex::Regex;

use crate::error::NameResolutionError;

/// Derives the local directory name for `url`.
///
/// 1. If `filename_pattern` matches and its capture group is non-empty, the capture wins.
/// 2. Otherwise the final segment of the URL path is used, with `extension` stripped
///    when it is a suffix of the segment, or else the last dotted extension removed.
///
/// The result is deterministic in `(filename_pattern, extension, url)`; it doubles
/// as the key of the local existence check.
pub fn resolve_name(
    filename_pattern: Option<&Regex>,
    extension: Option<&str>,
    url: &str,
) -> Result<String, NameResolutionError> {
    if let Some(name) = filename_pattern.and_then(|re| capture_name(re, url)) {
        return checked(url, name);
    }

    let path = url_path(url);
    let segment = path.rsplit('/').next().unwrap_or("");
    if segment.is_empty() {
        return Err(NameResolutionError::EmptyName {
            url: url.to_string(),
        });
    }
    let name = match extension {
        Some(ext) if segment.len() > ext.len() && segment.ends_with(ext) => {
            &segment[..segment.len() - ext.len()]
        }
        _ => strip_dotted_extension(segment),
    };
    checked(url, name)
}

fn capture_name<'u>(re: &Regex, url: &'u str) -> Option<&'u str> {
    re.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|s| !s.is_empty())
}

fn checked(url: &str, name: &str) -> Result<String, NameResolutionError> {
    if name.is_empty() {
        return Err(NameResolutionError::EmptyName {
            url: url.to_string(),
        });
    }
    if name == "." || name == ".." || name.contains('/') || name.contains('\0') {
        return Err(NameResolutionError::InvalidName {
            url: url.to_string(),
            name: name.to_string(),
        });
    }
    Ok(name.to_string())
}

/// Path component of `url`, exactly as written: no percent-encoding or dot-segment
/// normalisation, so the name matches the file a fetch tool saves. Scheme-less
/// strings (`svn.example.org/proj/trunk`) are taken as a path. Query and fragment
/// are dropped in both cases.
fn url_path(url: &str) -> &str {
    let end = url.find(|c: char| c == '?' || c == '#').unwrap_or(url.len());
    let raw = &url[..end];
    match url::Url::parse(url) {
        Ok(parsed) if parsed.has_host() => {
            let after_scheme = raw.find("://").map_or(raw, |i| &raw[i + 3..]);
            after_scheme.find('/').map_or("", |i| &after_scheme[i..])
        }
        _ => raw,
    }
}

/// Drops the last `.ext`; leading dots do not start an extension (`.bashrc` stays).
fn strip_dotted_extension(segment: &str) -> &str {
    let leading = segment.len() - segment.trim_start_matches('.').len();
    match segment[leading..].rfind('.') {
        Some(dot) => &segment[..leading + dot],
        None => segment,
    }
}
