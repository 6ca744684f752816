//! Built-in source types, in classification priority order.

use crate::source_type::SourceTypeDef;

fn def(
    key: &str,
    url_pattern: &str,
    extension: Option<&str>,
    filename_pattern: Option<&str>,
    download: &str,
    update: &str,
) -> SourceTypeDef {
    SourceTypeDef {
        key: key.to_string(),
        url_pattern: url_pattern.to_string(),
        extension: extension.map(str::to_string),
        filename_pattern: filename_pattern.map(str::to_string),
        download: download.to_string(),
        update: update.to_string(),
    }
}

/// The default table. Order is significant: the first matching entry wins.
///
/// - `git` only matches `http(s)` URLs ending in `.git`; `git://` or `ssh` URLs
///   fall through to later entries.
/// - `svn` matches any URL containing "svn", so archives hosted under an svn
///   path are caught by the earlier tarball entries but not by `zip`.
pub fn builtin_defs() -> Vec<SourceTypeDef> {
    vec![
        def(
            "git",
            r"^(http).*(\.git)$",
            Some(".git"),
            None,
            "git clone $url;",
            "cd $filename; git pull;",
        ),
        def(
            "gz",
            r"(\.tar\.gz)$",
            Some(".tar.gz"),
            None,
            "mkdir ./$filename; wget $url; tar xvzf $filename.tar.gz -C ./$filename; rm -rf $filename.tar.gz;",
            "rm $filename -rf; #download",
        ),
        def(
            "bz2",
            r"(\.tar\.bz2)$",
            Some(".tar.bz2"),
            None,
            "mkdir ./$filename; wget $url; tar xvfj $filename.tar.bz2 -C ./$filename; rm -rf $filename.tar.bz2;",
            "rm $filename -rf; #download",
        ),
        def(
            "svn",
            r"svn",
            None,
            Some(r"/(\w+)/(?:trunk|branches)"),
            "svn co $url $filename;",
            "cd $filename; svn up;",
        ),
        def(
            "sf",
            r"sf\.net",
            None,
            Some(r"/(\w+)/(?:code)"),
            "git clone $url $filename;",
            "cd $filename; git pull;",
        ),
        def(
            "zip",
            r"(\.zip)$",
            Some(".zip"),
            None,
            "mkdir $filename; wget $url; unzip $filename.zip -d ./$filename; rm -rf $filename.zip;",
            "rm $filename -rf; #download",
        ),
    ]
}
