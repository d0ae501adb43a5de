//! Path normalization for archive member names and shell arguments.
//!
//! Every path the shell works with internally is relative to the archive
//! root, uses `/` separators and has no leading slash. The root itself is
//! the empty string.

/// Normalize an archive member name into a table key.
///
/// Strips every leading separator; the rest of the name is kept verbatim so
/// directory members keep their trailing `/`.
///
/// # Examples
/// ```
/// use arcsh_core::normalize_member;
/// assert_eq!(normalize_member("/docs/a.txt"), "docs/a.txt");
/// assert_eq!(normalize_member("docs/"), "docs/");
/// ```
pub fn normalize_member(name: &str) -> String {
    name.trim_start_matches('/').to_string()
}

/// Resolve `path` against the directory `current`.
///
/// `current` is a normalized directory path (`""` for root). An absolute
/// `path` starts again from root. `.` segments are dropped and `..` pops one
/// segment, never climbing above root. The result carries no leading or
/// trailing separator.
///
/// # Examples
/// ```
/// use arcsh_core::resolve;
/// assert_eq!(resolve("", "docs"), "docs");
/// assert_eq!(resolve("docs", "a.txt"), "docs/a.txt");
/// assert_eq!(resolve("docs/sub", "../b"), "docs/b");
/// assert_eq!(resolve("docs", "/bin"), "bin");
/// assert_eq!(resolve("", ".."), "");
/// ```
pub fn resolve(current: &str, path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    if !path.starts_with('/') {
        segments.extend(current.split('/').filter(|s| !s.is_empty()));
    }

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments.join("/")
}

/// Directory form of a normalized path: the path plus a trailing `/`.
///
/// Root stays empty so that every key in the table is "under" it.
pub fn dir_form(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{}/", trimmed)
    }
}

/// Parent of a normalized directory path; root is its own parent.
pub fn parent(path: &str) -> &str {
    match path.trim_end_matches('/').rsplit_once('/') {
        Some((head, _)) => head,
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_member() {
        assert_eq!(normalize_member("//etc/passwd"), "etc/passwd");
        assert_eq!(normalize_member("bin/tool"), "bin/tool");
    }

    #[test]
    fn test_resolve_relative() {
        assert_eq!(resolve("", "docs/"), "docs");
        assert_eq!(resolve("docs", "./sub/"), "docs/sub");
        assert_eq!(resolve("docs/sub", ".."), "docs");
    }

    #[test]
    fn test_resolve_stays_below_root() {
        assert_eq!(resolve("docs", "../../.."), "");
        assert_eq!(resolve("docs", "../../bin"), "bin");
    }

    #[test]
    fn test_resolve_absolute() {
        assert_eq!(resolve("docs/sub", "/"), "");
        assert_eq!(resolve("docs/sub", "/bin/tool"), "bin/tool");
    }

    #[test]
    fn test_dir_form() {
        assert_eq!(dir_form(""), "");
        assert_eq!(dir_form("docs"), "docs/");
        assert_eq!(dir_form("docs/"), "docs/");
    }

    #[test]
    fn test_parent() {
        assert_eq!(parent("docs/sub"), "docs");
        assert_eq!(parent("docs"), "");
        assert_eq!(parent(""), "");
    }
}
