//! Directory-level path algebra used by import loading and link rewriting.
//!
//! These are pure functions over `/`-delimited path strings. They never touch
//! the filesystem, and they treat segments the same way regardless of the
//! host's path-separator conventions.

/// Goes up a single level in a path by dropping the last segment
/// (the file name, or the trailing empty segment if the path already ends
/// in `/`). The result always ends with a `/`.
///
/// e.g. `/some/dir` => `/some/`, `some/file.ext` => `some/`
pub fn parent_dir(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').collect();
    let drop = if path.ends_with('/') { 2 } else { 1 };
    let kept = &parts[..parts.len().saturating_sub(drop)];
    let mut out = kept.join("/");
    out.push('/');
    out
}

/// Resolves `.` and `..` segments into a minimal path string.
///
/// e.g. `some/path/that/../goes/../here` => `some/path/here`
///
/// A `..` with nothing left to pop accumulates at the front of the result.
pub fn normalize(path: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut unresolved = 0usize;
    for part in path.split('/') {
        match part {
            ".." => {
                if kept.is_empty() {
                    unresolved += 1;
                } else {
                    kept.pop();
                }
            }
            "." | "" => {}
            _ => kept.push(part),
        }
    }

    let root = if path.starts_with('/') { "/" } else { "" };
    format!("{}{}{}", root, "../".repeat(unresolved), kept.join("/"))
}

/// Computes the relative path that leads from the directory `from` to `to`.
///
/// Both inputs are normalized first. Equal paths yield an empty string;
/// otherwise one `..` is emitted per `from` segment past the common prefix,
/// followed by the remaining `to` segments.
pub fn relative_from(from: &str, to: &str) -> String {
    let from = normalize(from);
    let to = normalize(to);

    // Already there.
    if from == to {
        return String::new();
    }

    let mut from_parts: Vec<&str> = from.split('/').collect();
    let to_parts: Vec<&str> = to.split('/').collect();
    let mut out: Vec<&str> = Vec::new();

    // Step 1: climb to the common parent directory
    while !from_parts
        .iter()
        .enumerate()
        .all(|(i, p)| to_parts.get(i) == Some(p))
    {
        from_parts.pop();
        out.push("..");
    }

    // Step 2: descend from there to the target
    out.extend(&to_parts[from_parts.len()..]);

    out.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_dir_drops_file_name() {
        assert_eq!(parent_dir("/some/file.ext"), "/some/");
        assert_eq!(parent_dir("some/deep/file.ext"), "some/deep/");
    }

    #[test]
    fn parent_dir_handles_trailing_slash() {
        assert_eq!(parent_dir("/some/dir/"), "/some/");
        assert_eq!(parent_dir("a/b/"), "a/");
    }

    #[test]
    fn normalize_resolves_dots() {
        assert_eq!(normalize("some/path/that/../goes/../here"), "some/path/here");
        assert_eq!(normalize("a/./b/./c"), "a/b/c");
        assert_eq!(normalize("/abs//x/../y"), "/abs/y");
    }

    #[test]
    fn normalize_accumulates_unresolvable_parents() {
        assert_eq!(normalize("../../a/b"), "../../a/b");
        assert_eq!(normalize("a/../../b"), "../b");
    }

    #[test]
    fn relative_from_basic() {
        assert_eq!(relative_from("a/b", "a/b"), "");
        assert_eq!(relative_from("a/b", "a/b/c"), "c");
        assert_eq!(relative_from("a/b/c", "a/d"), "../../d");
        assert_eq!(relative_from("pages/blog", "assets/img"), "../../assets/img");
    }

    #[test]
    fn relative_round_trips_onto_target() {
        // Re-applying the relative path onto `from` lands on `to`.
        for (from, to) in [
            ("a/b", "a/c/d"),
            ("site/pages", "site/assets"),
            ("x", "x/y/z"),
            ("deep/one/two", "deep"),
        ] {
            let rel = relative_from(from, to);
            let reapplied = normalize(&format!("{from}/{rel}"));
            assert_eq!(reapplied, normalize(to), "from={from} to={to}");
        }
    }
}
