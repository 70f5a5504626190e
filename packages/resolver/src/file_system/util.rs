use once_cell::sync::Lazy;
use regex::Regex;

static INDEX_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|/)index\.tsx?$").unwrap());
static TS_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.tsx?$").unwrap());

/// Convert Windows-style separators to POSIX separators.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Lexically resolve `.` and `..` segments and collapse repeated separators.
pub fn clean_path(path: &str) -> String {
    let normalized = normalize_separators(path);
    let is_absolute = normalized.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in normalized.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                if matches!(segments.last(), Some(last) if *last != "..") {
                    segments.pop();
                } else if !is_absolute {
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    if is_absolute {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Path from the directory `from` to `to`, both absolute.
///
/// Returns an empty string when both point at the same location.
pub fn relative_path(from: &str, to: &str) -> String {
    let from = clean_path(from);
    let to = clean_path(to);
    let from_segments: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_segments: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    let common = from_segments
        .iter()
        .zip(to_segments.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::new();
    parts.extend(std::iter::repeat("..").take(from_segments.len() - common));
    parts.extend_from_slice(&to_segments[common..]);
    parts.join("/")
}

/// Remove a trailing `/index.ts(x)` or `.ts(x)` from a relative path.
///
/// Only the first matching suffix is removed.
pub fn strip_ts_suffix(path: &str) -> String {
    for suffix in [&*INDEX_SUFFIX, &*TS_SUFFIX] {
        if let Some(m) = suffix.find(path) {
            return path[..m.start()].to_string();
        }
    }
    path.to_string()
}

/// Turn a relative path into something usable as an import specifier.
pub fn to_relative_specifier(relative: &str) -> String {
    if relative.is_empty() {
        ".".to_string()
    } else if is_relative_specifier(relative) {
        relative.to_string()
    } else {
        format!("./{}", relative)
    }
}

/// Whether `specifier` names a file relative to the importing module:
/// `.`, `..`, or a path below either. `.generated/x` is a bare specifier.
pub fn is_relative_specifier(specifier: &str) -> bool {
    matches!(specifier, "." | "..") || specifier.starts_with("./") || specifier.starts_with("../")
}

/// Whether the path names a TypeScript source this tool rewrites.
///
/// Declaration files are excluded: they describe code that lives elsewhere.
pub fn is_ts_file(path: &str) -> bool {
    (path.ends_with(".ts") || path.ends_with(".tsx")) && !path.ends_with(".d.ts")
}
