//! Storage path resolution for secret keys.
//!
//! A caller-supplied key is opaque: it may contain `/`, `.`, `#` or any other
//! character. Before it touches the backend it is percent-escaped, reduced to
//! a single path segment and joined under the configured prefix, so the
//! resulting path can never leave the prefix.
//!
//! Escaping follows the path segment rules of RFC 3986: `/`, `;`, `,`, `?`,
//! `%`, `#`, spaces, controls and non-ASCII bytes are escaped, while the
//! sub-delimiters `$ & + : = @` stay literal. DIDs such as
//! `did:nuts:abc#key-1` therefore keep their colons and become
//! `did:nuts:abc%23key-1`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const KEY_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Resolve the backend storage path for `key` under `prefix`.
///
/// Keys made only of traversal sequences (`""`, `.`, `..`, `../..`, `/./`)
/// resolve to the prefix itself rather than to a path outside of it.
pub fn storage_path(prefix: &str, key: &str) -> String {
    if is_traversal_only(key) {
        return normalize(prefix);
    }
    let escaped = escape(key);
    match final_segment(&escaped) {
        "" | "." | ".." => normalize(prefix),
        segment => normalize(&format!("{}/{}", prefix, segment)),
    }
}

/// Path used to enumerate the keys stored under `prefix`.
pub fn list_path(prefix: &str) -> String {
    normalize(prefix)
}

/// Lexically clean a `/`-separated path.
///
/// Repeated separators collapse, `.` segments are dropped and `..` removes
/// the preceding segment. A rooted path never climbs above `/`. An empty
/// result becomes `.`.
pub fn normalize(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ if rooted => {}
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Percent-escape `key` as a single path segment.
pub fn escape(key: &str) -> String {
    utf8_percent_encode(key, KEY_SEGMENT).to_string()
}

fn is_traversal_only(key: &str) -> bool {
    key.split('/').all(|segment| matches!(segment, "" | "." | ".."))
}

// Last segment after trailing separators are stripped.
fn final_segment(path: &str) -> &str {
    path.trim_end_matches('/').rsplit('/').next().unwrap_or("")
}
