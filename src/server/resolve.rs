//! Maps request targets onto paths below the documentation root.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::{Path, PathBuf};

/// Characters escaped when a single path segment is written back into a URL.
pub const SEGMENT_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A request target reduced to a location under the served root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub path: PathBuf,
    /// Decoded URL path as requested, used for listing titles.
    pub url_path: String,
    /// The segments kept for `path`, re-encoded. Starts with exactly one `/`.
    pub canonical: String,
    /// Raw query string including the leading `?`, if any.
    pub query: String,
    pub trailing_slash: bool,
}

impl Resolved {
    /// Where a directory requested without a trailing slash is redirected.
    pub fn directory_location(&self) -> String {
        let mut location = self.canonical.clone();
        if !location.ends_with('/') {
            location.push('/');
        }
        location.push_str(&self.query);
        location
    }
}

/// The target did not decode to valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTarget;

/// Resolves `target` below `root`.
///
/// Empty, `.` and `..` segments are dropped, as is anything that could name a
/// path outside the root on some platform (backslashes, drive prefixes), so the
/// result always lies inside `root`.
pub fn resolve(root: &Path, target: &str) -> Result<Resolved, InvalidTarget> {
    let without_fragment = target.split('#').next().unwrap_or_default();
    let (raw_path, query) = match without_fragment.find('?') {
        Some(at) => without_fragment.split_at(at),
        None => (without_fragment, ""),
    };

    let decoded = percent_decode_str(raw_path)
        .decode_utf8()
        .map_err(|_| InvalidTarget)?;
    if decoded.contains('\0') {
        return Err(InvalidTarget);
    }

    let trailing_slash = decoded.ends_with('/');
    let mut path = root.to_path_buf();
    let mut canonical = String::new();
    for segment in decoded.split('/') {
        if segment.is_empty()
            || segment == "."
            || segment == ".."
            || segment.contains('\\')
            || segment.contains(':')
        {
            continue;
        }
        path.push(segment);
        canonical.push('/');
        canonical.extend(utf8_percent_encode(segment, SEGMENT_ESCAPES));
    }
    if canonical.is_empty() {
        canonical.push('/');
    }

    let url_path = if decoded.starts_with('/') {
        decoded.into_owned()
    } else {
        format!("/{decoded}")
    };

    Ok(Resolved {
        path,
        url_path,
        canonical,
        query: query.to_string(),
        trailing_slash,
    })
}
