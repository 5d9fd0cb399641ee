//! Helpers for CIDs embedded in URL paths
//!
//! These are best-effort: "not a CID" is an ordinary outcome when scanning
//! routes and links, so they return empty strings or `None` instead of errors.

use cidkit_core::mime_type_for_extension;

use crate::validate::is_strict_cid_candidate;

/// A CID and optional extension split out of a URL path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CidPath {
    /// Bare CID string (not yet validated beyond its shape)
    pub cid: String,
    /// Extension without the leading dot, e.g. `txt`
    pub extension: Option<String>,
}

impl CidPath {
    /// MIME type hinted by the extension, if it is a known one.
    pub fn mime_type(&self) -> Option<&'static str> {
        self.extension.as_deref().and_then(mime_type_for_extension)
    }
}

/// Reduce `s` to a single bare path component.
///
/// Trims whitespace and one leading `/`. Returns an empty string for blank
/// input and for anything still containing a `/` (a multi-segment path).
pub fn normalize_component(s: &str) -> String {
    let trimmed = s.trim();
    let component = trimmed.strip_prefix('/').unwrap_or(trimmed);
    if component.is_empty() || component.contains('/') {
        return String::new();
    }
    component.to_string()
}

/// Split `/<cid>[.ext][?query][#fragment]` into CID and extension.
///
/// Query and fragment are discarded. Returns `None` for empty input,
/// multi-segment paths, and anything whose CID part is not CID-shaped.
pub fn split_cid_path(path: &str) -> Option<CidPath> {
    let path = path.trim();
    let path = path.split('#').next().unwrap_or_default();
    let path = path.split('?').next().unwrap_or_default();

    let component = normalize_component(path);
    if component.is_empty() {
        return None;
    }

    let (cid, extension) = match component.split_once('.') {
        Some((cid, ext)) => (cid, Some(ext).filter(|e| !e.is_empty())),
        None => (component.as_str(), None),
    };
    if !is_strict_cid_candidate(cid) {
        return None;
    }

    Some(CidPath {
        cid: cid.to_string(),
        extension: extension.map(str::to_string),
    })
}
