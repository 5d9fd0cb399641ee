//! Locate CID references in free text (rendered documents, link rewriting)

use std::ops::Range;

use crate::path::split_cid_path;
use crate::validate::{is_normalized_cid, is_probable_cid_component};

/// A CID reference found in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CidReference {
    /// Byte range of the whole token, including any leading `/` and extension
    pub range: Range<usize>,
    /// Bare CID
    pub cid: String,
    /// Extension without the dot
    pub extension: Option<String>,
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/')
}

/// Split `text` into maximal runs of characters that may form a CID path.
fn tokens(text: &str) -> Vec<(Range<usize>, &str)> {
    let mut start = None;
    let mut out = Vec::new();
    for (i, c) in text.char_indices() {
        match (is_token_char(c), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                out.push((s..i, &text[s..i]));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push((s..text.len(), &text[s..]));
    }
    out
}

fn scan(text: &str, verify: bool) -> Vec<CidReference> {
    tokens(text)
        .into_iter()
        .filter_map(|(range, token)| {
            let bare = token.strip_prefix('/').unwrap_or(token);
            // Sentence punctuation right after a reference is not an extension.
            let bare = bare.trim_end_matches('.');
            if !is_probable_cid_component(bare) {
                return None;
            }
            let split = split_cid_path(bare)?;
            if verify && !is_normalized_cid(&split.cid) {
                return None;
            }
            let end = range.start + token.trim_end_matches('.').len();
            Some(CidReference {
                range: range.start..end,
                cid: split.cid,
                extension: split.extension,
            })
        })
        .collect()
}

/// Find references that are fully valid, normalized CIDs.
pub fn find_cid_references(text: &str) -> Vec<CidReference> {
    scan(text, true)
}

/// Find CID-shaped tokens without decoding them. May include false positives.
pub fn find_cid_candidates(text: &str) -> Vec<CidReference> {
    scan(text, false)
}
