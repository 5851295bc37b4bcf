//! Source-range edits.

use std::ops::Range;

use masonry_types::{BoardError, Result};

/// Replace `range` of the source with `replacement`. An empty range is an
/// insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range<usize>,
    pub replacement: String,
}

impl Edit {
    pub fn replace(range: Range<usize>, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }

    pub fn insert(at: usize, text: impl Into<String>) -> Self {
        Self::replace(at..at, text)
    }
}

/// Apply non-overlapping edits to `source`.
pub fn apply_edits(source: &str, mut edits: Vec<Edit>) -> Result<String> {
    edits.sort_by_key(|e| (e.range.start, e.range.end));
    for pair in edits.windows(2) {
        if pair[0].range.end > pair[1].range.start {
            return Err(BoardError::Html(format!(
                "overlapping edits at {:?} and {:?}",
                pair[0].range, pair[1].range
            )));
        }
    }
    if let Some(bad) = edits.iter().find(|e| {
        e.range.start > e.range.end
            || !source.is_char_boundary(e.range.start)
            || !source.is_char_boundary(e.range.end)
    }) {
        return Err(BoardError::Html(format!(
            "edit {:?} outside document",
            bad.range
        )));
    }

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;
    for edit in &edits {
        out.push_str(&source[cursor..edit.range.start]);
        out.push_str(&edit.replacement);
        cursor = edit.range.end;
    }
    out.push_str(&source[cursor..]);
    Ok(out)
}
