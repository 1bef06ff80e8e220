//! Fixed-size text chunking
//!
//! Splits file content into contiguous, non-overlapping segments by
//! character count. No trimming, no encoding transformation: concatenating
//! the segments in index order reproduces the input exactly.

use crate::models::Segment;

/// Split `text` into segments of `size` characters.
///
/// Produces `ceil(chars / size)` segments; all but the last are exactly
/// `size` characters. Splits never land inside a UTF-8 code point. The
/// empty string yields no segments.
///
/// # Panics
/// Panics if `size` is zero.
pub fn chunk(text: &str, size: usize, source_path: &str) -> Vec<Segment> {
    assert!(size > 0, "chunk size must be greater than zero");

    if text.is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut rest = text;
    let mut index = 0;

    while !rest.is_empty() {
        let split_at = rest
            .char_indices()
            .nth(size)
            .map(|(byte_offset, _)| byte_offset)
            .unwrap_or(rest.len());
        let (piece, tail) = rest.split_at(split_at);

        segments.push(Segment {
            index,
            text: piece.to_string(),
            source_path: source_path.to_string(),
        });

        rest = tail;
        index += 1;
    }

    segments
}
