//! Verse-level paging over stored lyric text.
//!
//! Lyrics are stored as plain text with verses separated by a blank line.
//! A verse that itself contains a blank line cannot be told apart from two
//! verses; stored text must keep that convention.

use crate::error::CoreError;
use crate::pagination::Pagination;

/// Separator between verses in stored lyric text.
pub const VERSE_SEPARATOR: &str = "\n\n";

/// Split lyric text into verses. Text without a separator is one verse.
pub fn split_verses(text: &str) -> Vec<&str> {
    text.split(VERSE_SEPARATOR).collect()
}

/// Return the requested page of verses, rejoined with [`VERSE_SEPARATOR`].
///
/// [`Pagination::All`] returns `full_text` unchanged. A page starting past
/// the last verse fails with [`CoreError::OutOfRange`]; a page that only
/// partially overlaps the verses is truncated.
pub fn paginate_lyrics(full_text: &str, pagination: Pagination) -> Result<String, CoreError> {
    let Pagination::Page { page, limit } = pagination else {
        return Ok(full_text.to_string());
    };

    let verses = split_verses(full_text);
    let out_of_range = || CoreError::OutOfRange {
        page,
        limit,
        verses: verses.len(),
    };

    let start = (page - 1)
        .checked_mul(limit)
        .and_then(|s| usize::try_from(s).ok())
        .ok_or_else(out_of_range)?;

    if start >= verses.len() {
        return Err(out_of_range());
    }

    let end = usize::try_from(limit)
        .ok()
        .and_then(|l| start.checked_add(l))
        .map_or(verses.len(), |e| e.min(verses.len()));

    Ok(verses[start..end].join(VERSE_SEPARATOR))
}
