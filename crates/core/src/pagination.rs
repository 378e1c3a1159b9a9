//! Page/limit normalization shared by song listing and lyric paging.
//!
//! A pagination pair is either fully specified (both values positive) or
//! fully disabled (both zero). A half-specified pair is downgraded to
//! "disabled" and flagged so the caller can log a warning; negative or
//! non-numeric values are rejected outright.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum number of songs returned per listing page, regardless of the
/// limit the client asked for.
pub const MAX_PAGE_LIMIT: i64 = 20;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A normalized pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// No windowing: return everything.
    All,
    /// One-based `page` of `limit` items. Both are strictly positive.
    Page { page: i64, limit: i64 },
}

/// Result of [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Normalized {
    pub pagination: Pagination,
    /// `true` when exactly one of page/limit was set and the pair was
    /// downgraded to [`Pagination::All`].
    pub discarded_partial: bool,
}

/// A `LIMIT`/`OFFSET` pair ready to be bound into a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub limit: i64,
    pub offset: i64,
}

// ---------------------------------------------------------------------------
// Parsing and normalization
// ---------------------------------------------------------------------------

/// Parse a raw `page` / `limit` query value.
///
/// An absent or blank value means "not set" and parses as `0`.
pub fn parse_page_param(name: &str, raw: Option<&str>) -> Result<i64, CoreError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(0),
        Some(raw) => raw,
    };

    raw.parse::<i64>().map_err(|_| {
        CoreError::InvalidParameter(format!("{name} must be a non-negative integer, got '{raw}'"))
    })
}

/// Normalize a `(page, limit)` pair.
///
/// - either negative: `InvalidParameter`
/// - both zero: [`Pagination::All`]
/// - both positive: [`Pagination::Page`]
/// - exactly one zero: [`Pagination::All`] with `discarded_partial` set
pub fn normalize(page: i64, limit: i64) -> Result<Normalized, CoreError> {
    if page < 0 {
        return Err(CoreError::InvalidParameter(format!(
            "page must be a non-negative integer, got {page}"
        )));
    }
    if limit < 0 {
        return Err(CoreError::InvalidParameter(format!(
            "limit must be a non-negative integer, got {limit}"
        )));
    }

    let normalized = match (page, limit) {
        (0, 0) => Normalized {
            pagination: Pagination::All,
            discarded_partial: false,
        },
        (0, _) | (_, 0) => Normalized {
            pagination: Pagination::All,
            discarded_partial: true,
        },
        (page, limit) => Normalized {
            pagination: Pagination::Page { page, limit },
            discarded_partial: false,
        },
    };

    Ok(normalized)
}

impl Pagination {
    /// Compute the `LIMIT`/`OFFSET` window, clamping the limit to `max_limit`.
    ///
    /// The offset saturates, so an absurdly large page yields an empty
    /// window rather than an overflow. Returns `None` for [`Pagination::All`].
    pub fn window(self, max_limit: i64) -> Option<Window> {
        let Pagination::Page { page, limit } = self else {
            return None;
        };

        let limit = limit.min(max_limit);
        let offset = (page - 1).saturating_mul(limit);

        Some(Window { limit, offset })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
