//! Shared query parameter types for API handlers.
//!
//! `page` and `limit` arrive as raw strings so malformed values produce the
//! API's own JSON error instead of the extractor's rejection text.

use serde::Deserialize;
use songlib_core::error::CoreError;
use songlib_core::filter::SongFilter;
use songlib_core::pagination::{self, Pagination};

/// Pagination parameters (`?page=&limit=`).
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageParams {
    /// Parse and normalize into a [`Pagination`].
    ///
    /// A half-specified pair is logged and treated as "no pagination".
    pub fn pagination(&self) -> Result<Pagination, CoreError> {
        resolve_pagination(self.page.as_deref(), self.limit.as_deref())
    }
}

/// Query parameters for `GET /songs`.
#[derive(Debug, Default, Deserialize)]
pub struct SongListParams {
    pub group_name: Option<String>,
    pub song_name: Option<String>,
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl SongListParams {
    /// Split into the filter and pagination the repository expects.
    pub fn into_parts(self) -> Result<(SongFilter, Pagination), CoreError> {
        let pagination = resolve_pagination(self.page.as_deref(), self.limit.as_deref())?;
        let filter = SongFilter::from_wire(
            self.group_name,
            self.song_name,
            self.release_date,
            self.text,
            self.link,
        );
        Ok((filter, pagination))
    }
}

fn resolve_pagination(page: Option<&str>, limit: Option<&str>) -> Result<Pagination, CoreError> {
    let page = pagination::parse_page_param("page", page)?;
    let limit = pagination::parse_page_param("limit", limit)?;
    let normalized = pagination::normalize(page, limit)?;

    if normalized.discarded_partial {
        tracing::warn!(
            page,
            limit,
            "Ignoring pagination: page and limit must be given together"
        );
    }

    Ok(normalized.pagination)
}
