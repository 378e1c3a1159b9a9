//! Repository for the `songs` table.
//!
//! Listing goes through [`build_list_query`], which turns a sparse
//! [`SongFilter`] and a [`Pagination`] into SQL text with numbered
//! placeholders plus the ordered values to bind. Filter values only ever
//! travel as bind parameters.

use songlib_core::filter::SongFilter;
use songlib_core::pagination::{Pagination, MAX_PAGE_LIMIT};
use songlib_core::types::DbId;
use sqlx::PgPool;

use crate::models::song::{CreateSong, Song, UpdateSong};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, group_name, song_name, release_date, text, link";

// ---------------------------------------------------------------------------
// Query building
// ---------------------------------------------------------------------------

/// A value bound to a numbered placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindValue<'a> {
    Text(&'a str),
    BigInt(i64),
}

/// SQL text and its bind values, in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongListQuery<'a> {
    pub sql: String,
    pub binds: Vec<BindValue<'a>>,
}

/// Build the "list songs" query.
///
/// One `column = $n` predicate is emitted per constrained field, in
/// [`SongFilter::fields`] order, numbered from `$1` without gaps. Rows are
/// ordered by id. A paged request appends `LIMIT`/`OFFSET` placeholders
/// after the predicates, with the limit clamped to [`MAX_PAGE_LIMIT`].
pub fn build_list_query(filter: &SongFilter, pagination: Pagination) -> SongListQuery<'_> {
    let mut conditions: Vec<String> = Vec::new();
    let mut binds: Vec<BindValue<'_>> = Vec::new();
    let mut bind_idx = 1u32;

    for (field, value) in filter.fields() {
        if let Some(value) = value {
            conditions.push(format!("{} = ${bind_idx}", field.column()));
            bind_idx += 1;
            binds.push(BindValue::Text(value));
        }
    }

    let mut sql = format!("SELECT {COLUMNS} FROM songs");
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY id");

    if let Some(window) = pagination.window(MAX_PAGE_LIMIT) {
        sql.push_str(&format!(" LIMIT ${bind_idx} OFFSET ${}", bind_idx + 1));
        binds.push(BindValue::BigInt(window.limit));
        binds.push(BindValue::BigInt(window.offset));
    }

    SongListQuery { sql, binds }
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    binds: &[BindValue<'q>],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in binds {
        match *val {
            BindValue::Text(v) => q = q.bind(v),
            BindValue::BigInt(v) => q = q.bind(v),
        }
    }
    q
}

// ---------------------------------------------------------------------------
// SongRepo
// ---------------------------------------------------------------------------

/// Provides CRUD and filtered listing for songs.
pub struct SongRepo;

impl SongRepo {
    /// Insert a new song, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSong) -> Result<Song, sqlx::Error> {
        let query = format!(
            "INSERT INTO songs (group_name, song_name, release_date, text, link) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Song>(&query)
            .bind(&input.group_name)
            .bind(&input.song_name)
            .bind(&input.release_date)
            .bind(&input.text)
            .bind(&input.link)
            .fetch_one(pool)
            .await
    }

    /// Find a song by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Song>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM songs WHERE id = $1");
        sqlx::query_as::<_, Song>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch only the lyric text of a song.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn find_text(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT text FROM songs WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List songs matching `filter`, ordered by id, optionally paged.
    ///
    /// An empty result is not an error.
    pub async fn list(
        pool: &PgPool,
        filter: &SongFilter,
        pagination: Pagination,
    ) -> Result<Vec<Song>, sqlx::Error> {
        let query = build_list_query(filter, pagination);
        tracing::debug!(
            sql = %query.sql,
            bind_count = query.binds.len(),
            filtered = !filter.is_empty(),
            "Listing songs",
        );

        bind_values(sqlx::query_as::<_, Song>(&query.sql), &query.binds)
            .fetch_all(pool)
            .await
    }

    /// Replace every field of a song. The id is preserved.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSong,
    ) -> Result<Option<Song>, sqlx::Error> {
        let query = format!(
            "UPDATE songs SET \
                group_name = $2, \
                song_name = $3, \
                release_date = $4, \
                text = $5, \
                link = $6 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Song>(&query)
            .bind(id)
            .bind(&input.group_name)
            .bind(&input.song_name)
            .bind(&input.release_date)
            .bind(&input.text)
            .bind(&input.link)
            .fetch_optional(pool)
            .await
    }

    /// Delete a song. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM songs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
