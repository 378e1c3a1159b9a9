//! Handlers for the `/songs` resource.
//!
//! Listing and lyric paging are read-only. Adding a song looks up its
//! release date, lyrics, and link from the metadata provider before the
//! row is inserted.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use songlib_core::error::CoreError;
use songlib_core::lyrics::paginate_lyrics;
use songlib_core::types::DbId;
use songlib_db::models::song::{CreateSong, UpdateSong};
use songlib_db::repositories::SongRepo;

use crate::error::{AppError, AppResult};
use crate::query::{PageParams, SongListParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Plain-text body returned when a listing matches nothing.
pub const NO_SONGS_FOUND: &str = "No songs found";

/// Request body for adding a song.
#[derive(Debug, Clone, Deserialize)]
pub struct AddSongRequest {
    #[serde(alias = "group_name")]
    pub group: String,
    #[serde(alias = "song_name")]
    pub song: String,
}

fn song_not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: "Song", id }
}

fn invalid_body(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection.body_text(), "Rejected request body");
    AppError::BadRequest("Invalid request body".to_string())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /songs?group_name=&song_name=&release_date=&text=&link=&page=&limit=
///
/// List songs matching every given field exactly, ordered by id.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SongListParams>,
) -> AppResult<Response> {
    let (filter, pagination) = params.into_parts()?;

    let songs = SongRepo::list(&state.pool, &filter, pagination).await?;
    tracing::debug!(count = songs.len(), ?pagination, "Listed songs");

    if songs.is_empty() {
        return Ok((StatusCode::OK, NO_SONGS_FOUND).into_response());
    }
    Ok(Json(songs).into_response())
}

/// GET /songs/{id}?page=&limit=
///
/// Return a page of verses from a song's lyrics as plain text, or the whole
/// text when no pagination is requested.
pub async fn lyrics(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<PageParams>,
) -> AppResult<String> {
    let pagination = params.pagination()?;

    let text = SongRepo::find_text(&state.pool, id)
        .await?
        .ok_or_else(|| song_not_found(id))?;

    Ok(paginate_lyrics(&text, pagination)?)
}

/// PUT /songs
///
/// Add a song. Release date, lyrics, and link come from the metadata
/// provider.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<AddSongRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload.map_err(invalid_body)?;
    let group = input.group.trim();
    let song = input.song.trim();
    if group.is_empty() || song.is_empty() {
        return Err(CoreError::Validation("group and song must not be empty".into()).into());
    }

    let metadata = state.metadata.fetch_metadata(group, song).await?;

    let created = SongRepo::create(
        &state.pool,
        &CreateSong {
            group_name: group.to_string(),
            song_name: song.to_string(),
            release_date: metadata.release_date,
            text: metadata.text,
            link: metadata.link,
        },
    )
    .await?;

    tracing::info!(
        song_id = created.id,
        group = %created.group_name,
        song = %created.song_name,
        "Song added",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// PUT /songs/{id}
///
/// Replace every field of a song. Omitted fields are cleared.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<UpdateSong>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload.map_err(invalid_body)?;
    let song = SongRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| song_not_found(id))?;

    tracing::info!(song_id = id, "Song updated");

    Ok(Json(DataResponse { data: song }))
}

/// DELETE /songs/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if !SongRepo::delete(&state.pool, id).await? {
        return Err(song_not_found(id).into());
    }

    tracing::info!(song_id = id, "Song deleted");

    Ok(StatusCode::NO_CONTENT)
}
