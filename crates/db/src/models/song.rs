//! Song entity model and DTOs.

use serde::{Deserialize, Serialize};
use songlib_core::types::DbId;
use sqlx::FromRow;

/// A row from the `songs` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Song {
    pub id: DbId,
    pub group_name: String,
    pub song_name: String,
    /// Release date as supplied by the metadata provider (`DD.MM.YYYY`).
    pub release_date: String,
    /// Lyrics, verses separated by a blank line.
    pub text: String,
    pub link: String,
}

/// DTO for inserting a new song.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSong {
    pub group_name: String,
    pub song_name: String,
    pub release_date: String,
    pub text: String,
    pub link: String,
}

/// DTO for replacing every field of an existing song. The id is immutable.
///
/// Missing fields deserialize as empty strings, so a partial body clears
/// the omitted columns.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateSong {
    pub group_name: String,
    pub song_name: String,
    pub release_date: String,
    pub text: String,
    pub link: String,
}
