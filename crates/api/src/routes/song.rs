//! Route definitions for songs.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::song;
use crate::state::AppState;

/// Routes mounted at `/songs`.
///
/// ```text
/// GET    /       -> list (filter + page/limit)
/// PUT    /       -> create
/// GET    /{id}   -> lyrics (page/limit in verses)
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(song::list).put(song::create))
        .route(
            "/{id}",
            get(song::lyrics).put(song::update).delete(song::delete),
        )
}
