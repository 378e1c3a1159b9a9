pub mod health;
pub mod song;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /songs                                           list, create
/// /songs/{id}                                      lyrics, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/songs", song::router())
}
