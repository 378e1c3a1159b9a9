use std::sync::Arc;

use songlib_metadata::MetadataProvider;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: songlib_db::DbPool,
    /// Metadata lookup used when songs are added.
    pub metadata: Arc<dyn MetadataProvider>,
}
