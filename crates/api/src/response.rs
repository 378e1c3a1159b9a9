//! Shared response envelope types for API handlers.
//!
//! Single-entity responses (create, update) use a `{ "data": ... }`
//! envelope. Song listings and lyrics are returned bare.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: song }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
