use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use songlib_api::config::{LogFormat, ServerConfig};
use songlib_api::router::build_app_router;
use songlib_api::state::AppState;
use songlib_metadata::{MetadataError, MetadataProvider, SongMetadata};

/// Lyrics the stub provider returns for every song.
pub const STUB_TEXT: &str = "verse1\n\nverse2\n\nverse3";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        db_acquire_timeout_secs: 1,
        metadata_api_url: "http://metadata.invalid".to_string(),
        metadata_timeout_secs: 1,
        log_format: LogFormat::Pretty,
    }
}

/// Metadata provider double. Group `unavailable` simulates a provider
/// failure; every other lookup succeeds with fixed data.
pub struct StubMetadata;

#[async_trait]
impl MetadataProvider for StubMetadata {
    async fn fetch_metadata(
        &self,
        group: &str,
        song: &str,
    ) -> Result<SongMetadata, MetadataError> {
        if group == "unavailable" {
            return Err(MetadataError::ApiError {
                status: 503,
                body: "down".to_string(),
            });
        }
        Ok(SongMetadata {
            release_date: "16.07.2006".to_string(),
            text: STUB_TEXT.to_string(),
            link: format!("https://example.com/{group}/{song}"),
        })
    }
}

/// A lazily connected pool pointing at a port nothing listens on.
///
/// Every query fails once the acquire timeout from [`test_config`] elapses,
/// well before the request timeout.
pub fn unreachable_pool() -> PgPool {
    let config = test_config();
    songlib_db::pool_options(Duration::from_secs(config.db_acquire_timeout_secs))
        .connect_lazy("postgres://songlib@127.0.0.1:1/songlib")
        .unwrap()
}

/// Build the full application router, using the given database pool and
/// the stub metadata provider.
///
/// Uses the same `build_app_router` as `main.rs` so integration tests
/// exercise the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let state = AppState {
        pool,
        metadata: Arc::new(StubMetadata),
    };
    build_app_router(state, &test_config())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
