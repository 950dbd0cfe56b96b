use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use percent_encoding::percent_decode;
use pubsub_core::Backend;

use crate::pipeline;

/// Builds the single HTTP resource both process roles (single-node
/// backend, clustered frontend) serve behind — one fallback handler that
/// parses `(method, path)` itself, the way the original Twisted
/// `PubSubResource` (`isLeaf = True`) routes every request through one
/// `render_*` method rather than through per-route extractors.
pub fn build_router(backend: Arc<dyn Backend>) -> Router {
    Router::new()
        .fallback(handle)
        .with_state(backend)
}

async fn handle(
    State(backend): State<Arc<dyn Backend>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> impl IntoResponse {
    let path_parts = split_path(&uri);

    match pipeline::route(&method, &path_parts, body.to_vec()) {
        Some(action) => {
            let (status, body) = pipeline::dispatch(backend.as_ref(), action).await;
            (status, body)
        }
        None => (StatusCode::NOT_FOUND, Bytes::new()),
    }
}

/// Splits `uri.path()` on `/`, drops the leading empty segment, and
/// percent-decodes each remaining segment back to raw bytes — path
/// components are opaque bytes after URL decoding (spec.md §6), not
/// necessarily valid UTF-8.
fn split_path(uri: &Uri) -> Vec<Vec<u8>> {
    uri.path()
        .split('/')
        .skip(1)
        .map(|segment| percent_decode(segment.as_bytes()).collect::<Vec<u8>>())
        .collect()
}
