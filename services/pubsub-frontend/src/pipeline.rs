use std::time::Instant;

use bytes::Bytes;
use http::{Method, StatusCode};
use pubsub_core::Backend;

/// One routed call, already carrying everything the backend needs.
///
/// Constructed purely from `(method, path_parts)` — never from the method
/// alone — per spec.md §4.6's routing table.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    PostMessage { topic: Vec<u8>, body: Vec<u8> },
    Subscribe { topic: Vec<u8>, user: Vec<u8> },
    GetMessage { topic: Vec<u8>, user: Vec<u8> },
    Unsubscribe { topic: Vec<u8>, user: Vec<u8> },
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::PostMessage { .. } => "PostMessage",
            Action::Subscribe { .. } => "Subscribe",
            Action::GetMessage { .. } => "GetMessage",
            Action::Unsubscribe { .. } => "Unsubscribe",
        }
    }

    /// The operation's argument tuple, formatted the way the access log
    /// wants them: lossily-decoded text, since topic/user/body are opaque
    /// bytes that are usually but not necessarily valid UTF-8.
    fn args_display(&self) -> (String, String) {
        match self {
            Action::PostMessage { topic, body } => {
                (lossy(topic), lossy(body))
            }
            Action::Subscribe { topic, user }
            | Action::GetMessage { topic, user }
            | Action::Unsubscribe { topic, user } => (lossy(topic), lossy(user)),
        }
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Parses `path_parts` — the URL path split on `/`, excluding the leading
/// empty segment — and the HTTP method into a routed [`Action`]. Returns
/// `None` for any method/shape combination outside spec.md §4.6's routing
/// table, which the caller turns into a bare `404` with no backend call
/// and no log entry.
pub fn route(method: &Method, path_parts: &[Vec<u8>], body: Vec<u8>) -> Option<Action> {
    match (method, path_parts) {
        (&Method::POST, [topic]) => Some(Action::PostMessage {
            topic: topic.clone(),
            body,
        }),
        (&Method::POST, [topic, user]) => Some(Action::Subscribe {
            topic: topic.clone(),
            user: user.clone(),
        }),
        (&Method::GET, [topic, user]) => Some(Action::GetMessage {
            topic: topic.clone(),
            user: user.clone(),
        }),
        (&Method::DELETE, [topic, user]) => Some(Action::Unsubscribe {
            topic: topic.clone(),
            user: user.clone(),
        }),
        _ => None,
    }
}

/// Invokes `action` against `backend`, adapting whatever it returns (an
/// already-resolved value for `MemoryBackend`, a genuinely later-resolving
/// one for `ProxyBackend`/`HashBackend`-over-`ProxyBackend`) into the HTTP
/// response, and emits the access log line spec.md §4.6/§6 requires.
///
/// On backend failure, writes `500` with an empty body and emits both an
/// info line (status `500`, normal context) and an error line (the
/// failure detail) — this is the only place a `BackendError` is allowed
/// to turn into an HTTP status.
pub async fn dispatch(backend: &dyn Backend, action: Action) -> (StatusCode, Bytes) {
    let start = Instant::now();
    let name = action.name();
    let (arg0, arg1) = action.args_display();

    let outcome = match &action {
        Action::Subscribe { topic, user } => backend.subscribe(topic, user).await.map(|status| (status, None)),
        Action::Unsubscribe { topic, user } => {
            backend.unsubscribe(topic, user).await.map(|status| (status, None))
        }
        Action::PostMessage { topic, body } => {
            backend.post_message(topic, body).await.map(|status| (status, None))
        }
        Action::GetMessage { topic, user } => backend.get_message(topic, user).await,
    };

    let elapsed_ms = start.elapsed().as_millis();

    match outcome {
        Ok((status, body)) => {
            let body = body.unwrap_or_default();
            match &action {
                Action::GetMessage { .. } => {
                    tracing::info!(
                        "{} {}ms {} ({}, {}) {}",
                        status,
                        elapsed_ms,
                        name,
                        arg0,
                        arg1,
                        String::from_utf8_lossy(&body)
                    );
                }
                _ => {
                    tracing::info!("{} {}ms {} ({}, {})", status, elapsed_ms, name, arg0, arg1);
                }
            }
            (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                Bytes::from(body),
            )
        }
        Err(err) => {
            tracing::error!("{}", err);
            tracing::info!(
                "{} {}ms {} ({}, {})",
                StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                elapsed_ms,
                name,
                arg0,
                arg1
            );
            (StatusCode::INTERNAL_SERVER_ERROR, Bytes::new())
        }
    }
}
