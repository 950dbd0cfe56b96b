//! Drives the axum router directly with `tower::ServiceExt::oneshot`,
//! mirroring the end-to-end scenarios in spec.md §8, against a
//! single-node `MemoryBackend`-backed frontend.

use std::sync::Arc;

use axum::body::Bytes;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use pubsub_core::{Backend, MemoryBackend};
use pubsub_frontend::build_router;
use tower::ServiceExt;

fn router() -> axum::Router {
    let backend: Arc<dyn Backend> = Arc::new(MemoryBackend::new());
    build_router(backend)
}

async fn call(
    app: &axum::Router,
    method: Method,
    path: &str,
    body: &'static [u8],
) -> (StatusCode, Bytes) {
    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(axum::body::Body::from(body.to_vec()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

#[tokio::test]
async fn scenario_1_basic_fan_out() {
    let app = router();

    assert_eq!(
        call(&app, Method::POST, "/kittens/alice", b"").await.0,
        StatusCode::OK
    );
    assert_eq!(
        call(&app, Method::POST, "/kittens/bob", b"").await.0,
        StatusCode::OK
    );
    assert_eq!(
        call(&app, Method::POST, "/kittens", b"IMG").await.0,
        StatusCode::OK
    );

    let (status, body) = call(&app, Method::GET, "/kittens/alice", b"").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"IMG");

    let (status, body) = call(&app, Method::GET, "/kittens/alice", b"").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, body) = call(&app, Method::GET, "/kittens/bob", b"").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"IMG");

    let (status, body) = call(&app, Method::GET, "/kittens/bob", b"").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[tokio::test]
async fn scenario_2_unsubscribe_while_others_still_pending() {
    let app = router();

    call(&app, Method::POST, "/t/a", b"").await;
    call(&app, Method::POST, "/t/b", b"").await;
    call(&app, Method::POST, "/t", b"M").await;

    assert_eq!(
        call(&app, Method::DELETE, "/t/a", b"").await.0,
        StatusCode::OK
    );
    assert_eq!(
        call(&app, Method::GET, "/t/a", b"").await.0,
        StatusCode::NOT_FOUND
    );
    let (status, body) = call(&app, Method::GET, "/t/b", b"").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"M");
}

#[tokio::test]
async fn scenario_3_subscribe_after_post() {
    let app = router();

    assert_eq!(call(&app, Method::POST, "/t", b"X").await.0, StatusCode::OK);
    assert_eq!(
        call(&app, Method::POST, "/t/u", b"").await.0,
        StatusCode::OK
    );
    assert_eq!(
        call(&app, Method::GET, "/t/u", b"").await.0,
        StatusCode::NO_CONTENT
    );
}

#[tokio::test]
async fn scenario_4_resubscribe_has_empty_inbox() {
    let app = router();

    call(&app, Method::POST, "/t/u", b"").await;
    call(&app, Method::POST, "/t", b"M").await;
    assert_eq!(
        call(&app, Method::DELETE, "/t/u", b"").await.0,
        StatusCode::OK
    );
    assert_eq!(
        call(&app, Method::POST, "/t/u", b"").await.0,
        StatusCode::OK
    );
    assert_eq!(
        call(&app, Method::GET, "/t/u", b"").await.0,
        StatusCode::NO_CONTENT
    );
}

#[tokio::test]
async fn scenario_5_malformed_paths() {
    let app = router();

    assert_eq!(
        call(&app, Method::POST, "/a/b/c", b"").await.0,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        call(&app, Method::GET, "/a", b"").await.0,
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        call(&app, Method::DELETE, "/a", b"").await.0,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn get_message_404_when_never_subscribed() {
    let app = router();
    assert_eq!(
        call(&app, Method::GET, "/never-subscribed/nobody", b"")
            .await
            .0,
        StatusCode::NOT_FOUND
    );
}
