use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use pubsub_core::{Backend, BackendError};

use crate::client::Client;

/// Topic/user segments are opaque bytes that may contain any byte except
/// `/`; percent-encode everything outside the unreserved set so a segment
/// containing e.g. a literal `%` or a raw byte round-trips through the
/// wire unchanged.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

fn encode_segment(raw: &[u8]) -> String {
    // Percent-encoding is defined over `&str`; topic/user are "opaque
    // bytes" per spec.md §6, but the wire format this backend speaks is
    // plain HTTP paths, so non-UTF-8 segments are encoded byte-by-byte via
    // the lossless Latin-1 round trip `percent_encoding` recommends for
    // arbitrary bytes.
    let lossy: String = raw.iter().map(|&b| b as char).collect();
    utf8_percent_encode(&lossy, SEGMENT).to_string()
}

/// Forwards the backend contract over HTTP to a remote `MemoryBackend`,
/// per the bit-exact wire mapping in spec.md §4.5:
///
/// - `Subscribe`   -> `POST   /{topic}/{user}`
/// - `Unsubscribe` -> `DELETE /{topic}/{user}`
/// - `GetMessage`  -> `GET    /{topic}/{user}`
/// - `PostMessage` -> `POST   /{topic}` with `body` as the request body
///
/// Every call genuinely suspends once, between dispatching the request and
/// receiving its response; transport failures become `BackendError`, which
/// the frontend turns into `500`.
pub struct ProxyBackend {
    client: Client,
}

impl ProxyBackend {
    pub fn new(authority: &str) -> Self {
        ProxyBackend {
            client: Client::new(authority),
        }
    }
}

#[async_trait]
impl Backend for ProxyBackend {
    async fn subscribe(&self, topic: &[u8], user: &[u8]) -> Result<u16, BackendError> {
        let path = format!("/{}/{}", encode_segment(topic), encode_segment(user));
        let response = self.client.post(&path, None).await?;
        Ok(response.status)
    }

    async fn unsubscribe(&self, topic: &[u8], user: &[u8]) -> Result<u16, BackendError> {
        let path = format!("/{}/{}", encode_segment(topic), encode_segment(user));
        let response = self.client.delete(&path).await?;
        Ok(response.status)
    }

    async fn post_message(&self, topic: &[u8], body: &[u8]) -> Result<u16, BackendError> {
        let path = format!("/{}", encode_segment(topic));
        let response = self.client.post(&path, Some(body.to_vec())).await?;
        Ok(response.status)
    }

    async fn get_message(
        &self,
        topic: &[u8],
        user: &[u8],
    ) -> Result<(u16, Option<Vec<u8>>), BackendError> {
        let path = format!("/{}/{}", encode_segment(topic), encode_segment(user));
        let response = self.client.get(&path).await?;
        let body = if response.body.is_empty() {
            None
        } else {
            Some(response.body)
        };
        Ok((response.status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribe_sends_post_to_topic_slash_user() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/kittens/alice")
            .with_status(200)
            .create_async()
            .await;

        let backend = ProxyBackend::new(&server.host_with_port());
        let status = backend.subscribe(b"kittens", b"alice").await.unwrap();

        assert_eq!(status, 200);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn unsubscribe_sends_delete() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/t/u")
            .with_status(404)
            .create_async()
            .await;

        let backend = ProxyBackend::new(&server.host_with_port());
        let status = backend.unsubscribe(b"t", b"u").await.unwrap();

        assert_eq!(status, 404);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn post_message_sends_body_to_topic_only() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/kittens")
            .match_body("IMG")
            .with_status(200)
            .create_async()
            .await;

        let backend = ProxyBackend::new(&server.host_with_port());
        let status = backend.post_message(b"kittens", b"IMG").await.unwrap();

        assert_eq!(status, 200);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_message_returns_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/t/u")
            .with_status(200)
            .with_body("hello")
            .create_async()
            .await;

        let backend = ProxyBackend::new(&server.host_with_port());
        let (status, body) = backend.get_message(b"t", b"u").await.unwrap();

        assert_eq!(status, 200);
        assert_eq!(body, Some(b"hello".to_vec()));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn get_message_204_has_no_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/t/u")
            .with_status(204)
            .create_async()
            .await;

        let backend = ProxyBackend::new(&server.host_with_port());
        let (status, body) = backend.get_message(b"t", b"u").await.unwrap();

        assert_eq!(status, 204);
        assert_eq!(body, None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn transport_failure_becomes_a_backend_error() {
        // Nothing listening on this port: the connection is refused and
        // surfaces as a BackendError, which the frontend will turn into
        // a 500.
        let backend = ProxyBackend::new("127.0.0.1:1");
        let result = backend.subscribe(b"t", b"u").await;
        assert!(result.is_err());
    }
}
