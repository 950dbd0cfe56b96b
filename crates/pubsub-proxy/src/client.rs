use pubsub_core::BackendError;

/// Minimal async HTTP client wrapper for a single remote authority.
///
/// Out of scope for detailed specification (spec.md §1 calls this "a
/// minimal HTTP client wrapper used only by the proxying backend"); kept
/// deliberately small, mirroring the one-`request`-plus-three-wrappers
/// shape of the original service's own HTTP client helper.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

/// The outcome of a single HTTP call: status code plus whatever body bytes
/// came back (empty for calls that don't read one).
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Client {
    pub fn new(authority: &str) -> Self {
        Client {
            http: reqwest::Client::new(),
            base_url: format!("http://{authority}"),
        }
    }

    async fn request(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, BackendError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.body(body);
        }
        let response = request
            .send()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))?
            .to_vec();
        Ok(RawResponse { status, body })
    }

    pub async fn get(&self, path: &str) -> Result<RawResponse, BackendError> {
        self.request(reqwest::Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Option<Vec<u8>>) -> Result<RawResponse, BackendError> {
        self.request(reqwest::Method::POST, path, body).await
    }

    pub async fn delete(&self, path: &str) -> Result<RawResponse, BackendError> {
        self.request(reqwest::Method::DELETE, path, None).await
    }
}
