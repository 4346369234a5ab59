use std::io::Cursor;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use crate::core::errors::{GhKeyError, Result};
use crate::core::traits::transport::{HttpResponse, HttpTransport};

/// Default timeout for a single API request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// `HttpTransport` backed by reqwest, authenticated with an API token.
pub struct ReqwestTransport {
    token: String,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Create a transport that sends `token` with every request.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(format!("ghkey/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GhKeyError::Transport {
                reason: format!("Failed to create HTTP client: {e}"),
            })
    }
}

impl HttpTransport for ReqwestTransport {
    fn post_json(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| GhKeyError::Transport {
                reason: format!("Failed to create async runtime: {e}"),
            })?;

        rt.block_on(async {
            let client = self.build_client()?;
            let resp = client
                .post(url)
                .header(ACCEPT, "application/vnd.github+json")
                .header(CONTENT_TYPE, "application/json; charset=utf-8")
                .header(AUTHORIZATION, format!("token {}", self.token))
                .body(body)
                .send()
                .await
                .map_err(|e| GhKeyError::Transport {
                    reason: format!("POST {url} failed: {e}"),
                })?;

            let status = resp.status().as_u16();
            let final_url = resp.url().to_string();
            let content_type = resp
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);

            let bytes = resp.bytes().await.map_err(|e| GhKeyError::Transport {
                reason: format!("Failed to read response from {final_url}: {e}"),
            })?;

            Ok(HttpResponse {
                status,
                url: final_url,
                content_type,
                body: Box::new(Cursor::new(bytes.to_vec())),
            })
        })
    }
}
