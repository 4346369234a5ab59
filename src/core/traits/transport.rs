use std::io::Read;

use crate::core::errors::Result;

/// Response returned by an `HttpTransport`.
///
/// The body is a stream owned by the caller; dropping the response
/// releases it.
pub struct HttpResponse {
    pub status: u16,
    /// Final URL of the request, used in error messages.
    pub url: String,
    pub content_type: Option<String>,
    pub body: Box<dyn Read + Send>,
}

/// Port for issuing authenticated API requests.
///
/// Implementations live in `adapters::http`. The core layer only depends
/// on this trait, never on a concrete HTTP client.
pub trait HttpTransport: Send + Sync {
    /// POST a JSON body to `url`.
    fn post_json(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse>;
}
