use std::io::Read;

use crate::core::errors::{GhKeyError, Result};
use crate::core::models::host::rest_prefix;
use crate::core::models::http_error::HttpError;
use crate::core::models::key_payload::{is_armored, KeyPayload};
use crate::core::traits::transport::HttpTransport;

const GPG_KEYS_PATH: &str = "user/gpg_keys";

/// Result of a successful upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The key was added to the account.
    Added,
    /// The account already had this key; nothing changed.
    AlreadyExists,
}

/// Uploads armored public keys through an `HttpTransport` backend.
pub struct KeyUploader<T: HttpTransport> {
    pub transport: T,
    hostname: String,
    api_prefix: String,
}

impl<T: HttpTransport> KeyUploader<T> {
    /// Target the REST API of `hostname`.
    pub fn for_host(transport: T, hostname: &str) -> Self {
        Self {
            transport,
            hostname: hostname.to_string(),
            api_prefix: rest_prefix(hostname),
        }
    }

    /// Target an explicit API base URL instead of the one derived from
    /// the hostname.
    pub fn with_api_prefix(transport: T, hostname: &str, api_prefix: &str) -> Self {
        let api_prefix = if api_prefix.ends_with('/') {
            api_prefix.to_string()
        } else {
            format!("{api_prefix}/")
        };
        Self {
            transport,
            hostname: hostname.to_string(),
            api_prefix,
        }
    }

    /// Endpoint the key is posted to.
    pub fn upload_url(&self) -> String {
        format!("{}{GPG_KEYS_PATH}", self.api_prefix)
    }

    /// Read the whole key from `key_source` and add it to the account.
    ///
    /// Content that is not an armored public key is rejected before any
    /// request is made. A key the account already has counts as success.
    pub fn upload(&self, mut key_source: impl Read) -> Result<UploadOutcome> {
        let mut content = Vec::new();
        key_source.read_to_end(&mut content)?;

        if !is_armored(&content) {
            return Err(GhKeyError::InvalidKeyFormat);
        }

        let payload = serde_json::to_vec(&KeyPayload::from_bytes(&content))?;
        let mut resp = self.transport.post_json(&self.upload_url(), payload)?;

        if resp.status == 404 {
            return Err(GhKeyError::InsufficientScope {
                hostname: self.hostname.clone(),
            });
        }

        if resp.status > 299 {
            let err = HttpError::decode(
                resp.status,
                &resp.url,
                resp.content_type.as_deref(),
                &mut resp.body,
            )?;
            if is_duplicate_key(&err) {
                return Ok(UploadOutcome::AlreadyExists);
            }
            if is_invalid_key(&err) {
                return Err(GhKeyError::InvalidKey);
            }
            return Err(err.into());
        }

        std::io::copy(&mut resp.body, &mut std::io::sink())?;
        Ok(UploadOutcome::Added)
    }
}

fn is_duplicate_key(err: &HttpError) -> bool {
    err.status_code == 422
        && err.errors.len() == 2
        && err.errors[0].field == "key_id"
        && err.errors[0].message == "key_id already exists"
}

fn is_invalid_key(err: &HttpError) -> bool {
    err.status_code == 422
        && err.errors.len() == 1
        && err.errors[0].field.is_empty()
        && err.errors[0].message == "We got an error doing that."
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::core::traits::transport::HttpResponse;

    const KEY: &str = "-----BEGIN PGP PUBLIC KEY BLOCK-----\n\nmQINBGBtestkeymaterial\n=abcd\n-----END PGP PUBLIC KEY BLOCK-----\n";

    /// Body that flags when it has been read to the end.
    struct TrackedBody {
        inner: Cursor<Vec<u8>>,
        drained: Arc<AtomicBool>,
    }

    impl Read for TrackedBody {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.inner.read(buf)?;
            if n == 0 {
                self.drained.store(true, Ordering::SeqCst);
            }
            Ok(n)
        }
    }

    /// Transport that records requests and replays a canned response.
    struct FakeTransport {
        status: u16,
        content_type: Option<&'static str>,
        body: &'static str,
        drained: Arc<AtomicBool>,
        requests: Mutex<Vec<(String, Vec<u8>)>>,
    }

    impl FakeTransport {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                content_type: Some("application/json; charset=utf-8"),
                body,
                drained: Arc::new(AtomicBool::new(false)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_json(&self, url: &str, body: Vec<u8>) -> Result<HttpResponse> {
            self.requests.lock().unwrap().push((url.to_string(), body));
            Ok(HttpResponse {
                status: self.status,
                url: url.to_string(),
                content_type: self.content_type.map(str::to_string),
                body: Box::new(TrackedBody {
                    inner: Cursor::new(self.body.as_bytes().to_vec()),
                    drained: Arc::clone(&self.drained),
                }),
            })
        }
    }

    /// Transport that always fails to connect.
    struct DownTransport;

    impl HttpTransport for DownTransport {
        fn post_json(&self, _url: &str, _body: Vec<u8>) -> Result<HttpResponse> {
            Err(GhKeyError::Transport {
                reason: "connection refused".into(),
            })
        }
    }

    fn uploader(transport: FakeTransport) -> KeyUploader<FakeTransport> {
        KeyUploader::for_host(transport, "github.com")
    }

    #[test]
    fn posts_full_key_to_gpg_keys_endpoint() {
        let up = uploader(FakeTransport::new(201, "{}"));

        let outcome = up.upload(KEY.as_bytes()).unwrap();
        assert_eq!(outcome, UploadOutcome::Added);

        let requests = up.transport.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (url, body) = &requests[0];
        assert_eq!(url, "https://api.github.com/user/gpg_keys");
        let json: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(json, serde_json::json!({ "armored_public_key": KEY }));
    }

    #[test]
    fn success_drains_response_body() {
        let up = uploader(FakeTransport::new(200, r#"{"id": 3, "key_id": "3262EFF25BA0D270"}"#));
        up.upload(KEY.as_bytes()).unwrap();
        assert!(up.transport.drained.load(Ordering::SeqCst));
    }

    #[test]
    fn unarmored_key_makes_no_request() {
        let up = uploader(FakeTransport::new(201, "{}"));
        let err = up.upload(&b"ssh-ed25519 AAAAC3NzaC1lZDI1NTE5 user@host"[..]).unwrap_err();
        assert!(matches!(err, GhKeyError::InvalidKeyFormat));
        assert_eq!(up.transport.request_count(), 0);
    }

    #[test]
    fn short_key_is_invalid_format() {
        let up = uploader(FakeTransport::new(201, "{}"));
        let inputs: [&[u8]; 3] = [b"", b"-----BEGIN", b"-----BEGIN PGP PUBLIC KEY BLOCK----"];
        for input in inputs {
            let err = up.upload(input).unwrap_err();
            assert!(matches!(err, GhKeyError::InvalidKeyFormat));
        }
        assert_eq!(up.transport.request_count(), 0);
    }

    #[test]
    fn not_found_is_scope_error_regardless_of_body() {
        for body in ["", "not json at all", r#"{"message": "Not Found"}"#] {
            let up = uploader(FakeTransport::new(404, body));
            let err = up.upload(KEY.as_bytes()).unwrap_err();
            assert!(
                matches!(err, GhKeyError::InsufficientScope { ref hostname } if hostname == "github.com")
            );
        }
    }

    #[test]
    fn duplicate_key_is_success() {
        let up = uploader(FakeTransport::new(
            422,
            r#"{
                "message": "Validation Failed",
                "errors": [
                    {"resource": "GpgKey", "code": "custom", "field": "key_id", "message": "key_id already exists"},
                    {"resource": "GpgKey", "code": "custom", "field": "public_key", "message": "public_key already exists"}
                ]
            }"#,
        ));
        let outcome = up.upload(KEY.as_bytes()).unwrap();
        assert_eq!(outcome, UploadOutcome::AlreadyExists);
    }

    #[test]
    fn duplicate_pattern_needs_exactly_two_errors() {
        let up = uploader(FakeTransport::new(
            422,
            r#"{
                "message": "Validation Failed",
                "errors": [
                    {"resource": "GpgKey", "code": "custom", "field": "key_id", "message": "key_id already exists"}
                ]
            }"#,
        ));
        let err = up.upload(KEY.as_bytes()).unwrap_err();
        assert!(matches!(err, GhKeyError::Api(ref e) if e.status_code == 422));
    }

    #[test]
    fn server_rejected_key_is_invalid_key() {
        let up = uploader(FakeTransport::new(
            422,
            r#"{"message": "Validation Failed", "errors": [{"resource": "GpgKey", "code": "custom", "message": "We got an error doing that."}]}"#,
        ));
        let err = up.upload(KEY.as_bytes()).unwrap_err();
        assert!(matches!(err, GhKeyError::InvalidKey));
    }

    #[test]
    fn duplicate_key_with_string_second_error_is_success() {
        let up = uploader(FakeTransport::new(
            422,
            r#"{"errors": [{"field": "key_id", "message": "key_id already exists"}, "public_key already exists"]}"#,
        ));
        let outcome = up.upload(KEY.as_bytes()).unwrap();
        assert_eq!(outcome, UploadOutcome::AlreadyExists);
    }

    #[test]
    fn string_rejection_is_invalid_key() {
        let up = uploader(FakeTransport::new(
            422,
            r#"{"errors": ["We got an error doing that."]}"#,
        ));
        let err = up.upload(KEY.as_bytes()).unwrap_err();
        assert!(matches!(err, GhKeyError::InvalidKey));
    }

    #[test]
    fn rejection_with_null_field_is_invalid_key() {
        let up = uploader(FakeTransport::new(
            422,
            r#"{"message": "Validation Failed", "errors": [{"resource": "GpgKey", "field": null, "code": "custom", "message": "We got an error doing that."}]}"#,
        ));
        let err = up.upload(KEY.as_bytes()).unwrap_err();
        assert!(matches!(err, GhKeyError::InvalidKey));
    }

    #[test]
    fn other_errors_pass_through_decoded() {
        let up = uploader(FakeTransport::new(
            422,
            r#"{"message": "Validation Failed", "errors": [{"resource": "GpgKey", "field": "armored_public_key", "code": "invalid"}]}"#,
        ));
        let err = up.upload(KEY.as_bytes()).unwrap_err();
        let GhKeyError::Api(http) = err else {
            panic!("expected a decoded API error");
        };
        assert_eq!(http.status_code, 422);
        assert_eq!(http.errors[0].field, "armored_public_key");
        assert_eq!(
            http.to_string(),
            "HTTP 422: Validation Failed\nGpgKey.armored_public_key is invalid (https://api.github.com/user/gpg_keys)"
        );
    }

    #[test]
    fn server_error_passes_through() {
        let up = uploader(FakeTransport::new(500, r#"{"message": "Server Error"}"#));
        let err = up.upload(KEY.as_bytes()).unwrap_err();
        assert!(matches!(err, GhKeyError::Api(ref e) if e.status_code == 500 && e.message == "Server Error"));
    }

    #[test]
    fn transport_errors_pass_through() {
        let up = KeyUploader::for_host(DownTransport, "github.com");
        let err = up.upload(KEY.as_bytes()).unwrap_err();
        assert!(matches!(err, GhKeyError::Transport { .. }));
    }

    #[test]
    fn enterprise_host_uses_api_v3_prefix() {
        let up = KeyUploader::for_host(FakeTransport::new(201, "{}"), "git.example.org");
        assert_eq!(up.upload_url(), "https://git.example.org/api/v3/user/gpg_keys");
    }

    #[test]
    fn explicit_prefix_gets_trailing_slash() {
        let up = KeyUploader::with_api_prefix(
            FakeTransport::new(201, "{}"),
            "github.com",
            "http://127.0.0.1:1234",
        );
        assert_eq!(up.upload_url(), "http://127.0.0.1:1234/user/gpg_keys");
    }
}
