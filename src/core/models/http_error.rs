use std::fmt;
use std::io::Read;

use serde::{Deserialize, Deserializer};

/// A single entry of the `errors` array in an API error response.
///
/// Missing fields, `null`s and values of the wrong type all read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpErrorItem {
    #[serde(deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(deserialize_with = "lenient_string")]
    pub resource: String,
    #[serde(deserialize_with = "lenient_string")]
    pub field: String,
    #[serde(deserialize_with = "lenient_string")]
    pub code: String,
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}

impl HttpErrorItem {
    /// Human-readable line for this item, if it carries anything printable.
    fn display_line(&self) -> Option<String> {
        if !self.code.is_empty() && self.code != "custom" {
            return Some(format!(
                "{}.{} {}",
                self.resource,
                self.field,
                code_to_message(&self.code)
            ));
        }
        (!self.message.is_empty()).then(|| self.message.clone())
    }
}

fn code_to_message(code: &str) -> &str {
    match code {
        "missing_field" => "is missing",
        "invalid" => "is invalid",
        "already_exists" => "already exists",
        other => other,
    }
}

/// Structured error decoded from a non-2xx API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    pub status_code: u16,
    pub request_url: String,
    pub message: String,
    pub errors: Vec<HttpErrorItem>,
}

/// Raw shape of a GitHub API error body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default, deserialize_with = "lenient_string")]
    message: String,
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

impl HttpError {
    /// Decode an error from a response body.
    ///
    /// Bodies that are not JSON, or fail to parse, yield an error carrying
    /// only the status code and URL. Only a failed body read is an error.
    pub fn decode(
        status_code: u16,
        request_url: &str,
        content_type: Option<&str>,
        body: &mut dyn Read,
    ) -> std::io::Result<Self> {
        let mut raw = Vec::new();
        body.read_to_end(&mut raw)?;

        let mut error = Self {
            status_code,
            request_url: request_url.to_string(),
            message: String::new(),
            errors: Vec::new(),
        };

        let is_json = content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));
        if !is_json {
            return Ok(error);
        }
        let Ok(parsed) = serde_json::from_slice::<ErrorBody>(&raw) else {
            return Ok(error);
        };

        let mut lines = Vec::new();
        if !parsed.message.is_empty() {
            lines.push(parsed.message);
        }
        for entry in parsed.errors {
            match entry {
                serde_json::Value::String(msg) => {
                    lines.push(msg.clone());
                    error.errors.push(HttpErrorItem {
                        message: msg,
                        ..Default::default()
                    });
                }
                serde_json::Value::Object(_) => {
                    let item: HttpErrorItem = serde_json::from_value(entry).unwrap_or_default();
                    if let Some(line) = item.display_line() {
                        lines.push(line);
                    }
                    error.errors.push(item);
                }
                _ => {}
            }
        }

        error.message = lines.join("\n");
        Ok(error)
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "HTTP {} ({})", self.status_code, self.request_url)
        } else {
            write!(
                f,
                "HTTP {}: {} ({})",
                self.status_code, self.message, self.request_url
            )
        }
    }
}

impl std::error::Error for HttpError {}
