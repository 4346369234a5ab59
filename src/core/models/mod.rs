pub mod host;
pub mod http_error;
pub mod key_payload;
