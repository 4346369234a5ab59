use serde::Serialize;

/// First line of every ASCII-armored OpenPGP public key.
pub const ARMOR_HEADER: &[u8; 36] = b"-----BEGIN PGP PUBLIC KEY BLOCK-----";

/// Request body for `POST /user/gpg_keys`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyPayload {
    /// Full text of the key, sent verbatim.
    pub armored_public_key: String,
}

impl KeyPayload {
    /// Build a payload from the raw bytes read from the key source.
    pub fn from_bytes(content: &[u8]) -> Self {
        Self {
            armored_public_key: String::from_utf8_lossy(content).into_owned(),
        }
    }
}

/// Check that `content` begins with the armor header.
///
/// Content shorter than the header never matches.
pub fn is_armored(content: &[u8]) -> bool {
    content.starts_with(ARMOR_HEADER)
}
