//! Auth Value Objects

use std::fmt;

use platform::crypto;

/// Bytes of entropy behind a freshly minted key (32 chars base64url)
const KEY_BYTES: usize = 24;

/// An opaque caller credential
///
/// `Display` and `Debug` render the masked form; full key material is only
/// reachable through [`ApiKey::expose`] and must never be logged.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Mint a new random key
    pub fn mint() -> Self {
        Self(crypto::to_base64url(&crypto::random_bytes(KEY_BYTES)))
    }

    /// Wrap an existing key string
    pub fn from_string(raw: String) -> Self {
        Self(raw)
    }

    /// The full key material
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// The masked form, safe for listings and logs
    pub fn masked(&self) -> String {
        mask_key(&self.0)
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self.masked())
    }
}

/// Mask all but the last four characters of a key
///
/// Empty input renders as `-` so log fields stay non-empty.
pub fn mask_key(key: &str) -> String {
    if key.is_empty() {
        return "-".to_string();
    }
    let chars: Vec<char> = key.chars().collect();
    let visible = chars.len().min(4);
    let masked = chars.len() - visible;
    let mut out = "*".repeat(masked);
    out.extend(&chars[masked..]);
    out
}
