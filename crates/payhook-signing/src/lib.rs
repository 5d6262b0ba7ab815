#![warn(clippy::unwrap_used, clippy::expect_used)]

//! HMAC-SHA1 signatures over the canonical JSON form of a payload.
//!
//! The canonical form is compact JSON (no insignificant whitespace) in the
//! payload's declared key order, UTF-8 encoded with non-ASCII characters left
//! unescaped. A receiver recomputes the digest over the request body it got,
//! so the signed bytes must be the bytes on the wire; [`seal`] returns both
//! together for that reason.

mod error;

pub use error::{Result, SignError};

use hmac::{Hmac, Mac};
use serde::Serialize;
use sha1::Sha1;
use std::fmt;

type HmacSha1 = Hmac<Sha1>;

/// Lowercase hex HMAC-SHA1 digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Signature(String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `visible` characters followed by `...`, for console output.
    pub fn preview(&self, visible: usize) -> String {
        mask(&self.0, visible)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonical body bytes together with their signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedBody {
    pub bytes: Vec<u8>,
    pub signature: Signature,
}

/// Serializes `payload` to its canonical JSON bytes.
pub fn canonical_bytes<T: Serialize + ?Sized>(payload: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(payload)?)
}

/// Signs already-serialized bytes.
pub fn sign_bytes(body: &[u8], secret: &str) -> Result<Signature> {
    if secret.is_empty() {
        return Err(SignError::InvalidArgument("secret key must not be empty"));
    }
    let mut mac = HmacSha1::new_from_slice(secret.as_bytes())
        .map_err(|_| SignError::InvalidArgument("secret key rejected by HMAC"))?;
    mac.update(body);
    let signature = Signature(hex::encode(mac.finalize().into_bytes()));

    #[cfg(feature = "telemetry")]
    tracing::trace!(body_len = body.len(), signature = %signature.preview(8), "signed payload");

    Ok(signature)
}

/// Signs the canonical serialization of `payload`.
pub fn sign<T: Serialize + ?Sized>(payload: &T, secret: &str) -> Result<Signature> {
    seal(payload, secret).map(|sealed| sealed.signature)
}

/// Serializes and signs `payload` in one step.
pub fn seal<T: Serialize + ?Sized>(payload: &T, secret: &str) -> Result<SealedBody> {
    let bytes = canonical_bytes(payload)?;
    let signature = sign_bytes(&bytes, secret)?;
    Ok(SealedBody { bytes, signature })
}

/// Keeps the first `visible` characters of a secret value.
pub fn mask(value: &str, visible: usize) -> String {
    let prefix: String = value.chars().take(visible).collect();
    format!("{prefix}...")
}
