#![warn(clippy::unwrap_used, clippy::expect_used)]

//! Single-shot delivery of a signed webhook payload.
//!
//! ```text
//! prepare(url, payload, secret)
//!   ├─ seal()          // canonical JSON bytes + HMAC-SHA1
//!   └─ signed_url()    // ?...&signature=<hex>
//! DeliveryClient::send(request)
//!   └─ POST <signed url>, Content-Type: application/json, body = sealed bytes
//! ```
//!
//! There is no retry: one request, one result, or one error.

mod error;

pub use error::{DeliveryError, Result};

use payhook_signing::{seal, Signature};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Bound on one request/response round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Query parameter that carries the signature.
pub const SIGNATURE_PARAM: &str = "signature";

/// A request that is signed and ready to send.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    url: Url,
    body: Vec<u8>,
    signature: Signature,
}

impl SignedRequest {
    /// Target URL including the `signature` query parameter.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Exact bytes that were signed and will be sent.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

/// Signs `payload` and attaches the signature to `url`.
pub fn prepare<T: Serialize + ?Sized>(url: &str, payload: &T, secret: &str) -> Result<SignedRequest> {
    let sealed = seal(payload, secret)?;
    let url = signed_url(url, &sealed.signature)?;
    tracing::debug!(url = %url, body_len = sealed.bytes.len(), "prepared signed request");
    Ok(SignedRequest {
        url,
        body: sealed.bytes,
        signature: sealed.signature,
    })
}

/// Parses `url` and merges the signature into its query string.
///
/// Other parameters keep their order. An existing `signature` parameter is
/// replaced where it stands; otherwise the signature is appended.
pub fn signed_url(url: &str, signature: &Signature) -> Result<Url> {
    let mut target = Url::parse(url).map_err(|source| DeliveryError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    if !matches!(target.scheme(), "http" | "https") {
        return Err(DeliveryError::UnsupportedScheme(target.scheme().to_string()));
    }

    let existing: Vec<(String, String)> = target.query_pairs().into_owned().collect();
    let slot = existing.iter().position(|(key, _)| key == SIGNATURE_PARAM);
    let mut pairs: Vec<(String, String)> = existing
        .into_iter()
        .filter(|(key, _)| key != SIGNATURE_PARAM)
        .collect();
    let entry = (SIGNATURE_PARAM.to_string(), signature.as_str().to_string());
    match slot {
        Some(index) => pairs.insert(index, entry),
        None => pairs.push(entry),
    }

    target.query_pairs_mut().clear().extend_pairs(&pairs);
    Ok(target)
}

/// Response body, structured when the endpoint answered with JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(text),
        }
    }
}

impl fmt::Display for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Json(value) => match serde_json::to_string_pretty(value) {
                Ok(pretty) => f.write_str(&pretty),
                Err(_) => write!(f, "{value}"),
            },
            ResponseBody::Text(text) => f.write_str(text),
        }
    }
}

/// Status and body of the endpoint's answer.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryResult {
    pub status: u16,
    pub body: ResponseBody,
}

impl DeliveryResult {
    /// Only `200 OK` counts as a delivered webhook.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Blocking HTTP client with a bounded round trip.
#[derive(Debug, Clone)]
pub struct DeliveryClient {
    http: Client,
    timeout: Duration,
}

impl DeliveryClient {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DeliveryError::Client)?;
        Ok(Self { http, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Performs exactly one POST of the signed body.
    ///
    /// Non-2xx answers are returned as results, not errors; only network
    /// faults and timeouts fail.
    pub fn send(&self, request: &SignedRequest) -> Result<DeliveryResult> {
        let target = request.url.to_string();
        tracing::debug!(url = %target, timeout = ?self.timeout, "sending webhook");

        let response = self
            .http
            .post(request.url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(request.body.clone())
            .send()
            .map_err(|e| self.classify(&target, e))?;

        let status = response.status().as_u16();
        let text = response.text().map_err(|e| self.classify(&target, e))?;
        tracing::debug!(status, body_len = text.len(), "webhook answered");

        Ok(DeliveryResult {
            status,
            body: ResponseBody::from_text(text),
        })
    }

    /// Signs and sends in one call.
    pub fn deliver<T: Serialize + ?Sized>(
        &self,
        url: &str,
        payload: &T,
        secret: &str,
    ) -> Result<DeliveryResult> {
        let request = prepare(url, payload, secret)?;
        self.send(&request)
    }

    fn classify(&self, url: &str, error: reqwest::Error) -> DeliveryError {
        if error.is_timeout() {
            tracing::warn!(url, "webhook request timed out");
            DeliveryError::Timeout {
                url: url.to_string(),
                after: self.timeout,
            }
        } else {
            tracing::warn!(url, error = %error, "webhook request failed");
            DeliveryError::Transport {
                url: url.to_string(),
                source: error,
            }
        }
    }
}
