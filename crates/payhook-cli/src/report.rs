//! Operator-facing console output.

use anyhow::Result;
use payhook_core::Payload;
use payhook_delivery::{DeliveryResult, SignedRequest};
use payhook_signing::mask;

/// Characters of the secret shown before masking.
const SECRET_PREVIEW: usize = 10;
/// Characters of the signature shown before masking.
const SIGNATURE_PREVIEW: usize = 20;

pub fn request(target: &str, secret: &str, request: &SignedRequest, payload: &Payload) -> Result<()> {
    println!();
    println!("Sending webhook to: {target}");
    println!("Secret key: {}", mask(secret, SECRET_PREVIEW));
    println!("Signature: {}", request.signature().preview(SIGNATURE_PREVIEW));
    println!("Event: {}", payload.event_kind());
    println!("Email: {}", payload.customer_email());
    println!();
    println!("Payload:");
    println!("{}", serde_json::to_string_pretty(payload)?);
    Ok(())
}

pub fn dry_run(request: &SignedRequest) {
    println!();
    println!("Dry run, nothing sent.");
    println!("Signed URL: {}", request.url());
}

pub fn response(result: &DeliveryResult) {
    println!();
    println!("Status Code: {}", result.status);
    println!("Response:");
    println!("{}", result.body);
}

pub fn outcome(result: &DeliveryResult) {
    println!();
    if result.is_success() {
        println!("Webhook delivered successfully!");
    } else {
        println!("Webhook returned status {}", result.status);
    }
}
