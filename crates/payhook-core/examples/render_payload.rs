//! Prints a payload as pretty JSON without signing or sending it.
//!
//! Usage: `cargo run -p payhook-core --example render_payload -- <kind> <email>`

use payhook_core::{build, EventKind, Overrides};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut args = std::env::args().skip(1);
    let kind: EventKind = args.next().as_deref().unwrap_or("approved").parse()?;
    let email = args.next().unwrap_or_else(|| "cliente@example.com".to_string());

    let payload = build(kind, &email, &Overrides::default())?;
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
