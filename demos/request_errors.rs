//! Formatting errors that arrive as loosely-typed JSON, with logging.
//!
//! Run with `RUST_LOG=errorfmt=trace cargo run --example request_errors` to
//! see the registry's fallback and failure events.

use errorfmt::{ErrorFormatters, FormatError};
use serde_json::json;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .init();

    let formatters = ErrorFormatters::new();

    let payloads = [
        json!({
            "mime": "text/xml",
            "error": { "message": "A URL with that name already exists", "code": "EXISTING_URL" },
            "request": { "method": "POST", "url": "/actions/admin/content/articles/new_article" },
        }),
        json!({
            "mime": "image/webp",
            "error": { "message": "Headline is required", "stack": "Error: Headline is required" },
        }),
        json!({ "mime": "text/html", "error": "not an error object" }),
        json!(null),
    ];

    for payload in &payloads {
        match formatters.format_for_mime(payload).await {
            Ok(formatted) => println!("{} => {}", formatted.mime, formatted.content),
            Err(FormatError::Argument(error)) => println!("rejected: {error}"),
            Err(error) => println!("failed: {error}"),
        }
    }
}
