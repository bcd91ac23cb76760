//! Rendering `anyhow` errors.
//!
//! Run with `cargo run --example anyhow_interop --features compat-anyhow1`.

use anyhow::Context;
use errorfmt::{ErrorFormatters, FormatParams, compat::IntoErrorDetails};

fn save_article(headline: &str) -> anyhow::Result<()> {
    if headline.is_empty() {
        anyhow::bail!("headline is required");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let formatters = ErrorFormatters::new();

    let Err(details) = save_article("")
        .context("creating article failed")
        .into_error_details()
    else {
        return Ok(());
    };

    for mime in ["application/json", "text/html"] {
        let formatted = formatters
            .format_for_mime(FormatParams::new(mime, details.clone()))
            .await?;
        println!("{}:\n{}\n", formatted.mime, formatted.content);
    }
    Ok(())
}
