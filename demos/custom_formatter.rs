//! Registering a custom formatter and unregistering it again.
//!
//! Run with `cargo run --example custom_formatter`.

use errorfmt::{
    ErrorDetails, ErrorFormatters, FormatParams, FormatterError, async_trait,
    formatter::{ErrorFormatter, Formatter},
};

/// Renders errors as RFC 7807 problem documents.
struct ProblemJson;

#[async_trait]
impl ErrorFormatter for ProblemJson {
    async fn format(&self, params: &FormatParams) -> Result<String, FormatterError> {
        let status = params
            .error
            .code()
            .map(ToString::to_string)
            .unwrap_or_else(|| "500".to_owned());
        let instance = params.request.as_ref().map(|request| request.url.as_str());
        let body = serde_json::json!({
            "type": "about:blank",
            "title": params.error.message(),
            "status": status,
            "instance": instance,
        });
        Ok(serde_json::to_string_pretty(&body)?)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let formatters = ErrorFormatters::new();
    formatters.register("application/problem+json", Formatter::custom(ProblemJson));

    formatters.debug_formatters(|entry| println!("{entry}"));
    println!();

    let error = ErrorDetails::new("Article not found").with_code(404);
    for mime in ["application/problem+json", "application/json", "text/csv"] {
        let formatted = formatters
            .format_for_mime(FormatParams::new(mime, error.clone()))
            .await?;
        println!("requested {mime}, served {}:", formatted.content_type());
        println!("{}\n", formatted.content);
    }

    formatters.unregister("application/problem+json");
    let formatted = formatters
        .format_for_mime(FormatParams::new("application/problem+json", error))
        .await?;
    println!("after unregister: served {}", formatted.mime);

    Ok(())
}
