//! The built-in serializers.
//!
//! Output is byte-for-byte stable. Neither the HTML nor the XML serializer
//! escapes the message or stack, so the output is only well-formed when
//! those fields contain no markup characters.

use serde::Serialize;

use crate::{error::FormatterError, error_details::ErrorCode, params::FormatParams};

#[derive(Serialize)]
struct JsonBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'a ErrorCode>,
    message: &'a str,
    stack: &'a str,
}

/// Serializes the error as a compact JSON object with the keys `code`,
/// `message` and `stack`, in that order. `code` is left out when the error
/// has none.
pub fn json(params: &FormatParams) -> Result<String, FormatterError> {
    let error = &params.error;
    let body = JsonBody {
        code: error.code(),
        message: error.message(),
        stack: error.stack(),
    };
    Ok(serde_json::to_string(&body)?)
}

/// Serializes the error as a minimal HTML page showing the stack.
pub fn html(params: &FormatParams) -> Result<String, FormatterError> {
    Ok(format!(
        "<html><body><h2>Whoops! Something unexpected happened.</h2><br/><pre>{}</pre></body></html>",
        params.error.stack()
    ))
}

/// Serializes the error as an `<error>` element. A missing code renders as
/// `<code>undefined</code>`, the output existing consumers already parse.
pub fn xml(params: &FormatParams) -> Result<String, FormatterError> {
    let error = &params.error;
    let code = match error.code() {
        Some(code) => code.to_string(),
        None => "undefined".to_owned(),
    };
    Ok(format!(
        "<error><message>{}</message><stack>{}</stack><code>{}</code></error>",
        error.message(),
        error.stack(),
        code
    ))
}
