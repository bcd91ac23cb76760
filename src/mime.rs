//! MIME keys understood by the registry.
//!
//! Keys are compared as exact strings. There is no content negotiation: a
//! lookup for `text/html; charset=utf-8` does not match `text/html`.

use serde_json::Value;

/// The MIME type used when a requested type has no registered formatter.
pub const DEFAULT_MIME: &str = TEXT_HTML;

/// `application/json`
pub const APPLICATION_JSON: &str = "application/json";
/// `text/json`
pub const TEXT_JSON: &str = "text/json";
/// `text/html`
pub const TEXT_HTML: &str = "text/html";
/// `application/xml`
pub const APPLICATION_XML: &str = "application/xml";
/// `text/xml`
pub const TEXT_XML: &str = "text/xml";

/// The MIME keys seeded into every registry, in the order they are listed by
/// [`ErrorFormatters::default_mime_types`].
///
/// [`ErrorFormatters::default_mime_types`]: crate::ErrorFormatters::default_mime_types
pub const BUILTIN_MIME_TYPES: [&str; 5] =
    [APPLICATION_JSON, TEXT_JSON, TEXT_HTML, APPLICATION_XML, TEXT_XML];

/// Conversion into a registry key.
///
/// Any string is a key, including ones that are not well-formed MIME types
/// (`json`, `text/html; charset=utf-8`): lookups compare keys exactly, so
/// whatever the caller will ask for can be registered. Loosely-typed JSON
/// values are keys only when they are strings.
///
/// # Examples
///
/// ```
/// use errorfmt::mime::IntoMimeKey;
/// use serde_json::json;
///
/// assert_eq!("json".into_mime_key().as_deref(), Some("json"));
/// assert_eq!(json!("text/csv").into_mime_key().as_deref(), Some("text/csv"));
/// assert_eq!(json!(123).into_mime_key(), None);
/// ```
pub trait IntoMimeKey {
    /// Returns the key, or `None` when the value is not a string.
    fn into_mime_key(self) -> Option<String>;
}

impl IntoMimeKey for &str {
    #[inline(always)]
    fn into_mime_key(self) -> Option<String> {
        Some(self.to_owned())
    }
}

impl IntoMimeKey for String {
    #[inline(always)]
    fn into_mime_key(self) -> Option<String> {
        Some(self)
    }
}

impl IntoMimeKey for &String {
    #[inline(always)]
    fn into_mime_key(self) -> Option<String> {
        Some(self.clone())
    }
}

impl IntoMimeKey for &Value {
    fn into_mime_key(self) -> Option<String> {
        self.as_str().map(str::to_owned)
    }
}

impl IntoMimeKey for Value {
    fn into_mime_key(self) -> Option<String> {
        match self {
            Value::String(mime) => Some(mime),
            _ => None,
        }
    }
}
