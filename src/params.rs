//! Inputs to a formatting call.
//!
//! [`FormatParams`] is the typed form. Callers that receive the parameters
//! from outside the process (a JSON message, a job queue) can hand the raw
//! [`serde_json::Value`] to [`ErrorFormatters::format_for_mime`] instead, and
//! the value is validated through [`IntoFormatParams`].
//!
//! [`ErrorFormatters::format_for_mime`]: crate::ErrorFormatters::format_for_mime

use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{error::ArgumentError, error_details::ErrorDetails};

/// Everything a formatter needs to serialize one error.
#[derive(Clone, Debug, PartialEq)]
pub struct FormatParams {
    /// The MIME type the caller asked for.
    pub mime: String,
    /// The error to render.
    pub error: ErrorDetails,
    /// The request that failed, if there was one.
    pub request: Option<RequestContext>,
    /// The localization for the request, if there is one.
    pub localization: Option<Localization>,
}

impl FormatParams {
    /// Creates params without request or localization context.
    pub fn new(mime: impl Into<String>, error: ErrorDetails) -> Self {
        Self {
            mime: mime.into(),
            error,
            request: None,
            localization: None,
        }
    }

    /// Attaches the request that failed.
    #[must_use]
    pub fn with_request(mut self, request: RequestContext) -> Self {
        self.request = Some(request);
        self
    }

    /// Attaches a localization.
    #[must_use]
    pub fn with_localization(mut self, localization: Localization) -> Self {
        self.localization = Some(localization);
        self
    }
}

/// The request during which an error occurred.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The HTTP method.
    #[serde(default)]
    pub method: String,
    /// The request path, including the query string.
    #[serde(default)]
    pub url: String,
    /// The request headers in the order received.
    #[serde(default)]
    pub headers: Vec<(String, String)>,
}

impl RequestContext {
    /// Creates a context for `method` and `url` with no headers.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: Vec::new(),
        }
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Returns the first header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Localized messages for the locale of a request.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localization {
    /// The locale, e.g. `en-US`.
    pub locale: String,
    #[serde(default)]
    messages: HashMap<String, String, FxBuildHasher>,
}

impl Localization {
    /// Creates an empty localization for `locale`.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            messages: HashMap::default(),
        }
    }

    /// Adds a message.
    #[must_use]
    pub fn with_message(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(key.into(), message.into());
        self
    }

    /// Looks up the message for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }
}

/// Conversion into validated [`FormatParams`].
///
/// Implemented for the typed params (always valid), for `Option` of them,
/// and for loosely-typed JSON values.
pub trait IntoFormatParams {
    /// Validates and converts.
    fn into_format_params(self) -> Result<FormatParams, ArgumentError>;
}

impl IntoFormatParams for FormatParams {
    #[inline(always)]
    fn into_format_params(self) -> Result<FormatParams, ArgumentError> {
        Ok(self)
    }
}

impl IntoFormatParams for Option<FormatParams> {
    fn into_format_params(self) -> Result<FormatParams, ArgumentError> {
        self.ok_or(ArgumentError::ParamsNotObject)
    }
}

impl IntoFormatParams for &Value {
    fn into_format_params(self) -> Result<FormatParams, ArgumentError> {
        let Value::Object(object) = self else {
            return Err(ArgumentError::ParamsNotObject);
        };
        let Some(Value::String(mime)) = object.get("mime") else {
            return Err(ArgumentError::MimeNotString);
        };
        let error = object
            .get("error")
            .and_then(error_from_value)
            .ok_or(ArgumentError::ErrorNotError)?;
        Ok(FormatParams {
            mime: mime.clone(),
            error,
            request: context_from_value(object, "request")?,
            localization: context_from_value(object, "localization")?,
        })
    }
}

impl IntoFormatParams for Value {
    fn into_format_params(self) -> Result<FormatParams, ArgumentError> {
        (&self).into_format_params()
    }
}

/// Reads a serialized error object.
///
/// An error is an object with a string `message`. `stack` must be a string
/// when present, and `code` a string or a number.
fn error_from_value(value: &Value) -> Option<ErrorDetails> {
    let object = value.as_object()?;
    let message = object.get("message")?.as_str()?;
    let mut details = ErrorDetails::new(message);
    match object.get("stack") {
        None | Some(Value::Null) => {}
        Some(Value::String(stack)) => details = details.with_stack(stack.as_str()),
        Some(_) => return None,
    }
    match object.get("code") {
        None | Some(Value::Null) => {}
        Some(Value::String(code)) => details = details.with_code(code.as_str()),
        Some(Value::Number(code)) => details = details.with_code(code.clone()),
        Some(_) => return None,
    }
    Some(details)
}

fn context_from_value<T>(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<T>, ArgumentError>
where
    T: for<'de> Deserialize<'de>,
{
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::deserialize(value)
            .map(Some)
            .map_err(|_| ArgumentError::MalformedContext(field)),
    }
}
