//! Errors returned by the registry.

use core::{error::Error, fmt};

/// A malformed call into [`ErrorFormatters::format_for_mime`].
///
/// These are detected before any formatter runs.
///
/// [`ErrorFormatters::format_for_mime`]: crate::ErrorFormatters::format_for_mime
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    /// The params value was missing or not a structured value.
    #[error("The params parameter must be an object")]
    ParamsNotObject,
    /// `params.mime` was missing or not a string.
    #[error("The params.mime parameter must be a string")]
    MimeNotString,
    /// `params.error` was missing or not recognizable as an error.
    #[error("The params.error parameter must be an Error")]
    ErrorNotError,
    /// An optional context field was present but could not be read.
    #[error("The params.{0} parameter is malformed")]
    MalformedContext(&'static str),
}

/// An error reported by a formatter while serializing.
///
/// Wraps whatever error type the formatter produced. The original error is
/// available through [`Error::source`] and [`FormatterError::into_inner`].
pub struct FormatterError(Box<dyn Error + Send + Sync + 'static>);

impl FormatterError {
    /// Wraps an error.
    pub fn new<E>(error: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync + 'static>>,
    {
        Self(error.into())
    }

    /// Creates an error from a message.
    pub fn msg(message: impl fmt::Display) -> Self {
        Self(message.to_string().into())
    }

    /// Returns the wrapped error.
    pub fn into_inner(self) -> Box<dyn Error + Send + Sync + 'static> {
        self.0
    }
}

impl fmt::Debug for FormatterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for FormatterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Error for FormatterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.0.source()
    }
}

impl From<serde_json::Error> for FormatterError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(error)
    }
}

impl From<fmt::Error> for FormatterError {
    fn from(error: fmt::Error) -> Self {
        Self::new(error)
    }
}

/// The error returned by [`ErrorFormatters::format_for_mime`].
///
/// [`ErrorFormatters::format_for_mime`]: crate::ErrorFormatters::format_for_mime
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The call was malformed; no formatter ran.
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    /// The resolved formatter failed.
    #[error("formatting error as {mime} failed")]
    Formatter {
        /// The MIME type whose formatter ran, after fallback.
        mime: String,
        /// The formatter's own error.
        #[source]
        source: FormatterError,
    },
}

impl FormatError {
    /// The MIME type that was resolved before the failure, if a formatter ran.
    pub fn mime(&self) -> Option<&str> {
        match self {
            FormatError::Argument(_) => None,
            FormatError::Formatter { mime, .. } => Some(mime),
        }
    }

    /// Returns the argument error, if that is what this is.
    pub fn as_argument(&self) -> Option<&ArgumentError> {
        match self {
            FormatError::Argument(error) => Some(error),
            FormatError::Formatter { .. } => None,
        }
    }
}
