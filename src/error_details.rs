//! The error value rendered by formatters.
//!
//! Formatters never see arbitrary error types. Every error is first reduced to
//! an [`ErrorDetails`]: an optional machine-readable code, a human-readable
//! message and a stack description. This is the same triple every built-in
//! format emits.

use core::{error::Error, fmt};

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A machine-readable error code.
///
/// Codes are either numeric (e.g. an HTTP status) or symbolic (e.g.
/// `"ENOENT"`). They serialize to a bare JSON number or string. Numeric codes
/// keep whatever JSON number they were read from, fractional or not.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    /// A numeric code.
    Number(Number),
    /// A symbolic code.
    Text(String),
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Number(code) => fmt::Display::fmt(code, f),
            ErrorCode::Text(code) => f.write_str(code),
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ErrorCode {
                fn from(code: $ty) -> Self {
                    ErrorCode::Number(code.into())
                }
            }
        )*
    };
}

impl_from_integer!(i16, i32, i64, u16, u32, u64);

impl From<Number> for ErrorCode {
    fn from(code: Number) -> Self {
        ErrorCode::Number(code)
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        ErrorCode::Text(code.to_owned())
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        ErrorCode::Text(code)
    }
}

/// An error reduced to the fields every formatter renders.
///
/// # Examples
///
/// ```
/// use errorfmt::ErrorDetails;
///
/// let details = ErrorDetails::new("article not found").with_code(404);
/// assert_eq!(details.message(), "article not found");
/// assert_eq!(details.stack(), "Error: article not found");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
    message: String,
    stack: String,
}

impl ErrorDetails {
    /// Creates details with the given message and no code.
    ///
    /// The stack defaults to the single line `Error: {message}`.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let stack = format!("Error: {message}");
        Self {
            code: None,
            message,
            stack,
        }
    }

    /// Sets the error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<ErrorCode>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Replaces the stack description.
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = stack.into();
        self
    }

    /// Builds details from any error value.
    ///
    /// The message is the error's `Display` output. The stack starts with
    /// `Error: {message}` and lists every error in the
    /// [`source`](Error::source) chain on its own `caused by:` line.
    ///
    /// ```
    /// use errorfmt::ErrorDetails;
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
    /// let details = ErrorDetails::from_error(&io);
    /// assert_eq!(details.message(), "missing file");
    /// ```
    pub fn from_error(error: &(dyn Error + 'static)) -> Self {
        let message = error.to_string();
        let mut stack = format!("Error: {message}");
        let mut source = error.source();
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }
        Self {
            code: None,
            message,
            stack,
        }
    }

    /// Creates details whose stack is a trace of the current call stack.
    ///
    /// The frames are filtered with [`StackFilter::new_from_env`].
    ///
    /// [`StackFilter::new_from_env`]: crate::stack::StackFilter::new_from_env
    #[cfg(feature = "backtrace")]
    #[cfg_attr(docsrs, doc(cfg(feature = "backtrace")))]
    pub fn capture(message: impl Into<String>) -> Self {
        let details = Self::new(message);
        let filter = crate::stack::StackFilter::new_from_env();
        let stack = crate::stack::capture(&details.stack, &filter);
        details.with_stack(stack)
    }

    /// The error code, if any.
    pub fn code(&self) -> Option<&ErrorCode> {
        self.code.as_ref()
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The stack description.
    pub fn stack(&self) -> &str {
        &self.stack
    }
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{code}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}
