//! Conversions from the [`anyhow`] 1.x error handling library.
//!
//! Enable with the `compat-anyhow1` feature flag.
//!
//! The message is the error's `Display` output, which for [`anyhow::Error`]
//! is the outermost context only. The stack is anyhow's `Debug` output
//! (the full `Caused by:` chain, plus a backtrace when anyhow captured one),
//! prefixed with `Error: `.
//!
//! ```
//! use anyhow::Context;
//! use errorfmt::compat::IntoErrorDetails;
//!
//! let error = Err::<(), _>(anyhow::anyhow!("connection refused"))
//!     .context("saving article failed")
//!     .unwrap_err();
//!
//! let details = error.into_error_details();
//! assert_eq!(details.message(), "saving article failed");
//! assert!(details.stack().contains("connection refused"));
//! ```

use super::IntoErrorDetails;
use crate::error_details::ErrorDetails;

impl IntoErrorDetails for anyhow::Error {
    type Output = ErrorDetails;

    #[inline]
    fn into_error_details(self) -> Self::Output {
        ErrorDetails::from(&self)
    }
}

impl<T> IntoErrorDetails for anyhow::Result<T> {
    type Output = Result<T, ErrorDetails>;

    #[inline]
    fn into_error_details(self) -> Self::Output {
        self.map_err(IntoErrorDetails::into_error_details)
    }
}

impl From<&anyhow::Error> for ErrorDetails {
    fn from(error: &anyhow::Error) -> Self {
        ErrorDetails::new(error.to_string()).with_stack(format!("Error: {error:?}"))
    }
}

impl From<anyhow::Error> for ErrorDetails {
    fn from(error: anyhow::Error) -> Self {
        ErrorDetails::from(&error)
    }
}
