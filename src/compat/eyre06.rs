//! Conversions from the [`eyre`] 0.6.x error handling library.
//!
//! Enable with the `compat-eyre06` feature flag. The message is the
//! report's `Display` output and the stack is the report's `Debug` output
//! as rendered by the installed eyre handler, prefixed with `Error: `.
//!
//! ```
//! use errorfmt::compat::IntoErrorDetails;
//!
//! let report = eyre::eyre!("template missing");
//! assert_eq!(report.into_error_details().message(), "template missing");
//! ```

use super::IntoErrorDetails;
use crate::error_details::ErrorDetails;

impl IntoErrorDetails for eyre::Report {
    type Output = ErrorDetails;

    #[inline]
    fn into_error_details(self) -> Self::Output {
        ErrorDetails::from(&self)
    }
}

impl<T> IntoErrorDetails for eyre::Result<T> {
    type Output = Result<T, ErrorDetails>;

    #[inline]
    fn into_error_details(self) -> Self::Output {
        self.map_err(IntoErrorDetails::into_error_details)
    }
}

impl From<&eyre::Report> for ErrorDetails {
    fn from(report: &eyre::Report) -> Self {
        ErrorDetails::new(report.to_string()).with_stack(format!("Error: {report:?}"))
    }
}

impl From<eyre::Report> for ErrorDetails {
    fn from(report: eyre::Report) -> Self {
        ErrorDetails::from(&report)
    }
}
