//! Conversions from boxed error trait objects.
//!
//! ```
//! use errorfmt::compat::IntoErrorDetails;
//!
//! let boxed: Box<dyn std::error::Error + Send + Sync> = "upload too large".into();
//! assert_eq!(boxed.into_error_details().message(), "upload too large");
//! ```

use core::error::Error;

use super::IntoErrorDetails;
use crate::error_details::ErrorDetails;

impl IntoErrorDetails for Box<dyn Error + Send + Sync> {
    type Output = ErrorDetails;

    #[inline]
    fn into_error_details(self) -> Self::Output {
        ErrorDetails::from_error(&*self)
    }
}

impl IntoErrorDetails for Box<dyn Error> {
    type Output = ErrorDetails;

    #[inline]
    fn into_error_details(self) -> Self::Output {
        ErrorDetails::from_error(&*self)
    }
}

impl<T> IntoErrorDetails for Result<T, Box<dyn Error + Send + Sync>> {
    type Output = Result<T, ErrorDetails>;

    #[inline]
    fn into_error_details(self) -> Self::Output {
        self.map_err(IntoErrorDetails::into_error_details)
    }
}

impl<T> IntoErrorDetails for Result<T, Box<dyn Error>> {
    type Output = Result<T, ErrorDetails>;

    #[inline]
    fn into_error_details(self) -> Self::Output {
        self.map_err(IntoErrorDetails::into_error_details)
    }
}
