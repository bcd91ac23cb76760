//! Conversions from other error handling libraries into
//! [`ErrorDetails`](crate::ErrorDetails).
//!
//! # Available Integrations
//!
//! - [`boxed_error`] - boxed error trait objects (`Box<dyn Error>` and
//!   `Box<dyn Error + Send + Sync>`)
//! - `anyhow1` - the `anyhow` 1.x library (requires the `compat-anyhow1`
//!   feature flag)
//! - `eyre06` - the `eyre` 0.6.x library (requires the `compat-eyre06`
//!   feature flag)
//!
//! Each integration implements [`IntoErrorDetails`] for the library's error
//! type and for `Result`s carrying it.
//!
//! # Example
//!
//! ```
//! use errorfmt::compat::IntoErrorDetails;
//!
//! # #[cfg(feature = "compat-anyhow1")] {
//! fn load_article() -> anyhow::Result<String> {
//!     anyhow::bail!("article 42 does not exist");
//! }
//!
//! let details = load_article().into_error_details().unwrap_err();
//! assert_eq!(details.message(), "article 42 does not exist");
//! # }
//! ```

#[cfg(feature = "compat-anyhow1")]
#[cfg_attr(docsrs, doc(cfg(feature = "compat-anyhow1")))]
pub mod anyhow1;
pub mod boxed_error;
#[cfg(feature = "compat-eyre06")]
#[cfg_attr(docsrs, doc(cfg(feature = "compat-eyre06")))]
pub mod eyre06;

/// Converts a foreign error, or a `Result` carrying one, into
/// [`ErrorDetails`](crate::ErrorDetails).
pub trait IntoErrorDetails {
    /// [`ErrorDetails`](crate::ErrorDetails) for error types,
    /// `Result<T, ErrorDetails>` for results.
    type Output;

    /// Performs the conversion.
    fn into_error_details(self) -> Self::Output;
}
