//! Formatters: the strategies that turn an error into a string.
//!
//! A [`Formatter`] is either one of the three built-in serializers or a
//! [`Custom`](Formatter::Custom) strategy implementing [`ErrorFormatter`].
//!
//! # Examples
//!
//! ```
//! use async_trait::async_trait;
//! use errorfmt::{
//!     FormatParams,
//!     error::FormatterError,
//!     formatter::{ErrorFormatter, Formatter},
//! };
//!
//! struct PlainText;
//!
//! #[async_trait]
//! impl ErrorFormatter for PlainText {
//!     async fn format(&self, params: &FormatParams) -> Result<String, FormatterError> {
//!         Ok(params.error.message().to_owned())
//!     }
//! }
//!
//! let formatter = Formatter::custom(PlainText);
//! assert_eq!(formatter.name(), "custom");
//! ```

use core::{fmt, panic::Location};

use async_trait::async_trait;
use triomphe::Arc;
use unsize::CoerceUnsize;

use crate::{builtin, error::FormatterError, params::FormatParams};

/// A user-supplied serialization strategy.
///
/// Formatting is asynchronous so implementations may look things up (for
/// example localized messages) before producing output. The built-in
/// formatters complete without suspending.
#[async_trait]
pub trait ErrorFormatter: 'static + Send + Sync {
    /// Serializes `params.error`.
    async fn format(&self, params: &FormatParams) -> Result<String, FormatterError>;
}

/// An [`ErrorFormatter`] backed by a synchronous function.
///
/// Created by [`from_fn`].
#[derive(Copy, Clone)]
pub struct FnFormatter<F>(F);

/// Wraps a synchronous function as an [`ErrorFormatter`].
///
/// ```
/// use errorfmt::formatter::{Formatter, from_fn};
///
/// let csv = Formatter::custom(from_fn(|params| {
///     Ok(format!("error,{}", params.error.message()))
/// }));
/// ```
pub fn from_fn<F>(function: F) -> FnFormatter<F>
where
    F: Fn(&FormatParams) -> Result<String, FormatterError> + Send + Sync + 'static,
{
    FnFormatter(function)
}

#[async_trait]
impl<F> ErrorFormatter for FnFormatter<F>
where
    F: Fn(&FormatParams) -> Result<String, FormatterError> + Send + Sync + 'static,
{
    async fn format(&self, params: &FormatParams) -> Result<String, FormatterError> {
        (self.0)(params)
    }
}

/// A formatter that can be stored in the registry.
///
/// Cloning is cheap. Two formatters compare equal when they are the same
/// built-in, or clones of the same custom formatter.
#[derive(Clone, PartialEq)]
pub enum Formatter {
    /// See [`builtin::json`].
    Json,
    /// See [`builtin::html`].
    Html,
    /// See [`builtin::xml`].
    Xml,
    /// A user-supplied strategy.
    Custom(CustomFormatter),
}

impl Formatter {
    /// Wraps a strategy, recording where it was created.
    #[track_caller]
    pub fn custom<H>(formatter: H) -> Self
    where
        H: ErrorFormatter,
    {
        let inner: Arc<H> = Arc::new(formatter);
        Formatter::Custom(CustomFormatter {
            inner: inner.unsize(unsize::Coercion!(to dyn ErrorFormatter)),
            type_name: core::any::type_name::<H>(),
            added_at: Location::caller(),
        })
    }

    /// Runs the formatter.
    pub async fn format(&self, params: &FormatParams) -> Result<String, FormatterError> {
        match self {
            Formatter::Json => builtin::json(params),
            Formatter::Html => builtin::html(params),
            Formatter::Xml => builtin::xml(params),
            Formatter::Custom(custom) => custom.inner.format(params).await,
        }
    }

    /// A short name for the kind of formatter: `json`, `html`, `xml` or
    /// `custom`.
    pub fn name(&self) -> &'static str {
        match self {
            Formatter::Json => "json",
            Formatter::Html => "html",
            Formatter::Xml => "xml",
            Formatter::Custom(_) => "custom",
        }
    }

    /// Returns `true` for the three built-in serializers.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Formatter::Custom(_))
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formatter::Json => f.write_str("Json"),
            Formatter::Html => f.write_str("Html"),
            Formatter::Xml => f.write_str("Xml"),
            Formatter::Custom(custom) => f.debug_tuple("Custom").field(custom).finish(),
        }
    }
}

impl fmt::Display for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formatter::Custom(custom) => fmt::Display::fmt(custom, f),
            builtin => write!(f, "built-in {} formatter", builtin.name()),
        }
    }
}

/// A user-supplied strategy held by [`Formatter::Custom`].
#[derive(Clone)]
pub struct CustomFormatter {
    inner: Arc<dyn ErrorFormatter>,
    type_name: &'static str,
    added_at: &'static Location<'static>,
}

impl CustomFormatter {
    /// The type name of the wrapped strategy.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Where [`Formatter::custom`] was called.
    pub fn location(&self) -> &'static Location<'static> {
        self.added_at
    }
}

impl PartialEq for CustomFormatter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for CustomFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomFormatter")
            .field("type_name", &self.type_name)
            .field("added_at", &self.added_at)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for CustomFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "custom formatter {} created at {}:{}",
            self.type_name,
            self.added_at.file(),
            self.added_at.line()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_details::ErrorDetails;

    static_assertions::assert_impl_all!(Formatter: Send, Sync, Clone);

    struct Shout;

    #[async_trait]
    impl ErrorFormatter for Shout {
        async fn format(&self, params: &FormatParams) -> Result<String, FormatterError> {
            Ok(params.error.message().to_uppercase())
        }
    }

    #[tokio::test]
    async fn test_custom_runs_strategy() {
        let params = FormatParams::new("text/plain", ErrorDetails::new("quiet"));
        let formatter = Formatter::custom(Shout);
        assert_eq!(formatter.format(&params).await.unwrap(), "QUIET");
        assert!(!formatter.is_builtin());
    }

    #[tokio::test]
    async fn test_from_fn_propagates_errors() {
        let params = FormatParams::new("text/plain", ErrorDetails::new("x"));
        let formatter = Formatter::custom(from_fn(|_| Err(FormatterError::msg("refused"))));
        let error = formatter.format(&params).await.unwrap_err();
        assert_eq!(error.to_string(), "refused");
    }

    #[test]
    fn test_equality_is_identity_for_custom() {
        let a = Formatter::custom(Shout);
        let b = Formatter::custom(Shout);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
        assert_eq!(Formatter::Json, Formatter::Json);
        assert_ne!(Formatter::Json, Formatter::Xml);
    }

    #[test]
    fn test_display_names_location() {
        let formatter = Formatter::custom(Shout);
        let Formatter::Custom(custom) = &formatter else {
            unreachable!()
        };
        assert!(custom.type_name().ends_with("Shout"));
        assert_eq!(custom.location().file(), file!());
        let shown = formatter.to_string();
        assert!(shown.starts_with("custom formatter "), "{shown}");
        assert!(shown.contains(file!()), "{shown}");
        assert_eq!(Formatter::Html.to_string(), "built-in html formatter");
    }
}
