//! The MIME type to formatter registry.
//!
//! A registry has two tables. The **defaults** are fixed when the registry
//! is built. The **active** table starts as a copy of the defaults and is
//! what lookups consult; [`register`](ErrorFormatters::register) and
//! [`unregister`](ErrorFormatters::unregister) modify it.
//!
//! Unregistering a MIME type that has a default puts the default back, so
//! every default MIME type stays servable. In particular `text/html`, the
//! fallback for unknown MIME types, is always present.
//!
//! # Examples
//!
//! ```
//! use errorfmt::{ErrorDetails, ErrorFormatters, FormatParams};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let formatters = ErrorFormatters::new();
//! let error = ErrorDetails::new("article not found").with_code(404);
//!
//! let formatted = formatters
//!     .format_for_mime(FormatParams::new("text/xml", error))
//!     .await
//!     .unwrap();
//! assert_eq!(formatted.mime, "text/xml");
//! assert!(formatted.content.starts_with("<error><message>article not found"));
//! # });
//! ```

mod builder;
mod lock;

use core::fmt;

use hashbrown::HashMap;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::Serialize;

pub use self::builder::ErrorFormattersBuilder;
use self::lock::TableLock;
use crate::{
    error::FormatError,
    formatter::Formatter,
    mime::{DEFAULT_MIME, IntoMimeKey},
    params::IntoFormatParams,
};

type DefaultTable = IndexMap<String, Formatter, FxBuildHasher>;
type ActiveTable = HashMap<String, Formatter, FxBuildHasher>;

/// The result of a successful [`ErrorFormatters::format_for_mime`] call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormattedError {
    /// The MIME type whose formatter produced `content`. After a fallback
    /// this is `text/html`, not the MIME type that was asked for.
    pub mime: String,
    /// The serialized error.
    pub content: String,
}

impl FormattedError {
    /// A `Content-Type` header value for the content.
    pub fn content_type(&self) -> String {
        format!("{}; charset=utf-8", self.mime)
    }
}

/// A registry mapping MIME types to error formatters.
///
/// The registry is `Send + Sync`; share one instance between request
/// handlers through an `Arc`. Concurrent registrations for the same MIME type
/// are last-writer-wins.
pub struct ErrorFormatters {
    defaults: DefaultTable,
    active: TableLock<ActiveTable>,
}

impl Default for ErrorFormatters {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorFormatters {
    /// Creates a registry holding the built-in JSON, HTML and XML formatters.
    pub fn new() -> Self {
        ErrorFormattersBuilder::new().build()
    }

    /// Starts building a registry with extra defaults or registrations.
    pub fn builder() -> ErrorFormattersBuilder {
        ErrorFormattersBuilder::new()
    }

    fn from_tables(defaults: DefaultTable, active: ActiveTable) -> Self {
        Self {
            defaults,
            active: TableLock::new(active),
        }
    }

    /// Serializes an error for the requested MIME type.
    ///
    /// `params` is validated first; a malformed value fails with
    /// [`FormatError::Argument`] and no formatter runs. The formatter
    /// registered for `params.mime` is then looked up, falling back to the
    /// `text/html` formatter when there is none. The returned
    /// [`FormattedError::mime`] names the MIME type that was actually used.
    ///
    /// A formatter failure is returned as [`FormatError::Formatter`], carrying
    /// the resolved MIME type and the formatter's error unchanged.
    pub async fn format_for_mime(
        &self,
        params: impl IntoFormatParams,
    ) -> Result<FormattedError, FormatError> {
        let params = params.into_format_params()?;
        let (mime, formatter) = self.resolve(&params.mime);

        match formatter.format(&params).await {
            Ok(content) => Ok(FormattedError { mime, content }),
            Err(source) => {
                tracing::debug!(%mime, error = %source, "error formatter failed");
                Err(FormatError::Formatter { mime, source })
            }
        }
    }

    fn resolve(&self, requested: &str) -> (String, Formatter) {
        let active = self.active.read();
        if let Some(formatter) = active.get(requested) {
            return (requested.to_owned(), formatter.clone());
        }

        tracing::trace!(
            requested,
            fallback = DEFAULT_MIME,
            "no error formatter registered, using fallback"
        );
        // text/html is never removed from the active table
        let formatter = active
            .get(DEFAULT_MIME)
            .cloned()
            .unwrap_or(Formatter::Html);
        (DEFAULT_MIME.to_owned(), formatter)
    }

    /// Registers `formatter` for `mime`, replacing any existing entry.
    ///
    /// Any string is accepted as the key. Returns `false`, and changes
    /// nothing, when `mime` is a loosely-typed value that is not a string
    /// (see [`IntoMimeKey`]).
    ///
    /// ```
    /// use errorfmt::{ErrorFormatters, formatter::{Formatter, from_fn}};
    /// use serde_json::json;
    ///
    /// let formatters = ErrorFormatters::new();
    /// let csv = Formatter::custom(from_fn(|p| Ok(format!("error,{}", p.error.message()))));
    ///
    /// assert!(formatters.register("text/csv", csv.clone()));
    /// assert_eq!(formatters.get("text/csv"), Some(csv));
    /// assert!(!formatters.register(&json!(123), Formatter::Json));
    /// ```
    pub fn register(&self, mime: impl IntoMimeKey, formatter: Formatter) -> bool {
        let Some(mime) = mime.into_mime_key() else {
            tracing::debug!("refusing to register error formatter for a non-string MIME key");
            return false;
        };

        tracing::debug!(%mime, formatter = %formatter, "registering error formatter");
        self.active.write().insert(mime, formatter);
        true
    }

    /// Removes the formatter registered for `mime`.
    ///
    /// If `mime` has a default formatter, the default is restored instead of
    /// leaving the MIME type unregistered. Returns `false` when nothing was
    /// registered for `mime`.
    pub fn unregister(&self, mime: &str) -> bool {
        let mut active = self.active.write();
        if active.remove(mime).is_none() {
            return false;
        }

        if let Some(default) = self.defaults.get(mime) {
            tracing::debug!(mime, "restoring default error formatter");
            active.insert(mime.to_owned(), default.clone());
        } else {
            tracing::debug!(mime, "unregistered error formatter");
        }
        true
    }

    /// Returns the formatter currently registered for `mime`.
    pub fn get(&self, mime: &str) -> Option<Formatter> {
        self.active.read().get(mime).cloned()
    }

    /// Returns the default formatter for `mime`, ignoring registrations.
    pub fn default_formatter(&self, mime: &str) -> Option<&Formatter> {
        self.defaults.get(mime)
    }

    /// Returns `true` if `mime` has a default formatter.
    pub fn is_default_mime(&self, mime: &str) -> bool {
        self.defaults.contains_key(mime)
    }

    /// The MIME types that have default formatters, in the order they were
    /// added.
    pub fn default_mime_types(&self) -> impl Iterator<Item = &str> {
        self.defaults.keys().map(String::as_str)
    }

    /// The MIME types currently registered, sorted.
    pub fn mime_types(&self) -> Vec<String> {
        let mut mime_types: Vec<String> = self.active.read().keys().cloned().collect();
        mime_types.sort_unstable();
        mime_types
    }

    /// Drops every registration, leaving exactly the defaults.
    pub fn reset(&self) {
        let defaults: ActiveTable = self
            .defaults
            .iter()
            .map(|(mime, formatter)| (mime.clone(), formatter.clone()))
            .collect();
        *self.active.write() = defaults;
        tracing::debug!("reset error formatters to defaults");
    }

    /// Calls `f` once for each registered formatter, sorted by MIME type,
    /// with a description naming the MIME type and the formatter.
    ///
    /// # Warning
    ///
    /// The active table is locked for reading while `f` runs. Calling
    /// [`register`](Self::register), [`unregister`](Self::unregister) or
    /// [`reset`](Self::reset) from inside `f` deadlocks.
    ///
    /// ```
    /// use errorfmt::ErrorFormatters;
    ///
    /// ErrorFormatters::new().debug_formatters(|entry| {
    ///     println!("{entry}");
    /// });
    /// ```
    pub fn debug_formatters(&self, mut f: impl FnMut(&dyn fmt::Display)) {
        let active = self.active.read();
        let mut entries: Vec<(&String, &Formatter)> = active.iter().collect();
        entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        for (mime, formatter) in entries {
            f(&DebugEntry {
                mime,
                formatter,
                is_default: self.defaults.get(mime.as_str()) == Some(formatter),
            });
        }
    }
}

struct DebugEntry<'a> {
    mime: &'a str,
    formatter: &'a Formatter,
    is_default: bool,
}

impl fmt::Display for DebugEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.mime, self.formatter)?;
        if self.is_default {
            f.write_str(" (default)")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ErrorFormatters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let active = self.active.read();
        let mut entries: Vec<(&String, &Formatter)> = active.iter().collect();
        entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
        f.debug_struct("ErrorFormatters")
            .field("defaults", &self.defaults)
            .field("active", &entries)
            .finish()
    }
}
