use core::fmt;

use super::{ActiveTable, DefaultTable, ErrorFormatters};
use crate::{
    formatter::Formatter,
    mime::{APPLICATION_JSON, APPLICATION_XML, IntoMimeKey, TEXT_HTML, TEXT_JSON, TEXT_XML},
};

/// Builder for an [`ErrorFormatters`] registry.
///
/// Starts from the built-in defaults. Use
/// [`default_formatter`](Self::default_formatter) to add or replace defaults,
/// which [`ErrorFormatters::unregister`] restores, and
/// [`formatter`](Self::formatter) for plain registrations.
///
/// Any string is accepted as a MIME key. Entries whose key is a
/// loosely-typed value that is not a string are skipped with a warning.
///
/// # Examples
///
/// ```
/// use errorfmt::{ErrorFormatters, formatter::{Formatter, from_fn}};
///
/// let text = Formatter::custom(from_fn(|p| Ok(p.error.message().to_owned())));
///
/// let formatters = ErrorFormatters::builder()
///     .default_formatter("text/plain", text.clone())
///     .formatter("application/problem+json", Formatter::Json)
///     .build();
///
/// assert!(formatters.is_default_mime("text/plain"));
/// assert!(formatters.unregister("text/plain"));
/// assert_eq!(formatters.get("text/plain"), Some(text));
/// ```
pub struct ErrorFormattersBuilder {
    defaults: DefaultTable,
    registrations: Vec<(String, Formatter)>,
}

impl Default for ErrorFormattersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorFormattersBuilder {
    /// Creates a builder holding the built-in JSON, HTML and XML defaults.
    pub fn new() -> Self {
        let defaults = [
            (APPLICATION_JSON, Formatter::Json),
            (TEXT_JSON, Formatter::Json),
            (TEXT_HTML, Formatter::Html),
            (APPLICATION_XML, Formatter::Xml),
            (TEXT_XML, Formatter::Xml),
        ]
        .into_iter()
        .map(|(mime, formatter)| (mime.to_owned(), formatter))
        .collect();

        Self {
            defaults,
            registrations: Vec::new(),
        }
    }

    /// Adds a default formatter for `mime`, replacing any existing default.
    #[must_use]
    pub fn default_formatter(mut self, mime: impl IntoMimeKey, formatter: Formatter) -> Self {
        match mime.into_mime_key() {
            Some(mime) => {
                self.defaults.insert(mime, formatter);
            }
            None => tracing::warn!("skipping default error formatter with a non-string MIME key"),
        }
        self
    }

    /// Registers `formatter` for `mime` once the registry is built.
    ///
    /// Registrations are applied in order on top of the defaults.
    #[must_use]
    pub fn formatter(mut self, mime: impl IntoMimeKey, formatter: Formatter) -> Self {
        match mime.into_mime_key() {
            Some(mime) => self.registrations.push((mime, formatter)),
            None => tracing::warn!("skipping error formatter with a non-string MIME key"),
        }
        self
    }

    /// Builds the registry.
    pub fn build(self) -> ErrorFormatters {
        let mut active: ActiveTable = self
            .defaults
            .iter()
            .map(|(mime, formatter)| (mime.clone(), formatter.clone()))
            .collect();
        active.extend(self.registrations);

        tracing::debug!(
            defaults = self.defaults.len(),
            registered = active.len(),
            "built error formatter registry"
        );
        ErrorFormatters::from_tables(self.defaults, active)
    }
}

impl fmt::Debug for ErrorFormattersBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorFormattersBuilder")
            .field("defaults", &self.defaults)
            .field("registrations", &self.registrations)
            .finish()
    }
}
