#![deny(
    missing_docs,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A pluggable registry that serializes application errors by MIME type.
//!
//! ## Overview
//!
//! When a request fails, the response body should describe the error in the
//! format the client asked for. This crate keeps a table from MIME type to
//! formatter, seeded with JSON, HTML and XML serializers, and picks the right
//! one for each error. Unknown MIME types fall back to `text/html`.
//!
//! ## Quick Example
//!
//! ```
//! use errorfmt::{ErrorDetails, ErrorFormatters, FormatParams};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let formatters = ErrorFormatters::new();
//!
//! let error = ErrorDetails::new("article not found").with_code(404);
//! let formatted = formatters
//!     .format_for_mime(FormatParams::new("application/json", error))
//!     .await
//!     .unwrap();
//!
//! assert_eq!(formatted.mime, "application/json");
//! assert_eq!(
//!     formatted.content,
//!     r#"{"code":404,"message":"article not found","stack":"Error: article not found"}"#
//! );
//! # });
//! ```
//!
//! ## Core Concepts
//!
//! - **[`ErrorDetails`]** is what gets rendered: an optional code, a message
//!   and a stack. Build it from any [`core::error::Error`] with
//!   [`ErrorDetails::from_error`], or from `anyhow`/`eyre` errors through
//!   [`compat`].
//! - **[`Formatter`]** is one serialization strategy: one of the built-ins,
//!   or a custom [`ErrorFormatter`](formatter::ErrorFormatter).
//! - **[`ErrorFormatters`]** is the registry. It is an ordinary value: build
//!   one at startup and share it with your handlers.
//!
//! ## Custom Formatters
//!
//! ```
//! use errorfmt::{
//!     ErrorDetails, ErrorFormatters, FormatParams,
//!     formatter::{Formatter, from_fn},
//! };
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let formatters = ErrorFormatters::new();
//! formatters.register(
//!     "text/plain",
//!     Formatter::custom(from_fn(|params| Ok(params.error.message().to_owned()))),
//! );
//!
//! let formatted = formatters
//!     .format_for_mime(FormatParams::new("text/plain", ErrorDetails::new("gone")))
//!     .await
//!     .unwrap();
//! assert_eq!(formatted.content, "gone");
//! # });
//! ```
//!
//! ## Feature Flags
//!
//! - `backtrace`: `ErrorDetails::capture` records the current call stack.
//! - `compat-anyhow1`, `compat-eyre06`: conversions from those libraries.
//!
//! ## Logging
//!
//! The registry emits [`tracing`] events: `debug` for registrations and
//! formatter failures, `trace` for fallbacks. Install a subscriber to see
//! them.

pub mod builtin;
pub mod compat;
pub mod error;
mod error_details;
pub mod formatter;
pub mod mime;
mod params;
pub mod prelude;
mod registry;
#[cfg(feature = "backtrace")]
#[cfg_attr(docsrs, doc(cfg(feature = "backtrace")))]
pub mod stack;

pub use async_trait::async_trait;

pub use self::{
    error::{ArgumentError, FormatError, FormatterError},
    error_details::{ErrorCode, ErrorDetails},
    formatter::Formatter,
    params::{FormatParams, IntoFormatParams, Localization, RequestContext},
    registry::{ErrorFormatters, ErrorFormattersBuilder, FormattedError},
};
