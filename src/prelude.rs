//! Commonly used items for convenient importing.
//!
//! ```rust
//! use errorfmt::prelude::*;
//!
//! let formatters = ErrorFormatters::new();
//! formatters.register(
//!     "text/plain",
//!     Formatter::custom(from_fn(|params: &FormatParams| Ok(params.error.to_string()))),
//! );
//! ```

pub use crate::{
    ErrorDetails, ErrorFormatters, FormatParams, FormattedError, Formatter,
    compat::IntoErrorDetails,
    formatter::{ErrorFormatter, from_fn},
};
