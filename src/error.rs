//! Unified error type for the with-filter library.
//!
//! Filtered views never fail on their own: errors raised by caller-supplied
//! callbacks reach the caller untouched (see the `try_*` terminals). This
//! type covers the surrounding layers, expression parsing and configuration.

use thiserror::Error;

#[cfg(feature = "config")]
use crate::config::ConfigError;
use crate::expr::ExprError;

/// Unified error type for all with-filter operations.
///
/// # Example
///
/// ```ignore
/// use with_filter::{Pipeline, Result};
///
/// fn build() -> Result<Pipeline> {
///     Ok(Pipeline::parse(&["gt:0"], "reduce:sum")?)
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Error parsing a filter, map, reduce or terminal expression.
    #[error(transparent)]
    Expr(#[from] ExprError),

    /// Error loading a configuration file.
    #[cfg(feature = "config")]
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A [`Result`] type alias using the unified [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns `true` if this is an expression parsing error.
    pub fn is_expr(&self) -> bool {
        matches!(self, Self::Expr(_))
    }

    /// Returns `true` if this is a configuration error.
    #[cfg(feature = "config")]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns `true` if this is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
