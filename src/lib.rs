//! Lazy, chainable filtering over slices.
//!
//! A [`FilteredView`] wraps a borrowed slice and one composed predicate.
//! Chaining [`FilteredView::with_filter`] composes predicates with
//! short-circuit AND semantics and evaluates nothing; the terminal operations
//! ([`map`](FilteredView::map), [`reduce`](FilteredView::reduce),
//! [`for_each`](FilteredView::for_each)) walk the slice once, testing each
//! element exactly once against the composed predicate. No intermediate
//! filtered collection is ever built.
//!
//! # Quick Start
//!
//! ```
//! use with_filter::with_filter;
//!
//! let values = [1, -2, 3, 4, i32::MAX];
//! let negated = with_filter(&values, |x| *x > 0)
//!     .with_filter(|x| *x < i32::MAX)
//!     .map(|x| -x);
//! assert_eq!(negated, vec![-1, -3, -4]);
//! ```
//!
//! # Modules
//!
//! - [`predicate`] - The [`Predicate`] trait and its combinators
//! - [`ext`] - Opt-in `.with_filter()` method on slices
//! - [`expr`] - Textual filter/map/reduce expressions over `f64`
//! - [`pipeline`] - Runtime-built pipelines of expressions
//! - [`config`] - TOML pipeline configuration (requires `config` feature)
//!
//! # Feature Flags
//!
//! - `config` - Enable TOML configuration (enabled by default)
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `cli` - Enable the command-line interface binary
//! - `full` - Enable all features

mod logging;

#[cfg(feature = "config")]
pub mod config;
pub mod expr;
pub mod ext;
pub mod pipeline;
pub mod predicate;
pub mod prelude;
#[cfg(feature = "cli")]
pub mod subscriber;
mod view;

mod error;

// Re-export the unified error type
pub use error::{Error, Result};

pub use predicate::{Always, And, Predicate};
pub use view::{DynFilteredView, FilteredView};

pub use expr::{ExprError, FilterExpr, MapExpr, ReduceExpr, Terminal};
pub use pipeline::{Outcome, Pipeline, Reduced};

#[cfg(feature = "config")]
pub use config::{Config, ConfigError, LogFormat, LoggingConfig};

/// Create a view over `items` filtered by `predicate`.
///
/// Nothing is evaluated until a terminal operation runs.
pub fn with_filter<T, P>(items: &[T], predicate: P) -> FilteredView<'_, T, P>
where
    P: Fn(&T) -> bool,
{
    FilteredView::new(items, predicate)
}

/// Curried form of [`with_filter`]: bind the slice now, the predicate later.
///
/// `with_filter_curried(items)(p)` behaves exactly like
/// `with_filter(items, p)`.
///
/// ```
/// use with_filter::with_filter_curried;
///
/// let words = ["apple", "", "pear"];
/// let non_empty = with_filter_curried(&words);
/// assert_eq!(non_empty(|w: &&str| !w.is_empty()).count(), 2);
/// ```
pub fn with_filter_curried<'a, T, P>(items: &'a [T]) -> impl Fn(P) -> FilteredView<'a, T, P>
where
    P: Fn(&T) -> bool,
{
    move |predicate| FilteredView::new(items, predicate)
}

/// A view over `items` that accepts every element.
pub fn unfiltered<T>(items: &[T]) -> FilteredView<'_, T, Always> {
    FilteredView::new(items, Always)
}
