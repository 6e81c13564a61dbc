//! Convenient re-exports for common usage patterns.
//!
//! Importing the prelude also brings [`WithFilterExt`] into scope, which adds
//! `.with_filter()` to slices and `Vec`s.
//!
//! # Example
//!
//! ```
//! use with_filter::prelude::*;
//!
//! let total = vec![1, 2, 3, 4].with_filter(|x| x % 2 == 0).reduce(|acc: i32, x| acc + x, 0);
//! assert_eq!(total, 6);
//! ```

// Unified error handling
pub use crate::error::{Error, Result};

// Views and predicates
pub use crate::ext::WithFilterExt;
pub use crate::predicate::{Always, And, Predicate};
pub use crate::view::{DynFilteredView, FilteredView};
pub use crate::{unfiltered, with_filter, with_filter_curried};

// Expressions and pipelines
pub use crate::expr::{ExprError, FilterExpr, MapExpr, ReduceExpr, Terminal};
pub use crate::pipeline::{Outcome, Pipeline, Reduced};

// Configuration (requires "config" feature)
#[cfg(feature = "config")]
pub use crate::config::{Config, ConfigError};
