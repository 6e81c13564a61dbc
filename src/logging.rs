//! Conditional logging macros for library-level tracing.
//!
//! When the `logging` feature is enabled, these macros forward to tracing.
//! When disabled, they compile to no-ops and their arguments are never
//! evaluated, so predicates are not touched by log statements either way.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::logging::{debug, trace};
//!
//! trace!(len = items.len(), "map over filtered view");
//! debug!(filters = 3, "composed pipeline view");
//! ```

/// Emit a trace-level log (per-traversal details).
#[cfg(feature = "logging")]
macro_rules! log_trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

/// Emit a debug-level log (pipeline construction and outcomes).
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Emit an info-level log (configuration lifecycle events).
#[cfg(all(feature = "config", feature = "logging"))]
macro_rules! log_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) }
}

#[cfg(all(feature = "config", not(feature = "logging")))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

/// Emit a warn-level log (suspicious but accepted input).
#[cfg(feature = "logging")]
macro_rules! log_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) }
}

pub(crate) use log_debug as debug;
#[cfg(feature = "config")]
pub(crate) use log_info as info;
pub(crate) use log_trace as trace;
#[cfg(feature = "logging")]
pub(crate) use log_warn as warn;
