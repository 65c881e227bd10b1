//! Crate-private logging macros.
//!
//! With the `logging` feature these forward to `tracing`; without it they
//! expand to nothing, so the library never pulls in a subscriber.
//!
//! ```rust,ignore
//! use crate::logging::{debug, info};
//!
//! info!(path = %path.display(), "blog store opened");
//! debug!(id = %id, "getting blog");
//! ```

#[cfg(feature = "logging")]
macro_rules! log_trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "logging")]
macro_rules! log_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_info {
    ($($arg:tt)*) => {};
}

/// Rejected input and other handled surprises.
#[cfg(feature = "logging")]
macro_rules! log_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

/// Failures that are about to propagate as errors.
#[cfg(feature = "logging")]
macro_rules! log_error {
    ($($arg:tt)*) => { tracing::error!($($arg)*) }
}

#[cfg(not(feature = "logging"))]
macro_rules! log_error {
    ($($arg:tt)*) => {};
}

#[allow(unused_imports)]
pub(crate) use log_debug as debug;
#[allow(unused_imports)]
pub(crate) use log_error as error;
#[allow(unused_imports)]
pub(crate) use log_info as info;
#[allow(unused_imports)]
pub(crate) use log_trace as trace;
#[allow(unused_imports)]
pub(crate) use log_warn as warn;
