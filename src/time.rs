//! Time abstraction for testability.
//!
//! This module provides a [`Clock`] trait so the hosts file header can be
//! stamped with a controlled time in tests while production uses the
//! local wall clock.

use chrono::{DateTime, FixedOffset, Local};

/// Abstraction over wall-clock time.
///
/// The returned value carries its UTC offset so it can be rendered
/// as an RFC 3339 timestamp without further context.
///
/// # Example
///
/// ```
/// use headscale2hosts::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// assert!(now.timestamp() > 0);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Production clock using the local time zone of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}
