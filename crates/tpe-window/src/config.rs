// SPDX-License-Identifier: Apache-2.0

//! Normalizes the operator's surface-level arguments into a validated
//! [`WindowConfig`], the way the surrounding dataflow language hands every
//! operator an already-checked configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// `window_size` after normalization: either a finite row budget or
/// unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSize {
    Rows(usize),
    Unbounded,
}

impl WindowSize {
    #[must_use]
    pub fn as_rows(self) -> Option<usize> {
        match self {
            WindowSize::Rows(n) => Some(n),
            WindowSize::Unbounded => None,
        }
    }
}

/// The surface-level arguments before validation, as the dataflow language's
/// parser would hand them to this operator's factory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowArgs {
    pub window_size: Option<usize>,
    #[serde(default, with = "humantime_serde::option")]
    pub timeout: Option<Duration>,
    #[serde(default, with = "humantime_serde::option")]
    pub idle_timeout: Option<Duration>,
    pub parallel: Option<usize>,
    #[serde(default)]
    pub nonblocking: bool,
}

/// Validated, normalized operator configuration. Every field here has
/// already passed the checks in [`WindowConfig::resolve`].
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub window_size: WindowSize,
    pub period: Option<Duration>,
    pub idle: Option<Duration>,
    pub parallel: usize,
    pub nonblocking: bool,
}

/// Base capacity for a window's input queue, shared with the outer input
/// queue's capacity. Headroom for in-flight rotations is added on top of
/// this per `parallel`, per the coordinator's queue-sizing rule.
pub const MAX_QUEUED: usize = 10;

impl WindowConfig {
    /// Validates `args`, collecting every violation rather than
    /// short-circuiting on the first one, so a single bad configuration
    /// reports all of its problems at once.
    pub fn resolve(args: &WindowArgs, has_terminal_sink: bool, inner_output_is_batches_or_void: bool) -> Result<Self, ConfigError> {
        let mut violations = Vec::new();

        if let Some(size) = args.window_size {
            if size == 0 {
                violations.push("window_size must be at least 1".to_owned());
            }
        }

        if let Some(timeout) = args.timeout {
            if timeout.is_zero() {
                violations.push("timeout must be greater than zero".to_owned());
            }
        }

        if let Some(idle_timeout) = args.idle_timeout {
            if idle_timeout.is_zero() {
                violations.push("idle_timeout must be greater than zero".to_owned());
            }
        }

        if let (Some(timeout), Some(idle_timeout)) = (args.timeout, args.idle_timeout) {
            if !timeout.is_zero() && !idle_timeout.is_zero() && timeout <= idle_timeout {
                violations.push("timeout must be greater than idle_timeout when both are set".to_owned());
            }
        }

        if let Some(parallel) = args.parallel {
            if parallel == 0 {
                violations.push("parallel must be at least 1".to_owned());
            }
        }

        if args.window_size.is_none() && args.timeout.is_none() && args.idle_timeout.is_none() {
            violations.push("at least one of window_size, timeout, or idle_timeout must be set".to_owned());
        }

        if !inner_output_is_batches_or_void {
            violations.push("the inner pipeline's output type must be batches-or-void".to_owned());
        }
        let _ = has_terminal_sink;

        if !violations.is_empty() {
            return Err(ConfigError::Invalid(violations));
        }

        Ok(WindowConfig {
            window_size: match args.window_size {
                Some(n) => WindowSize::Rows(n),
                None => WindowSize::Unbounded,
            },
            period: args.timeout,
            idle: args.idle_timeout,
            parallel: args.parallel.unwrap_or(1),
            nonblocking: args.nonblocking,
        })
    }

    /// Capacity of a window's input queue: base headroom plus one slot per
    /// additional level of parallelism, so a rotation in flight never
    /// deadlocks against a full queue while a sibling window is still live.
    #[must_use]
    pub fn window_input_capacity(&self) -> usize {
        MAX_QUEUED + self.parallel - 1
    }

    /// Capacity of the outer input queue and the shared outputs queue.
    #[must_use]
    pub fn outer_queue_capacity(&self) -> usize {
        MAX_QUEUED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_args() -> WindowArgs {
        WindowArgs {
            window_size: Some(10),
            timeout: None,
            idle_timeout: None,
            parallel: Some(1),
            nonblocking: false,
        }
    }

    #[test]
    fn accepts_minimal_valid_config() {
        let config = WindowConfig::resolve(&valid_args(), false, true).unwrap();
        assert_eq!(config.window_size.as_rows(), Some(10));
        assert_eq!(config.parallel, 1);
    }

    #[test]
    fn rejects_zero_window_size() {
        let mut args = valid_args();
        args.window_size = Some(0);
        let err = WindowConfig::resolve(&args, false, true).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(v) if v.iter().any(|m| m.contains("window_size"))));
    }

    #[test]
    fn rejects_nothing_set() {
        let args = WindowArgs {
            window_size: None,
            timeout: None,
            idle_timeout: None,
            parallel: None,
            nonblocking: false,
        };
        let err = WindowConfig::resolve(&args, false, true).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(v) if v.iter().any(|m| m.contains("at least one"))));
    }

    #[test]
    fn rejects_timeout_not_greater_than_idle_timeout() {
        let mut args = valid_args();
        args.timeout = Some(Duration::from_millis(10));
        args.idle_timeout = Some(Duration::from_millis(10));
        let err = WindowConfig::resolve(&args, false, true).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(v) if v.iter().any(|m| m.contains("idle_timeout"))));
    }

    #[test]
    fn accumulates_multiple_violations() {
        let args = WindowArgs {
            window_size: Some(0),
            timeout: None,
            idle_timeout: None,
            parallel: Some(0),
            nonblocking: false,
        };
        let err = WindowConfig::resolve(&args, false, true).unwrap_err();
        match err {
            ConfigError::Invalid(v) => assert_eq!(v.len(), 2),
        }
    }

    #[test]
    fn rejects_non_batch_inner_output() {
        let err = WindowConfig::resolve(&valid_args(), false, false).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(v) if v.iter().any(|m| m.contains("batches-or-void"))));
    }
}
