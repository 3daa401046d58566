// SPDX-License-Identifier: Apache-2.0

//! Error kinds raised by the window operator, at construction and at
//! runtime.

use miette::Diagnostic;
use thiserror::Error;

/// Raised by [`crate::config::WindowConfig::resolve`]. Carries every
/// violation found, not just the first, so the user sees the whole picture
/// in one diagnostic pass.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("invalid window operator configuration: {}", .0.join("; "))]
    #[diagnostic(code(window::config::invalid), url(docsrs))]
    Invalid(Vec<String>),
}

/// Fatal errors that terminate a running coordinator. Anything reaching here
/// ends the operator deterministically: live windows are torn down and
/// timers disposed before the error propagates to the outer pipeline.
#[derive(Debug, Error, Clone)]
pub enum CoordinatorError {
    /// The inner pipeline refused to start a window.
    #[error("window {window_id} failed to start: {source}")]
    Start {
        window_id: u64,
        #[source]
        source: tpe_engine::EngineError,
    },

    /// The inner pipeline failed after a window was already running.
    #[error("window {window_id} failed at runtime: {source}")]
    Runtime {
        window_id: u64,
        #[source]
        source: tpe_engine::EngineError,
    },

    /// A request to the coordinator could not be served because it has
    /// already terminated.
    #[error("the window coordinator has terminated")]
    Terminated,

    /// An internal invariant was violated. Reaching this arm is itself a
    /// defect; it is still handled as a fatal, well-diagnosed error rather
    /// than a panic.
    #[error("internal invariant violated in window operator: {0}")]
    InternalInvariant(String),

    /// The operator was asked to shut down.
    #[error("window operator shutting down: {0}")]
    ShutdownRequested(String),
}
