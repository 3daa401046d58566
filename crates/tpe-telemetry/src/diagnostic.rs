// SPDX-License-Identifier: Apache-2.0

//! Diagnostics emitted by operators and forwarded upstream to the user.

use std::borrow::Cow;
use std::fmt;

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    /// Informational note; does not indicate a problem.
    Info,
    /// A recoverable condition worth surfacing to the user.
    Warning,
    /// An error. Emitting one does not by itself terminate the pipeline;
    /// only the operator deciding the condition is fatal does that.
    Error,
}

/// A single diagnostic message, attributable to the operator that raised it.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity of this diagnostic.
    pub severity: DiagnosticSeverity,
    /// Name of the operator that raised this diagnostic (e.g. `"window"`).
    pub operator: Cow<'static, str>,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Builds an error-severity diagnostic.
    #[must_use]
    pub fn error(operator: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Diagnostic {
            severity: DiagnosticSeverity::Error,
            operator: operator.into(),
            message: message.into(),
        }
    }

    /// Builds an internal-error diagnostic, tagging the operator that caught
    /// an unexpected panic or invariant violation.
    #[must_use]
    pub fn internal_error(operator: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Diagnostic::error(operator, format!("internal error: {}", message.into()))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.operator, severity_label(self.severity), self.message)
    }
}

fn severity_label(severity: DiagnosticSeverity) -> &'static str {
    match severity {
        DiagnosticSeverity::Info => "info",
        DiagnosticSeverity::Warning => "warning",
        DiagnosticSeverity::Error => "error",
    }
}

/// Receives diagnostics forwarded verbatim from operators, including nested
/// pipeline instances.
pub trait DiagnosticSink: 'static {
    /// Records one diagnostic. Implementations must not block.
    fn emit(&self, diagnostic: Diagnostic);
}

/// A [`DiagnosticSink`] that logs every diagnostic through `tracing` at a
/// level matching its severity. Useful as a default when no dedicated sink
/// is wired up.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnosticSink;

impl DiagnosticSink for TracingDiagnosticSink {
    fn emit(&self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            DiagnosticSeverity::Info => tracing::info!(operator = %diagnostic.operator, "{}", diagnostic.message),
            DiagnosticSeverity::Warning => tracing::warn!(operator = %diagnostic.operator, "{}", diagnostic.message),
            DiagnosticSeverity::Error => tracing::error!(operator = %diagnostic.operator, "{}", diagnostic.message),
        }
    }
}
