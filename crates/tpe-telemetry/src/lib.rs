// SPDX-License-Identifier: Apache-2.0

//! Diagnostic and metrics sinks.
//!
//! These are the engine-facing collaborators operators report to. They are
//! deliberately thin traits here: the real sinks (console printers, OTLP
//! exporters, etc.) live outside this pipeline's core and are out of scope
//! for this crate.

pub mod diagnostic;
pub mod metrics;

pub use diagnostic::{Diagnostic, DiagnosticSeverity, DiagnosticSink};
pub use metrics::{MetricId, MetricsSink, OperatorIndex};
