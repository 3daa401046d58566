// SPDX-License-Identifier: Apache-2.0

//! The windowed sub-pipeline operator.
//!
//! Splits the outer batch stream into bounded windows — by row count, wall
//! clock period, or idle gap — and drives a fresh instance of a configured
//! inner pipeline over each one. At operator-factory time it expands into
//! `PRE → POST` in the outer pipeline; see [`outer::Pre`] and
//! [`outer::Post`]. Everything in between is owned by a single
//! [`coordinator::Coordinator`].

pub mod adapter;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod outer;
pub mod registry;
pub mod window;

use std::rc::Rc;

use arrow_schema::SchemaRef;
use tpe_engine::{BatchSink, BatchSource, InnerPipelineFactory};
use tpe_telemetry::{DiagnosticSink, MetricsSink};

pub use config::{WindowArgs, WindowConfig, WindowSize};
pub use coordinator::Coordinator;
pub use error::{ConfigError, CoordinatorError};
pub use outer::{Discard, Placement, Post, Pre};
pub use window::WindowId;

/// Builds the `PRE`/`POST` pair for one instance of the window operator,
/// validating `args` first.
///
/// `inner_factory` produces a fresh inner pipeline instance per window;
/// `inner_output_is_batches_or_void` and `inner_requires_remote` describe
/// properties of that inner pipeline that only the surrounding dataflow
/// language can infer, so they are supplied rather than derived here.
/// `has_terminal_sink` mirrors [`InnerPipelineFactory::has_terminal_sink`]
/// and determines whether POST will ever produce output: when it is
/// `true`, callers should append a [`Discard`] after POST to keep the
/// outer pipeline well-typed, per [`Placement`]'s sibling note on `POST`.
pub struct WindowOperator;

impl WindowOperator {
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] with every violation found in
    /// `args`, if any.
    pub fn build(
        args: &WindowArgs,
        schema: SchemaRef,
        inner_factory: Rc<dyn InnerPipelineFactory>,
        inner_output_is_batches_or_void: bool,
        inner_requires_remote: bool,
        diagnostic_sink: Rc<dyn DiagnosticSink>,
        metrics_sink: Rc<dyn MetricsSink>,
        outer_source: Box<dyn BatchSource>,
        outer_sink: Box<dyn BatchSink>,
    ) -> Result<(Pre, Post, Placement), ConfigError> {
        let has_terminal_sink = inner_factory.has_terminal_sink();
        let config = WindowConfig::resolve(args, has_terminal_sink, inner_output_is_batches_or_void)?;

        let coordinator = Coordinator::new(schema, config, inner_factory, diagnostic_sink, metrics_sink);

        let handoff_key = registry::new_handoff_key();
        let pre = Pre::new(handoff_key, outer_source);
        let post = Post::new(handoff_key, coordinator, outer_sink);
        let placement = outer::post_placement(inner_requires_remote);

        Ok((pre, post, placement))
    }
}
