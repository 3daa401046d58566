// SPDX-License-Identifier: Apache-2.0

//! Traits at the boundary between an operator and the (out of scope) generic
//! pipeline executor that runs one inner pipeline instance.

use async_trait::async_trait;
use tpe_pdata::Batch;

use crate::error::EngineError;

/// Produces one pipeline instance's input, one batch at a time.
///
/// A zero-row batch ends the stream; callers must not call `next_batch`
/// again afterward.
#[async_trait(?Send)]
pub trait BatchSource {
    /// Returns the next batch, or the EOF sentinel.
    async fn next_batch(&mut self) -> Result<Batch, EngineError>;
}

/// Accepts one pipeline instance's output.
///
/// Zero-row batches are never passed to `accept`: they are intermediate
/// suspension markers internal to the generic executor, not data.
#[async_trait(?Send)]
pub trait BatchSink {
    /// Accepts one non-empty output batch.
    async fn accept(&mut self, batch: Batch) -> Result<(), EngineError>;
}

/// A runnable instance of the inner pipeline, already wired to a window's
/// source and (when the pipeline does not already terminate in its own
/// sink) its sink.
#[async_trait(?Send)]
pub trait InnerPipeline {
    /// Drives this instance to completion: pulls from `source` until EOF,
    /// forwarding whatever output the pipeline produces to `sink`.
    async fn run(
        self: Box<Self>,
        source: Box<dyn BatchSource>,
        sink: Option<Box<dyn BatchSink>>,
    ) -> Result<(), EngineError>;
}

/// Builds fresh [`InnerPipeline`] instances, one per window.
///
/// This stands in for the already-validated pipeline literal the surface
/// language hands the operator; its own execution semantics are out of
/// scope here; only the instantiation boundary matters to the operator.
pub trait InnerPipelineFactory: 'static {
    /// Instantiates a new pipeline instance for a window.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::StartFailed`] if the pipeline refuses to
    /// start; this is fatal to whatever is driving the window operator.
    fn start(&self) -> Result<Box<dyn InnerPipeline>, EngineError>;

    /// `true` if this pipeline already terminates in its own sink, so no
    /// `SNK` adapter should be appended and no output should be expected
    /// from it.
    fn has_terminal_sink(&self) -> bool {
        false
    }
}
