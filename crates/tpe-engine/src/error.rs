// SPDX-License-Identifier: Apache-2.0

//! Errors surfaced by inner pipeline instances.

/// Errors an [`crate::InnerPipelineFactory`] or [`crate::InnerPipeline`] can
/// raise. Both kinds are fatal to whatever is driving the pipeline: a start
/// failure aborts before any data flows, a runtime failure aborts mid-flight.
#[derive(thiserror::Error, Debug, Clone)]
pub enum EngineError {
    /// The inner pipeline refused to start.
    #[error("inner pipeline failed to start: {0}")]
    StartFailed(String),

    /// The inner pipeline failed after it had already started running.
    #[error("inner pipeline failed at runtime: {0}")]
    RuntimeFailed(String),

    /// A channel used to adapt the pipeline's input or output was closed
    /// from the other end.
    #[error("the adapter channel was closed")]
    ChannelClosed,
}
