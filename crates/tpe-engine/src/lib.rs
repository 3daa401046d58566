// SPDX-License-Identifier: Apache-2.0

//! Minimal inner-pipeline execution traits.
//!
//! The generic pipeline executor, operator DAG, and node wiring are external
//! collaborators out of scope for this crate: what remains here is just the
//! boundary a window operator needs in order to instantiate and drive one
//! pipeline instance per window.

pub mod error;
pub mod pipeline;
pub mod testing;

pub use error::EngineError;
pub use pipeline::{BatchSink, BatchSource, InnerPipeline, InnerPipelineFactory};
