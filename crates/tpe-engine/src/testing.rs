// SPDX-License-Identifier: Apache-2.0

//! Concrete [`InnerPipeline`] implementations used across this repository's
//! test suites. Not part of the production API.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::EngineError;
use crate::pipeline::{BatchSink, BatchSource, InnerPipeline, InnerPipelineFactory};

/// Forwards every batch from source to sink, unchanged, until EOF.
pub struct IdentityPipeline;

#[async_trait(?Send)]
impl InnerPipeline for IdentityPipeline {
    async fn run(
        self: Box<Self>,
        mut source: Box<dyn BatchSource>,
        mut sink: Option<Box<dyn BatchSink>>,
    ) -> Result<(), EngineError> {
        loop {
            let batch = source.next_batch().await?;
            if batch.is_eof() {
                return Ok(());
            }
            if let Some(sink) = sink.as_mut() {
                sink.accept(batch).await?;
            }
        }
    }
}

/// Factory that always hands out a fresh [`IdentityPipeline`].
#[derive(Default, Clone, Copy)]
pub struct IdentityPipelineFactory;

impl InnerPipelineFactory for IdentityPipelineFactory {
    fn start(&self) -> Result<Box<dyn InnerPipeline>, EngineError> {
        Ok(Box::new(IdentityPipeline))
    }
}

/// Behaves like [`IdentityPipeline`], but sleeps for `delay` before pulling
/// its first batch. Used to test rotation racing a slow-starting instance.
pub struct SleepThenEmitPipeline {
    pub delay: Duration,
}

#[async_trait(?Send)]
impl InnerPipeline for SleepThenEmitPipeline {
    async fn run(
        self: Box<Self>,
        mut source: Box<dyn BatchSource>,
        mut sink: Option<Box<dyn BatchSink>>,
    ) -> Result<(), EngineError> {
        tokio::time::sleep(self.delay).await;
        loop {
            let batch = source.next_batch().await?;
            if batch.is_eof() {
                return Ok(());
            }
            if let Some(sink) = sink.as_mut() {
                sink.accept(batch).await?;
            }
        }
    }
}

/// Factory for [`SleepThenEmitPipeline`].
#[derive(Clone, Copy)]
pub struct SleepThenEmitPipelineFactory {
    pub delay: Duration,
}

impl InnerPipelineFactory for SleepThenEmitPipelineFactory {
    fn start(&self) -> Result<Box<dyn InnerPipeline>, EngineError> {
        Ok(Box::new(SleepThenEmitPipeline { delay: self.delay }))
    }
}

/// Factory that always refuses to start, simulating a pipeline that fails
/// validation or setup before any data flows.
#[derive(Default, Clone, Copy)]
pub struct ErrorOnStartFactory;

impl InnerPipelineFactory for ErrorOnStartFactory {
    fn start(&self) -> Result<Box<dyn InnerPipeline>, EngineError> {
        Err(EngineError::StartFailed("pipeline construction failed".to_owned()))
    }
}

/// A pipeline instance that starts successfully but fails the moment it
/// runs, simulating a runtime failure mid-flight.
pub struct ErrorDuringRunPipeline;

#[async_trait(?Send)]
impl InnerPipeline for ErrorDuringRunPipeline {
    async fn run(
        self: Box<Self>,
        _source: Box<dyn BatchSource>,
        _sink: Option<Box<dyn BatchSink>>,
    ) -> Result<(), EngineError> {
        Err(EngineError::RuntimeFailed("inner pipeline crashed".to_owned()))
    }
}

/// Factory for [`ErrorDuringRunPipeline`].
#[derive(Default, Clone, Copy)]
pub struct ErrorDuringRunFactory;

impl InnerPipelineFactory for ErrorDuringRunFactory {
    fn start(&self) -> Result<Box<dyn InnerPipeline>, EngineError> {
        Ok(Box::new(ErrorDuringRunPipeline))
    }
}
