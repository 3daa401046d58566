// SPDX-License-Identifier: Apache-2.0

//! `PRE`/`POST`: the two operators the window operator expands into inside
//! the outer pipeline, bracketing the coordinator so neither the outer
//! pipeline nor the coordinator has to own the other.

use async_trait::async_trait;
use tpe_engine::{BatchSink, BatchSource, EngineError};
use tpe_pdata::Batch;
use uuid::Uuid;

use crate::coordinator::Coordinator;
use crate::registry::WindowRegistry;

/// Where POST prefers to run. Mirrors the requirement its inner pipeline
/// places on its own operators; carrying no remote requirement of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Remote,
    Unconstrained,
}

/// Derives POST's preferred placement from whether any operator of the
/// inner pipeline requires a remote location.
#[must_use]
pub fn post_placement(inner_requires_remote: bool) -> Placement {
    if inner_requires_remote {
        Placement::Remote
    } else {
        Placement::Unconstrained
    }
}

/// Installed first. Forwards every inbound outer batch into the
/// coordinator, suspending for its acknowledgement each time, and pushes a
/// zero-row batch once its own input ends — this is the only place the
/// window operator's back-pressure toward its upstream is enforced.
pub struct Pre {
    handoff_key: Uuid,
    coordinator: Option<Coordinator>,
    source: Box<dyn BatchSource>,
}

impl Pre {
    #[must_use]
    pub fn new(handoff_key: Uuid, source: Box<dyn BatchSource>) -> Self {
        Pre { handoff_key, coordinator: None, source }
    }

    /// Resolves the coordinator registered by POST on first use. The
    /// hand-off happens exactly once: after this, the registry entry is
    /// gone.
    fn coordinator(&mut self) -> Coordinator {
        if self.coordinator.is_none() {
            self.coordinator = Some(WindowRegistry.get(self.handoff_key));
        }
        self.coordinator.clone().expect("just resolved above")
    }

    /// Drives the whole outer input stream into the coordinator, ending
    /// with EOF. Consumes `self`, mirroring [`tpe_engine::InnerPipeline`]'s
    /// run-to-completion shape.
    pub async fn run(mut self: Box<Self>) -> Result<(), EngineError> {
        loop {
            let batch = self.source.next_batch().await?;
            let is_eof = batch.is_eof();
            let coordinator = self.coordinator();
            coordinator.push_outer(batch).await.map_err(|err| EngineError::RuntimeFailed(err.to_string()))?;
            if is_eof {
                return Ok(());
            }
        }
    }
}

/// Installed last. Pulls whatever the coordinator accumulates across every
/// window's inner pipeline instance and forwards it downstream, stopping at
/// the final EOF sentinel without forwarding it: downstream's own stream
/// end is signalled by this operator returning, the same convention
/// [`tpe_engine::BatchSink::accept`] relies on for its callers.
pub struct Post {
    coordinator: Coordinator,
    sink: Box<dyn BatchSink>,
}

impl Post {
    /// Constructs the coordinator, registers it under `handoff_key` for PRE
    /// to resolve, and returns the POST half wired to `sink`.
    #[must_use]
    pub fn new(handoff_key: Uuid, coordinator: Coordinator, sink: Box<dyn BatchSink>) -> Self {
        WindowRegistry.put(handoff_key, coordinator.clone());
        Post { coordinator, sink }
    }

    pub async fn run(mut self: Box<Self>) -> Result<(), EngineError> {
        loop {
            let batch = self.coordinator.pull_outer().await.map_err(|err| EngineError::RuntimeFailed(err.to_string()))?;
            if batch.is_eof() {
                return Ok(());
            }
            self.sink.accept(batch).await?;
        }
    }
}

/// Appended by the operator factory in place of POST's own output when the
/// inner pipeline already terminates in a sink: POST then emits nothing,
/// and this keeps the outer pipeline well-typed without introducing a real
/// consumer.
pub struct Discard;

#[async_trait(?Send)]
impl BatchSink for Discard {
    async fn accept(&mut self, _batch: Batch) -> Result<(), EngineError> {
        Ok(())
    }
}
