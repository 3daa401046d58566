// SPDX-License-Identifier: Apache-2.0

//! `SRC`/`SNK`: the two operators injected into every inner pipeline
//! instance so it can be driven purely through the coordinator's queues.

use async_trait::async_trait;
use tpe_engine::{BatchSink, BatchSource, EngineError};
use tpe_pdata::Batch;

use crate::coordinator::Coordinator;
use crate::window::WindowId;

/// Prepended to every inner pipeline instance. Produces its input by
/// pulling from the coordinator on this window's behalf; a zero-row batch
/// ends the stream.
pub struct Src {
    coordinator: Coordinator,
    window_id: WindowId,
}

impl Src {
    #[must_use]
    pub fn new(coordinator: Coordinator, window_id: WindowId) -> Self {
        Src { coordinator, window_id }
    }
}

#[async_trait(?Send)]
impl BatchSource for Src {
    async fn next_batch(&mut self) -> Result<Batch, EngineError> {
        self.coordinator
            .pull_inner(self.window_id)
            .await
            .map_err(|_| EngineError::ChannelClosed)
    }
}

/// Appended to an inner pipeline instance that does not already terminate
/// in its own sink. Forwards each output batch back to the coordinator's
/// shared outputs queue; zero-row batches are suspension markers internal
/// to the generic executor and are never forwarded.
pub struct Snk {
    coordinator: Coordinator,
    window_id: WindowId,
}

impl Snk {
    #[must_use]
    pub fn new(coordinator: Coordinator, window_id: WindowId) -> Self {
        Snk { coordinator, window_id }
    }
}

#[async_trait(?Send)]
impl BatchSink for Snk {
    async fn accept(&mut self, batch: Batch) -> Result<(), EngineError> {
        if batch.is_eof() {
            return Ok(());
        }
        self.coordinator
            .push_inner(self.window_id, batch)
            .await
            .map_err(|_| EngineError::ChannelClosed)
    }
}
