// SPDX-License-Identifier: Apache-2.0

//! A single-producer/single-consumer bounded async queue.
//!
//! This is the primitive the window coordinator uses to back-pressure both
//! the outer pipeline and every live window's inner pipeline instance. It is
//! deliberately small: one buffer, at most one outstanding pull, at most one
//! outstanding push waiting on capacity.

pub mod error;
pub mod queue;

pub use error::QueueError;
pub use queue::BoundedQueue;
