// SPDX-License-Identifier: Apache-2.0

//! Errors for the bounded queue.

use std::fmt;

/// Errors produced by [`crate::queue::BoundedQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// The queue's owner was dropped while a caller was awaiting a pull.
    Closed,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::Closed => write!(f, "queue closed while a pull was pending"),
        }
    }
}

impl std::error::Error for QueueError {}
