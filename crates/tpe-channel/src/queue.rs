// SPDX-License-Identifier: Apache-2.0

//! Bounded, single-producer/single-consumer async queue.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use crate::error::QueueError;

struct Inner<T> {
    capacity: usize,
    buffer: VecDeque<T>,
    closed: bool,
    pull_waiting: bool,
    pull_waker: Option<Waker>,
    push_waker: Option<Waker>,
}

/// A bounded queue with capacity `C`.
///
/// `push` back-pressures the caller once `C` values are buffered; `force_push`
/// never does, which is what lets a window close itself from the inside
/// without deadlocking against a full queue. Cloning shares the same
/// underlying buffer: one clone is meant to be the producer, the other the
/// consumer.
pub struct BoundedQueue<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for BoundedQueue<T> {
    fn clone(&self) -> Self {
        BoundedQueue {
            inner: self.inner.clone(),
        }
    }
}

impl<T> BoundedQueue<T> {
    /// Creates a new queue with the given capacity. A capacity of zero still
    /// accepts values (they count as "over capacity" immediately), matching
    /// the contract that `push` never drops a value.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        BoundedQueue {
            inner: Rc::new(RefCell::new(Inner {
                capacity,
                buffer: VecDeque::new(),
                closed: false,
                pull_waiting: false,
                pull_waker: None,
                push_waker: None,
            })),
        }
    }

    /// Enqueues `value`. Returns a future that resolves immediately if the
    /// queue is under capacity, or once the consumer has pulled enough values
    /// to free a slot. The value is enqueued synchronously either way: the
    /// caller must honour the returned future before issuing another `push`,
    /// but the value itself is never lost.
    pub fn push(&self, value: T) -> PushFuture<T> {
        let over_capacity = self.enqueue(value);
        PushFuture {
            queue: self.clone(),
            pending: over_capacity,
        }
    }

    /// Enqueues `value` unconditionally, ignoring capacity. Used for EOF
    /// sentinels and window-closing drains that must never block.
    pub fn force_push(&self, value: T) {
        let _over_capacity = self.enqueue(value);
    }

    /// Returns a future that resolves to the next value, or [`QueueError::Closed`]
    /// if the queue is closed with nothing buffered.
    ///
    /// # Panics
    ///
    /// Panics if a pull is already outstanding: at most one pull may be in
    /// flight at a time.
    pub fn pull(&self) -> PullFuture<T> {
        {
            let mut inner = self.inner.borrow_mut();
            assert!(
                !inner.pull_waiting,
                "BoundedQueue::pull called while a pull was already pending"
            );
            inner.pull_waiting = true;
        }
        PullFuture { queue: self.clone() }
    }

    /// Marks the queue closed. Any pending pull resolves to
    /// [`QueueError::Closed`] once the buffer is drained; further closes are a
    /// no-op.
    pub fn close(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.closed = true;
        if let Some(waker) = inner.pull_waker.take() {
            waker.wake();
        }
    }

    /// Number of values currently buffered (for tests and diagnostics).
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().buffer.len()
    }

    /// Returns `true` if nothing is buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Enqueues a value and reports whether the buffer is now at or above
    /// capacity (the condition under which `push` must back-pressure).
    fn enqueue(&self, value: T) -> bool {
        let mut inner = self.inner.borrow_mut();
        inner.buffer.push_back(value);
        if let Some(waker) = inner.pull_waker.take() {
            waker.wake();
        }
        inner.buffer.len() >= inner.capacity.max(1)
    }
}

/// Future returned by [`BoundedQueue::push`].
pub struct PushFuture<T> {
    queue: BoundedQueue<T>,
    pending: bool,
}

impl<T> Unpin for PushFuture<T> {}

impl<T> Future for PushFuture<T> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if !self.pending {
            return Poll::Ready(());
        }
        let mut inner = self.queue.inner.borrow_mut();
        if inner.buffer.len() < inner.capacity.max(1) {
            self.pending = false;
            Poll::Ready(())
        } else {
            inner.push_waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

/// Future returned by [`BoundedQueue::pull`].
pub struct PullFuture<T> {
    queue: BoundedQueue<T>,
}

impl<T> Unpin for PullFuture<T> {}

impl<T> Future for PullFuture<T> {
    type Output = Result<T, QueueError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<T, QueueError>> {
        let mut inner = self.queue.inner.borrow_mut();
        if let Some(value) = inner.buffer.pop_front() {
            inner.pull_waiting = false;
            if inner.buffer.len() + 1 == inner.capacity.max(1) {
                if let Some(waker) = inner.push_waker.take() {
                    waker.wake();
                }
            }
            Poll::Ready(Ok(value))
        } else if inner.closed {
            inner.pull_waiting = false;
            Poll::Ready(Err(QueueError::Closed))
        } else {
            inner.pull_waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_rt() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    #[test]
    fn push_under_capacity_resolves_immediately() {
        let local = tokio::task::LocalSet::new();
        local.block_on(&local_rt(), async {
            let q: BoundedQueue<u32> = BoundedQueue::new(2);
            q.push(1).await;
            q.push(2).await;
            assert_eq!(q.len(), 2);
        });
    }

    #[test]
    fn push_over_capacity_blocks_until_pulled() {
        let local = tokio::task::LocalSet::new();
        local.block_on(&local_rt(), async {
            let q: BoundedQueue<u32> = BoundedQueue::new(1);
            q.push(1).await;

            let q2 = q.clone();
            let blocked = tokio::task::spawn_local(async move {
                q2.push(2).await;
            });

            tokio::task::yield_now().await;
            assert!(!blocked.is_finished());

            assert_eq!(q.pull().await.unwrap(), 1);
            blocked.await.unwrap();
            assert_eq!(q.pull().await.unwrap(), 2);
        });
    }

    #[test]
    fn force_push_never_blocks_even_over_capacity() {
        let local = tokio::task::LocalSet::new();
        local.block_on(&local_rt(), async {
            let q: BoundedQueue<u32> = BoundedQueue::new(1);
            q.force_push(1);
            q.force_push(2);
            q.force_push(3);
            assert_eq!(q.pull().await.unwrap(), 1);
            assert_eq!(q.pull().await.unwrap(), 2);
            assert_eq!(q.pull().await.unwrap(), 3);
        });
    }

    #[test]
    fn pull_on_empty_closed_queue_errors() {
        let local = tokio::task::LocalSet::new();
        local.block_on(&local_rt(), async {
            let q: BoundedQueue<u32> = BoundedQueue::new(1);
            q.close();
            assert_eq!(q.pull().await, Err(QueueError::Closed));
        });
    }

    #[test]
    fn pull_waiting_is_delivered_as_soon_as_a_value_arrives() {
        let local = tokio::task::LocalSet::new();
        local.block_on(&local_rt(), async {
            let q: BoundedQueue<u32> = BoundedQueue::new(4);
            let q2 = q.clone();
            let puller = tokio::task::spawn_local(async move { q2.pull().await });

            tokio::task::yield_now().await;
            q.force_push(42);

            assert_eq!(puller.await.unwrap().unwrap(), 42);
        });
    }

    #[test]
    #[should_panic(expected = "pull called while a pull was already pending")]
    fn double_pull_panics() {
        let q: BoundedQueue<u32> = BoundedQueue::new(1);
        let _first = q.pull();
        let _second = q.pull();
    }

    #[test]
    fn fifo_order_is_preserved() {
        let local = tokio::task::LocalSet::new();
        local.block_on(&local_rt(), async {
            let q: BoundedQueue<u32> = BoundedQueue::new(8);
            for v in 0..8 {
                q.push(v).await;
            }
            for v in 0..8 {
                assert_eq!(q.pull().await.unwrap(), v);
            }
        });
    }
}
