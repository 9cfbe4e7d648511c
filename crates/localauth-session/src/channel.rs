// SPDX-FileCopyrightText: 2026 Localauth Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-shot result channel around one provider evaluation.
//!
//! The provider's completion callback writes into a one-shot result cell.
//! The cell settles at most once: the first of fulfilment, subscriber
//! cancellation, or owner teardown wins, and only fulfilment delivers.
//! The callback holds a weak reference to its owning session and drops the
//! result if the session is gone by the time the provider replies.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};
use std::task::{Context, Poll};

use localauth_core::{
    EvaluationPolicy, EvaluationReply, SessionError, SessionResult, VerificationContext,
};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Process-unique channel identifier, used in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(u64);

impl ChannelId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ch-{}", self.0)
    }
}

/// Liveness marker owned by a session. Channels only ever see it weakly.
#[derive(Debug, Default)]
pub(crate) struct Liveness;

/// Why a completion did not produce a terminal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Undelivered {
    /// The owning session was destroyed before the provider replied.
    TeardownDropped,
    /// The cell had already been fulfilled or discarded.
    AlreadySettled,
    /// The receiving half disappeared between settling and sending.
    SubscriberGone,
}

const PENDING: u8 = 0;
const FULFILLED: u8 = 1;
const DISCARDED: u8 = 2;

struct ResultCell {
    state: AtomicU8,
    sender: Mutex<Option<oneshot::Sender<SessionResult>>>,
}

impl ResultCell {
    fn new(sender: oneshot::Sender<SessionResult>) -> Self {
        Self {
            state: AtomicU8::new(PENDING),
            sender: Mutex::new(Some(sender)),
        }
    }

    /// Moves the cell out of `PENDING`. Only the first caller gets the sender.
    fn settle(&self, next: u8) -> Option<oneshot::Sender<SessionResult>> {
        self.state
            .compare_exchange(PENDING, next, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    fn fulfill(&self, result: SessionResult) -> Result<(), Undelivered> {
        let sender = self.settle(FULFILLED).ok_or(Undelivered::AlreadySettled)?;
        sender.send(result).map_err(|_| Undelivered::SubscriberGone)
    }

    /// Settles without delivering. Dropping the sender wakes the receiver with no value.
    fn discard(&self) -> bool {
        self.settle(DISCARDED).is_some()
    }

    fn is_settled(&self) -> bool {
        self.state.load(Ordering::Acquire) != PENDING
    }
}

enum ChannelState {
    Ready(Option<SessionResult>),
    Waiting {
        receiver: oneshot::Receiver<SessionResult>,
        cell: Arc<ResultCell>,
    },
    Finished,
}

/// The asynchronous result of one `authenticate` call.
///
/// Awaiting the channel yields `Some` with the single terminal value, or
/// `None` if no value will ever arrive: the subscriber cancelled, the owning
/// session was torn down first, or the provider abandoned its reply.
/// Dropping the channel unsubscribes.
pub struct SessionChannel {
    id: ChannelId,
    state: ChannelState,
}

impl SessionChannel {
    /// A channel that has already failed, without any provider involvement.
    pub(crate) fn failed(error: SessionError) -> Self {
        Self {
            id: ChannelId::next(),
            state: ChannelState::Ready(Some(Err(error))),
        }
    }

    /// Starts `policy` on `context` and wires its reply into a new channel.
    pub(crate) fn evaluate(
        context: &dyn VerificationContext,
        policy: EvaluationPolicy,
        reason: &str,
        owner: Weak<Liveness>,
    ) -> Self {
        let id = ChannelId::next();
        let (sender, receiver) = oneshot::channel();
        let cell = Arc::new(ResultCell::new(sender));

        let reply_cell = Arc::clone(&cell);
        let reply: EvaluationReply = Box::new(move |outcome| {
            // The owner stays alive until delivery has finished.
            let delivered = match owner.upgrade() {
                Some(_alive) => reply_cell.fulfill(outcome.map_err(SessionError::External)),
                None => {
                    reply_cell.discard();
                    Err(Undelivered::TeardownDropped)
                }
            };
            match delivered {
                Ok(()) => debug!(channel = %id, %policy, "verification result delivered"),
                Err(why) => {
                    debug!(channel = %id, %policy, reason = ?why, "verification result not delivered");
                }
            }
        });

        debug!(channel = %id, %policy, "starting evaluation");
        context.evaluate(policy, reason, reply);

        Self {
            id,
            state: ChannelState::Waiting { receiver, cell },
        }
    }

    pub fn id(&self) -> ChannelId {
        self.id
    }

    /// Whether the terminal outcome (value or non-delivery) is already decided.
    pub fn is_settled(&self) -> bool {
        match &self.state {
            ChannelState::Ready(_) | ChannelState::Finished => true,
            ChannelState::Waiting { cell, .. } => cell.is_settled(),
        }
    }

    /// Unsubscribes. A later provider reply is dropped.
    pub fn cancel(self) {
        drop(self);
    }

    /// Waits for the terminal value unless `token` is cancelled first.
    pub async fn until_cancelled(self, token: &CancellationToken) -> Option<SessionResult> {
        let id = self.id;
        tokio::select! {
            biased;
            () = token.cancelled() => {
                debug!(channel = %id, "subscription cancelled");
                None
            }
            result = self => result,
        }
    }
}

impl Future for SessionChannel {
    type Output = Option<SessionResult>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let polled = match &mut this.state {
            ChannelState::Ready(result) => Poll::Ready(result.take()),
            ChannelState::Waiting { receiver, .. } => match Pin::new(receiver).poll(cx) {
                Poll::Ready(received) => Poll::Ready(received.ok()),
                Poll::Pending => Poll::Pending,
            },
            ChannelState::Finished => Poll::Ready(None),
        };
        if polled.is_ready() {
            this.state = ChannelState::Finished;
        }
        polled
    }
}

impl Drop for SessionChannel {
    fn drop(&mut self) {
        if let ChannelState::Waiting { cell, .. } = &self.state {
            if cell.discard() {
                debug!(channel = %self.id, "unsubscribed before completion");
            }
        }
    }
}

impl fmt::Debug for SessionChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionChannel")
            .field("id", &self.id)
            .field("settled", &self.is_settled())
            .finish()
    }
}
