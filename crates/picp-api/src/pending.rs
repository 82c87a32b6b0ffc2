// Pending requests and cancellation
//
// Every dispatch allocates one `CallState`, shared between the spawned
// exchange task (through `Settlement`) and the caller (through
// `PendingRequest` / `CancelHandle`). The state moves out of PENDING exactly
// once: either the task settles it when the transport answers, or the
// caller cancels it. Whoever loses the race is a no-op.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{Error, TransportError};

const PENDING: u8 = 0;
const SETTLED: u8 = 1;
const CANCELLED: u8 = 2;

#[derive(Debug)]
struct CallState {
    state: AtomicU8,
    token: CancellationToken,
}

impl CallState {
    fn new(initial: u8) -> Self {
        Self {
            state: AtomicU8::new(initial),
            token: CancellationToken::new(),
        }
    }

    /// Leave PENDING for `to`. Returns `false` if the call already left it.
    fn leave_pending(&self, to: u8) -> bool {
        self.state
            .compare_exchange(PENDING, to, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn get(&self) -> u8 {
        self.state.load(Ordering::Acquire)
    }
}

/// Zero-argument action that aborts one in-flight request.
///
/// Cloneable and idempotent. Cancelling after the request settled does
/// nothing and leaves the delivered outcome untouched.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    call: Arc<CallState>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        if self.call.leave_pending(CANCELLED) {
            debug!("request cancelled by caller");
            self.call.token.cancel();
        }
    }

    /// `true` once [`cancel`](Self::cancel) won the race against the response.
    pub fn is_cancelled(&self) -> bool {
        self.call.get() == CANCELLED
    }

    /// `true` once the request is no longer waiting on the appliance.
    pub fn is_settled(&self) -> bool {
        self.call.get() != PENDING
    }
}

/// The value returned by every dispatch.
///
/// Awaiting it yields the unwrapped payload or a classified [`Error`]; a
/// request cancelled through [`cancel`](Self::cancel) (or any clone of its
/// [`CancelHandle`]) yields [`Error::Cancelled`] even if the appliance answers
/// later. Dropping it without cancelling detaches the request: the exchange
/// still completes and its outcome is discarded.
#[must_use = "a PendingRequest does nothing observable unless awaited or cancelled"]
#[derive(Debug)]
pub struct PendingRequest<T> {
    rx: oneshot::Receiver<Result<T, Error>>,
    handle: CancelHandle,
}

impl<T> PendingRequest<T> {
    /// A fresh pending request and the task-side half that settles it.
    pub(crate) fn new() -> (Self, Settlement<T>) {
        let (tx, rx) = oneshot::channel();
        let call = Arc::new(CallState::new(PENDING));
        let pending = Self {
            rx,
            handle: CancelHandle {
                call: Arc::clone(&call),
            },
        };
        (pending, Settlement { call, tx })
    }

    /// A request rejected before any exchange was issued.
    pub(crate) fn rejected(err: Error) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(Err(err));
        Self {
            rx,
            handle: CancelHandle {
                call: Arc::new(CallState::new(SETTLED)),
            },
        }
    }

    pub fn cancel(&self) {
        self.handle.cancel();
    }

    /// A handle that can cancel this request from elsewhere (another task,
    /// a signal handler, a UI callback).
    pub fn canceller(&self) -> CancelHandle {
        self.handle.clone()
    }

    pub fn is_settled(&self) -> bool {
        self.handle.is_settled()
    }
}

impl<T> Future for PendingRequest<T> {
    type Output = Result<T, Error>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if this.handle.is_cancelled() {
            return Poll::Ready(Err(Error::Cancelled));
        }

        match Pin::new(&mut this.rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_closed)) => Poll::Ready(Err(if this.handle.is_cancelled() {
                Error::Cancelled
            } else {
                Error::Network(TransportError::Unreachable(
                    "request task ended before the exchange settled".into(),
                ))
            })),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Task-side half of a pending request.
pub(crate) struct Settlement<T> {
    call: Arc<CallState>,
    tx: oneshot::Sender<Result<T, Error>>,
}

impl<T> Settlement<T> {
    pub(crate) fn token(&self) -> CancellationToken {
        self.call.token.clone()
    }

    /// Claim the request for a transport response. `false` means the caller
    /// already cancelled and the response must be discarded.
    pub(crate) fn settle(&self) -> bool {
        self.call.leave_pending(SETTLED)
    }

    pub(crate) fn deliver(self, outcome: Result<T, Error>) {
        // The caller may have dropped its PendingRequest; nothing to notify.
        let _ = self.tx.send(outcome);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn settled_outcome_is_delivered() {
        let (pending, settlement) = PendingRequest::<u32>::new();
        assert!(!pending.is_settled());
        assert!(settlement.settle());
        settlement.deliver(Ok(7));
        assert_eq!(pending.await.unwrap(), 7);
    }

    #[test]
    fn stays_pending_until_delivery_wakes_it() {
        let (pending, settlement) = PendingRequest::<u32>::new();
        let mut task = tokio_test::task::spawn(pending);
        tokio_test::assert_pending!(task.poll());

        assert!(settlement.settle());
        settlement.deliver(Ok(3));
        assert!(task.is_woken());
        assert_eq!(tokio_test::assert_ready!(task.poll()).unwrap(), 3);
    }

    #[tokio::test]
    async fn cancel_before_settle_wins() {
        let (pending, settlement) = PendingRequest::<u32>::new();
        let handle = pending.canceller();
        handle.cancel();
        assert!(handle.is_cancelled());
        assert!(settlement.token().is_cancelled());
        assert!(!settlement.settle(), "late response must be discarded");
        settlement.deliver(Ok(7));
        assert!(pending.await.unwrap_err().is_cancelled());
    }

    #[tokio::test]
    async fn cancel_after_settle_is_noop() {
        let (pending, settlement) = PendingRequest::<u32>::new();
        assert!(settlement.settle());
        pending.cancel();
        pending.cancel();
        assert!(!pending.canceller().is_cancelled());
        assert!(!settlement.token().is_cancelled());
        settlement.deliver(Ok(1));
        assert_eq!(pending.await.unwrap(), 1);
    }

    #[tokio::test]
    async fn cancel_resolves_without_waiting_for_task() {
        let (pending, settlement) = PendingRequest::<u32>::new();
        pending.cancel();
        // Task never delivers; the pending value still resolves.
        let err = pending.await.unwrap_err();
        assert!(err.is_cancelled());
        drop(settlement);
    }

    #[tokio::test]
    async fn dropped_task_without_outcome_is_network_error() {
        let (pending, settlement) = PendingRequest::<u32>::new();
        drop(settlement);
        let err = pending.await.unwrap_err();
        assert!(matches!(err, Error::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn rejected_is_already_settled() {
        let pending = PendingRequest::<u32>::rejected(Error::InvalidRequest("nope".into()));
        assert!(pending.is_settled());
        pending.cancel();
        assert!(matches!(pending.await, Err(Error::InvalidRequest(_))));
    }
}
