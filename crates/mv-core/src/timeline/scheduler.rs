//! Cancellable "call me on the next display refresh" requests

use std::fmt;
use std::sync::Arc;
use parking_lot::Mutex;

/// Identifies one scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Host-side scheduler for the playback loop.
///
/// The coordinator requests one callback at a time and re-requests from inside
/// each tick. Pausing cancels the outstanding handle.
pub trait FrameScheduler: Send + Sync {
    /// Ask for one callback on the next display refresh
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a pending request. Handles that already fired are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

type Waker = Box<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct SchedulerState {
    next_id: u64,
    pending: Vec<FrameHandle>,
    waker: Option<Waker>,
}

/// Scheduler whose due callbacks are drained by the host loop.
///
/// Clones share the same queue, so the host keeps one clone for draining while
/// the coordinator owns another.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<SchedulerState>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called whenever a frame is requested, e.g. to ask the UI for a repaint
    pub fn set_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.inner.lock().waker = Some(Box::new(waker));
    }

    /// Remove and return every handle that is due
    pub fn take_due(&self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.inner.lock().pending)
    }

    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending.len()
    }

    pub fn has_pending(&self) -> bool {
        self.pending_count() > 0
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let mut state = self.inner.lock();
        state.next_id += 1;
        let handle = FrameHandle(state.next_id);
        state.pending.push(handle);
        if let Some(waker) = &state.waker {
            waker();
        }
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.inner.lock().pending.retain(|h| *h != handle);
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("ManualScheduler")
            .field("next_id", &state.next_id)
            .field("pending", &state.pending)
            .finish()
    }
}
