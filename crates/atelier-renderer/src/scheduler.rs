//! Frame tick scheduling.
//!
//! A session asks for at most one tick at a time and remembers the handle.
//! The host calls [`FrameScheduler::take_due`] when the display is ready and
//! hands each due handle back to the session. Handles are unique across
//! the process, so a handle from a cancelled request or an earlier session
//! is simply stale.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use winit::window::Window;

static NEXT_TICK: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    fn mint() -> Self {
        TickHandle(NEXT_TICK.fetch_add(1, Ordering::Relaxed))
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

pub trait FrameScheduler {
    fn request_tick(&mut self) -> TickHandle;

    fn cancel_tick(&mut self, handle: TickHandle);

    /// Handles whose tick has arrived, oldest first.
    fn take_due(&mut self) -> Vec<TickHandle>;
}

/// Host-driven scheduler: requested ticks become due on [`Self::advance`].
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: VecDeque<TickHandle>,
    due: VecDeque<TickHandle>,
    requests: usize,
    cancels: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// One display refresh: everything requested so far becomes due.
    pub fn advance(&mut self) {
        self.due.extend(self.pending.drain(..));
    }

    pub fn pending(&self) -> usize {
        self.pending.len() + self.due.len()
    }

    pub fn requests(&self) -> usize {
        self.requests
    }

    pub fn cancels(&self) -> usize {
        self.cancels
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_tick(&mut self) -> TickHandle {
        let handle = TickHandle::mint();
        self.requests += 1;
        self.pending.push_back(handle);
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        self.cancels += 1;
        self.pending.retain(|h| *h != handle);
        self.due.retain(|h| *h != handle);
    }

    fn take_due(&mut self) -> Vec<TickHandle> {
        self.due.drain(..).collect()
    }
}

/// winit-backed scheduler: each request asks the window for a redraw, and
/// the app calls [`WindowScheduler::redraw_requested`] when
/// `RedrawRequested` arrives.
pub struct WindowScheduler {
    window: Arc<Window>,
    inner: ManualScheduler,
}

impl WindowScheduler {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            inner: ManualScheduler::new(),
        }
    }

    pub fn redraw_requested(&mut self) {
        self.inner.advance();
    }
}

impl FrameScheduler for WindowScheduler {
    fn request_tick(&mut self) -> TickHandle {
        let handle = self.inner.request_tick();
        self.window.request_redraw();
        handle
    }

    fn cancel_tick(&mut self, handle: TickHandle) {
        self.inner.cancel_tick(handle);
    }

    fn take_due(&mut self) -> Vec<TickHandle> {
        self.inner.take_due()
    }
}
