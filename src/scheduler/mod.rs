// src/scheduler/mod.rs
use std::collections::VecDeque;

/// Identifies one outstanding "next frame" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// The host's animation primitive: fire a callback roughly once per display
/// refresh. Cadence is up to the host.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running { pending: Option<FrameHandle> },
}

impl LoopState {
    pub fn is_running(&self) -> bool {
        matches!(self, LoopState::Running { .. })
    }

    /// Idle -> Running, arming exactly one frame request. No-op when
    /// already running.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let LoopState::Idle = self {
            *self = LoopState::Running {
                pending: Some(scheduler.request_frame()),
            };
        }
    }

    /// Running -> Idle, cancelling the pending request if there is one.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let LoopState::Running { pending } = *self {
            if let Some(handle) = pending {
                scheduler.cancel_frame(handle);
            }
            *self = LoopState::Idle;
        }
    }

    /// Consumes the pending request when `handle` is the one we armed.
    /// Returns false for stale or unexpected frames, which must be ignored.
    pub fn begin_frame(&mut self, handle: FrameHandle) -> bool {
        match self {
            LoopState::Running { pending } if *pending == Some(handle) => {
                *pending = None;
                true
            }
            _ => false,
        }
    }

    /// Re-arms the next frame, only while still running.
    pub fn rearm(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let LoopState::Running { pending } = self {
            if pending.is_none() {
                *pending = Some(scheduler.request_frame());
            }
        }
    }
}

/// A scheduler whose frames fire only when the owner pops them. Drives the
/// headless host and tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    queue: VecDeque<FrameHandle>,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the oldest outstanding request, as the host would when the
    /// display refreshes.
    pub fn next_frame(&mut self) -> Option<FrameHandle> {
        self.queue.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.queue.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.queue.len();
        self.queue.retain(|queued| *queued != handle);
        if self.queue.len() != before {
            self.cancelled += 1;
        }
    }
}
