//! Tracking of genuine user input.
//!
//! The surface mutates both when the user types and when the engine writes
//! corrections back through the model. Only the former should be reconciled,
//! so the host signals upcoming input with [`UserInputGate::mark_user_input`]
//! and the reconciler asks [`UserInputGate::consume_user_input`] once per
//! batch. The active window closes on the next frame tick at the latest.

use std::collections::BTreeSet;

/// Handle of a frame callback requested from a [`FrameScheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Source of "next rendering frame" callbacks.
///
/// The scheduler only hands out handles. When a frame fires, the host passes
/// the handle back to the gate (via the reconciler), which ignores handles
/// that were cancelled or superseded.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Deterministic scheduler: frames fire only when [`ManualFrames::tick`] is
/// called.
#[derive(Debug, Default)]
pub struct ManualFrames {
    next: u64,
    pending: BTreeSet<FrameHandle>,
}

impl ManualFrames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires every pending frame, returning their handles in request order.
    pub fn tick(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for ManualFrames {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending.insert(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.remove(&handle);
    }
}

/// Whether the most recent surface change came from the user.
#[derive(Debug)]
pub struct UserInputGate<S> {
    scheduler: S,
    active: bool,
    pending_reset: Option<FrameHandle>,
}

impl<S: FrameScheduler> UserInputGate<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            active: false,
            pending_reset: None,
        }
    }

    /// Opens (or extends) the active window until the next frame.
    ///
    /// Repeated signals coalesce: the pending reset is replaced, so there is
    /// never more than one outstanding frame request.
    pub fn mark_user_input(&mut self) {
        if let Some(handle) = self.pending_reset.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.active = true;
        self.pending_reset = Some(self.scheduler.request_frame());
    }

    /// Returns whether the window was open and closes it.
    pub fn consume_user_input(&mut self) -> bool {
        let was_active = self.active;
        self.active = false;
        if let Some(handle) = self.pending_reset.take() {
            self.scheduler.cancel_frame(handle);
        }
        was_active
    }

    /// Called by the host when a frame requested by this gate fires.
    pub fn frame_elapsed(&mut self, handle: FrameHandle) {
        if self.pending_reset == Some(handle) {
            self.pending_reset = None;
            self.active = false;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pending_reset(&self) -> Option<FrameHandle> {
        self.pending_reset
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}
