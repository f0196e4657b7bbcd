//! Frame scheduling.
//!
//! The field never drives its own loop. It asks a [`FrameScheduler`] for the
//! next frame and the host calls back into [`ParticleField::frame`] when the
//! display is ready. Keeping "request the next tick" behind a trait lets the
//! physics run under tests without any display at all.
//!
//! [`ParticleField::frame`]: crate::ParticleField::frame

/// Opaque ticket for a pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Source of "call me on the next display refresh".
pub trait FrameScheduler {
    /// Request one callback on the next frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw a request. Unknown or already fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler for hosts that pull: the host checks [`take_pending`] once per
/// event-loop turn and turns a pending request into a redraw.
///
/// [`take_pending`]: RedrawScheduler::take_pending
#[derive(Debug, Default)]
pub struct RedrawScheduler {
    next_id: u64,
    pending: Option<FrameHandle>,
    requested: u64,
    cancelled: u64,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The outstanding request, if any.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Consume the outstanding request. Called by the host when it fires.
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Total frames ever requested.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total requests withdrawn before firing.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_and_take() {
        let mut scheduler = RedrawScheduler::new();
        let handle = scheduler.request_frame();

        assert_eq!(scheduler.pending(), Some(handle));
        assert_eq!(scheduler.take_pending(), Some(handle));
        assert_eq!(scheduler.take_pending(), None);
        assert_eq!(scheduler.requested(), 1);
    }

    #[test]
    fn test_handles_are_unique() {
        let mut scheduler = RedrawScheduler::new();
        let a = scheduler.request_frame();
        let b = scheduler.request_frame();
        assert_ne!(a, b);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut scheduler = RedrawScheduler::new();
        let handle = scheduler.request_frame();

        scheduler.cancel_frame(handle);
        scheduler.cancel_frame(handle);

        assert_eq!(scheduler.pending(), None);
        assert_eq!(scheduler.cancelled(), 1);
    }

    #[test]
    fn test_cancel_stale_handle_keeps_newer_request() {
        let mut scheduler = RedrawScheduler::new();
        let old = scheduler.request_frame();
        let new = scheduler.request_frame();

        scheduler.cancel_frame(old);
        assert_eq!(scheduler.pending(), Some(new));
    }
}
