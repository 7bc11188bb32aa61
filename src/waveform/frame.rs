/// Per-view stand-in for an animation frame request.
///
/// The event loop `take`s the request once per iteration. After `cancel`,
/// further requests are ignored until the view is bound again.
#[derive(Debug, Default)]
pub struct FrameHandle {
    pending: bool,
    cancelled: bool,
}

impl FrameHandle {
    pub fn request(&mut self) {
        if !self.cancelled {
            self.pending = true;
        }
    }

    pub fn cancel(&mut self) {
        self.pending = false;
        self.cancelled = true;
    }

    /// Re-arm after a cancel.
    pub fn reset(&mut self) {
        self.cancelled = false;
    }

    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
