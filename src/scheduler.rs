#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

pub trait Scheduler {
    fn schedule_next_frame(&mut self) -> FrameHandle;

    fn cancel(&mut self, handle: FrameHandle);

    /// Pops the request whose frame has arrived.
    fn next_due(&mut self) -> Option<FrameHandle>;
}

/// Holds at most one outstanding request, fired on the next frame.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> FrameQueue {
        FrameQueue::default()
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Scheduler for FrameQueue {
    fn schedule_next_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pending = Some(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }

    fn next_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}
