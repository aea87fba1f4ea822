//! Frame and delay scheduling
//!
//! Tweens never sleep or spawn timers themselves. They ask a [`Scheduler`]
//! for a delay or for the next frame and get a [`Handle`] back; when the host
//! pumps the scheduler, the fired handles are routed back to their owners.

use std::fmt;

/// Identifies one scheduled delay or frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The timing primitives a tween needs from its host
pub trait Scheduler {
    /// Current time in milliseconds
    fn now_ms(&self) -> f64;

    /// Request a callback on the next frame
    fn schedule_frame(&mut self) -> Handle;

    fn cancel_frame(&mut self, handle: Handle);

    /// Request a callback once `delay_ms` has elapsed
    fn schedule_delay(&mut self, delay_ms: f64) -> Handle;

    fn cancel_delay(&mut self, handle: Handle);
}

/// Deterministic scheduler driven by an explicit clock.
///
/// The host moves time forward with [`advance_to`](Self::advance_to) (from
/// a wall clock) or [`advance_by`](Self::advance_by) (in tests), then calls
/// [`due`](Self::due) once per frame.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    now_ms: f64,
    next_id: u64,
    delays: Vec<(f64, Handle)>,
    frames: Vec<Handle>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock to `now_ms`. Time never runs backwards.
    pub fn advance_to(&mut self, now_ms: f64) {
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
    }

    pub fn advance_by(&mut self, delta_ms: f64) {
        self.advance_to(self.now_ms + delta_ms);
    }

    /// Take everything that should fire now.
    ///
    /// Expired delays come first, ordered by deadline then request order,
    /// followed by every frame requested before this call. Frames requested
    /// while the returned handles are being dispatched wait for the next call.
    pub fn due(&mut self) -> Vec<Handle> {
        let now = self.now_ms;
        let (mut expired, pending): (Vec<_>, Vec<_>) =
            self.delays.drain(..).partition(|(deadline, _)| *deadline <= now);
        self.delays = pending;

        expired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut fired: Vec<Handle> = expired.into_iter().map(|(_, handle)| handle).collect();
        fired.append(&mut self.frames);
        fired
    }

    /// Number of outstanding delays and frame requests
    pub fn pending(&self) -> usize {
        self.delays.len() + self.frames.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    fn next_handle(&mut self) -> Handle {
        self.next_id += 1;
        Handle(self.next_id)
    }
}

impl Scheduler for FrameScheduler {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }

    fn schedule_frame(&mut self) -> Handle {
        let handle = self.next_handle();
        self.frames.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: Handle) {
        self.frames.retain(|h| *h != handle);
    }

    fn schedule_delay(&mut self, delay_ms: f64) -> Handle {
        let handle = self.next_handle();
        let deadline = self.now_ms + delay_ms.max(0.0);
        self.delays.push((deadline, handle));
        handle
    }

    fn cancel_delay(&mut self, handle: Handle) {
        self.delays.retain(|(_, h)| *h != handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_frames_fire_on_next_due() {
        let mut scheduler = FrameScheduler::new();
        let a = scheduler.schedule_frame();
        let b = scheduler.schedule_frame();

        assert_eq!(scheduler.due(), vec![a, b]);
        assert!(scheduler.due().is_empty());
    }

    #[test]
    fn test_delays_wait_for_clock() {
        let mut scheduler = FrameScheduler::new();
        let late = scheduler.schedule_delay(100.0);
        let early = scheduler.schedule_delay(50.0);

        assert!(scheduler.due().is_empty());

        scheduler.advance_by(60.0);
        assert_eq!(scheduler.due(), vec![early]);

        scheduler.advance_by(40.0);
        assert_eq!(scheduler.due(), vec![late]);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_delays_precede_frames_and_keep_request_order() {
        let mut scheduler = FrameScheduler::new();
        let frame = scheduler.schedule_frame();
        let first = scheduler.schedule_delay(0.0);
        let second = scheduler.schedule_delay(0.0);

        assert_eq!(scheduler.due(), vec![first, second, frame]);
    }

    #[test]
    fn test_cancel_removes_pending() {
        let mut scheduler = FrameScheduler::new();
        let frame = scheduler.schedule_frame();
        let delay = scheduler.schedule_delay(10.0);
        assert_eq!(scheduler.pending(), 2);

        scheduler.cancel_frame(frame);
        scheduler.cancel_delay(delay);
        scheduler.advance_by(10.0);

        assert!(scheduler.due().is_empty());
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_clock_is_monotonic() {
        let mut scheduler = FrameScheduler::new();
        scheduler.advance_to(100.0);
        scheduler.advance_to(40.0);
        assert_eq!(scheduler.now_ms(), 100.0);
    }

    #[test]
    fn test_negative_delay_fires_immediately() {
        let mut scheduler = FrameScheduler::new();
        let handle = scheduler.schedule_delay(-25.0);
        assert_eq!(scheduler.due(), vec![handle]);
    }
}
