use std::time::{Duration, Instant};

/// Redraw cadence of the face when nothing else changes.
pub const DEFAULT_REDRAW_INTERVAL: Duration = Duration::from_millis(1000);

/// Bookkeeping for one drawn frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameTick {
    /// Monotonic frame counter.
    pub index: u64,
    /// Timestamp passed to [`RedrawScheduler::frame_drawn`].
    pub drawn_at: Instant,
}

/// Decides when the host should repaint the clock.
///
/// The scheduler never spawns a timer. The host asks [`is_due`] from its event
/// loop and sleeps until [`next_deadline`]; pausing it (for example while the
/// window is hidden) stops frames until [`resume`] is called.
///
/// [`is_due`]: RedrawScheduler::is_due
/// [`next_deadline`]: RedrawScheduler::next_deadline
/// [`resume`]: RedrawScheduler::resume
#[derive(Debug, Clone)]
pub struct RedrawScheduler {
    interval: Duration,
    next: Option<Instant>,
    paused: bool,
    frame_index: u64,
}

impl RedrawScheduler {
    /// A new scheduler is due immediately.
    pub fn new(interval: Duration) -> Self {
        debug_assert!(!interval.is_zero());
        Self {
            interval,
            next: None,
            paused: false,
            frame_index: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_due(&self, now: Instant) -> bool {
        !self.paused && self.next.map_or(true, |deadline| now >= deadline)
    }

    /// When the next frame is due, `None` if one is due right away or the
    /// scheduler is paused.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.paused {
            None
        } else {
            self.next
        }
    }

    /// Records a finished frame and arms the next deadline.
    pub fn frame_drawn(&mut self, now: Instant) -> FrameTick {
        self.next = Some(now + self.interval);
        let tick = FrameTick {
            index: self.frame_index,
            drawn_at: now,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        tick
    }

    /// Makes the next check due regardless of the interval.
    pub fn request_immediate(&mut self) {
        self.next = None;
    }

    pub fn pause(&mut self) {
        if !self.paused {
            log::debug!("redraw scheduler paused");
        }
        self.paused = true;
    }

    /// Resumes and schedules a frame right away.
    pub fn resume(&mut self) {
        if self.paused {
            log::debug!("redraw scheduler resumed");
        }
        self.paused = false;
        self.next = None;
    }
}

impl Default for RedrawScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_REDRAW_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_scheduler_is_due() {
        let s = RedrawScheduler::default();
        assert!(s.is_due(Instant::now()));
        assert_eq!(s.next_deadline(), None);
        assert_eq!(s.interval(), Duration::from_secs(1));
    }

    #[test]
    fn waits_one_interval_after_a_frame() {
        let mut s = RedrawScheduler::default();
        let t0 = Instant::now();
        s.frame_drawn(t0);
        assert!(!s.is_due(t0 + Duration::from_millis(999)));
        assert!(s.is_due(t0 + Duration::from_millis(1000)));
        assert_eq!(s.next_deadline(), Some(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn frame_indices_increase() {
        let mut s = RedrawScheduler::new(Duration::from_millis(10));
        let t0 = Instant::now();
        let a = s.frame_drawn(t0);
        let b = s.frame_drawn(t0 + Duration::from_millis(10));
        assert_eq!((a.index, b.index), (0, 1));
        assert_eq!(a.drawn_at, t0);
    }

    #[test]
    fn immediate_request_skips_the_wait() {
        let mut s = RedrawScheduler::default();
        let t0 = Instant::now();
        s.frame_drawn(t0);
        s.request_immediate();
        assert!(s.is_due(t0));
    }

    #[test]
    fn paused_scheduler_is_never_due() {
        let mut s = RedrawScheduler::default();
        let t0 = Instant::now();
        s.frame_drawn(t0);
        s.pause();
        assert!(s.is_paused());
        assert!(!s.is_due(t0 + Duration::from_secs(60)));
        assert_eq!(s.next_deadline(), None);

        s.resume();
        assert!(s.is_due(t0));
    }
}
