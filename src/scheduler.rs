//! Fixed-rate frame pacing
//!
//! One tick and one render per frame. When a frame runs long the next one
//! starts immediately; there is no catch-up burst.

use std::thread;
use std::time::{Duration, Instant};

use crate::consts::SIM_HZ;

/// Frames kept for the FPS estimate
const FRAME_WINDOW: usize = 60;

/// Time source for the scheduler
pub trait Clock {
    /// Time since the clock's origin
    fn now(&self) -> Duration;
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Clock that only moves when told to. Sleeping advances it instantly.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Duration,
    pub sleeps: Vec<Duration>,
}

impl ManualClock {
    /// Simulate work taking `duration`
    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
        self.now += duration;
    }
}

pub struct FrameScheduler<C: Clock = SystemClock> {
    clock: C,
    frame: Duration,
    frame_start: Duration,
    overruns: u64,
    // FPS tracking
    frame_times: [Duration; FRAME_WINDOW],
    frame_index: usize,
    frames_seen: usize,
    fps: u32,
}

impl FrameScheduler<SystemClock> {
    pub fn new(rate_hz: u32) -> Self {
        Self::with_clock(rate_hz, SystemClock::default())
    }
}

impl Default for FrameScheduler<SystemClock> {
    fn default() -> Self {
        Self::new(SIM_HZ)
    }
}

impl<C: Clock> FrameScheduler<C> {
    pub fn with_clock(rate_hz: u32, clock: C) -> Self {
        let frame = Duration::from_nanos(1_000_000_000 / u64::from(rate_hz.max(1)));
        let frame_start = clock.now();
        Self {
            clock,
            frame,
            frame_start,
            overruns: 0,
            frame_times: [Duration::ZERO; FRAME_WINDOW],
            frame_index: 0,
            frames_seen: 0,
            fps: 0,
        }
    }

    /// Frame budget
    pub fn frame(&self) -> Duration {
        self.frame
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Frames that used up their whole budget
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    /// Measured frame rate, 0 until enough frames have passed
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Sleep out the rest of the current frame, returning how long was slept
    pub fn wait_for_next_frame(&mut self) -> Duration {
        let elapsed = self.clock.now().saturating_sub(self.frame_start);
        let slept = match self.frame.checked_sub(elapsed) {
            Some(rest) if !rest.is_zero() => {
                self.clock.sleep(rest);
                rest
            }
            _ => {
                self.overruns += 1;
                log::debug!(
                    "frame overrun: {:.2}ms over {:.2}ms budget",
                    elapsed.as_secs_f64() * 1000.0,
                    self.frame.as_secs_f64() * 1000.0
                );
                Duration::ZERO
            }
        };

        self.frame_start = self.clock.now();
        self.track_fps(self.frame_start);
        slept
    }

    fn track_fps(&mut self, time: Duration) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FRAME_WINDOW;
        self.frames_seen = (self.frames_seen + 1).min(FRAME_WINDOW);

        if self.frames_seen < FRAME_WINDOW {
            return;
        }
        let oldest = self.frame_times[self.frame_index];
        let elapsed = time.saturating_sub(oldest).as_secs_f64();
        if elapsed > 0.0 {
            self.fps = ((FRAME_WINDOW - 1) as f64 / elapsed).round() as u32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manual() -> FrameScheduler<ManualClock> {
        FrameScheduler::with_clock(32, ManualClock::default())
    }

    #[test]
    fn test_frame_budget() {
        assert_eq!(manual().frame(), Duration::from_micros(31_250));
    }

    #[test]
    fn test_sleeps_remainder() {
        let mut sched = manual();
        sched.clock_mut().advance(Duration::from_millis(10));
        let slept = sched.wait_for_next_frame();
        assert_eq!(slept, Duration::from_micros(21_250));
        assert_eq!(sched.clock().now(), Duration::from_micros(31_250));
        assert_eq!(sched.overruns(), 0);
    }

    #[test]
    fn test_never_sleeps_on_overrun() {
        let mut sched = manual();
        sched.clock_mut().advance(Duration::from_millis(40));
        assert_eq!(sched.wait_for_next_frame(), Duration::ZERO);
        assert_eq!(sched.overruns(), 1);
        assert!(sched.clock().sleeps.is_empty());

        // Next frame gets a full budget again, no catch-up
        sched.clock_mut().advance(Duration::from_millis(1));
        assert_eq!(sched.wait_for_next_frame(), Duration::from_micros(30_250));
    }

    #[test]
    fn test_exact_budget_counts_as_overrun() {
        let mut sched = manual();
        sched.clock_mut().advance(Duration::from_micros(31_250));
        assert_eq!(sched.wait_for_next_frame(), Duration::ZERO);
        assert_eq!(sched.overruns(), 1);
    }

    #[test]
    fn test_fps_settles_at_rate() {
        let mut sched = manual();
        for _ in 0..FRAME_WINDOW - 1 {
            sched.wait_for_next_frame();
        }
        assert_eq!(sched.fps(), 0);
        for _ in 0..10 {
            sched.wait_for_next_frame();
        }
        assert_eq!(sched.fps(), 32);
    }

    #[test]
    fn test_zero_rate_clamped() {
        let sched = FrameScheduler::with_clock(0, ManualClock::default());
        assert_eq!(sched.frame(), Duration::from_secs(1));
    }
}
