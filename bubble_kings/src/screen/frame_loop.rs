use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Source of the current time in milliseconds.
pub trait FrameClock {
    fn now_ms(&mut self) -> f64;
}

/// Wall clock measured from the moment it was created
#[derive(Debug, Clone, Copy)]
pub struct InstantClock {
    origin: Instant,
}

impl Default for InstantClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl FrameClock for InstantClock {
    fn now_ms(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that moves forward by a fixed step every time it is read
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualClock {
    now: f64,
    step: f64,
}

impl ManualClock {
    pub const fn new(start: f64, step: f64) -> Self {
        Self { now: start, step }
    }

    pub const fn now(&self) -> f64 {
        self.now
    }
}

impl FrameClock for ManualClock {
    fn now_ms(&mut self) -> f64 {
        let now = self.now;
        self.now += self.step;
        now
    }
}

/// Shared flag that stops a [`FrameLoop`], can be cloned and handed to other code
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Frame scheduler.
///
/// The host calls [`FrameLoop::advance`] once per display refresh with the current time;
/// the loop answers with the elapsed time since the previous frame, or `None` while it is
/// not running.
#[derive(Debug, Default)]
pub struct FrameLoop {
    last: Option<f64>,
    frames: u64,
    stop: StopHandle,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the loop, the first delta is measured from `now`.
    pub fn start(&mut self, now: f64) {
        self.stop.reset();
        self.last = Some(now);
    }

    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_running(&self) -> bool {
        self.last.is_some() && !self.stop.is_stopped()
    }

    /// Number of frames produced since the loop was created
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Produce the next frame at time `now`, returning its delta in milliseconds.
    #[allow(clippy::cast_possible_truncation)]
    pub fn advance(&mut self, now: f64) -> Option<f32> {
        if !self.is_running() {
            return None;
        }
        let last = self.last.replace(now)?;
        self.frames += 1;
        Some((now - last).max(0.0) as f32)
    }
}
