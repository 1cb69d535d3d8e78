//! Frame-counting synthesis clock.

use std::sync::atomic::{AtomicU64, Ordering};

/// Synthesis time shared between the audio thread and the input thread.
///
/// The audio thread advances the clock by one frame per rendered frame; the
/// input thread reads [`SampleClock::time`] to timestamp presses and
/// releases. Time is derived from an integer frame count, so it never drifts
/// from the rendered output.
#[derive(Debug)]
pub struct SampleClock {
    frames: AtomicU64,
    sample_rate: u32,
}

impl SampleClock {
    /// Clock at frame 0 running at `sample_rate` Hz.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            frames: AtomicU64::new(0),
            sample_rate: sample_rate.max(1),
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Frames rendered so far.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    /// Seconds since synthesis start.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time_at(self.frames())
    }

    /// Seconds at an absolute frame index.
    #[inline]
    pub fn time_at(&self, frame: u64) -> f64 {
        frame as f64 / f64::from(self.sample_rate)
    }

    /// Advance by `frames`, returning the frame index before the advance.
    #[inline]
    pub fn advance(&self, frames: u64) -> u64 {
        self.frames.fetch_add(frames, Ordering::AcqRel)
    }

    /// Rewind to frame 0.
    pub fn reset(&self) {
        self.frames.store(0, Ordering::Release);
    }
}
