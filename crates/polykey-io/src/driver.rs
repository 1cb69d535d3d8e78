//! Buffer-level driver for per-sample render callbacks.

use std::sync::Arc;

use polykey_synth::RenderCallback;

use crate::backend::OutputCallback;
use crate::clock::SampleClock;

/// Drives a [`RenderCallback`] over interleaved output buffers.
///
/// One render call is made per frame on channel 0 at the clock's current
/// time; the mono sample is copied to every channel of the frame and the
/// clock advances by one frame.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use polykey_io::{RenderDriver, SampleClock};
/// use polykey_synth::{Mixer, NoteRegistry};
///
/// let registry = Arc::new(NoteRegistry::new());
/// let clock = Arc::new(SampleClock::new(44_100));
/// let driver = RenderDriver::new(Mixer::new(Arc::clone(&registry)), Arc::clone(&clock));
///
/// registry.on_press(0, 5, 0.0);
/// let mut stereo = vec![0.0f32; 2 * 256];
/// driver.fill(&mut stereo, 2);
///
/// assert_eq!(clock.frames(), 256);
/// assert!(stereo.chunks(2).all(|frame| frame[0] == frame[1]));
/// ```
#[derive(Debug)]
pub struct RenderDriver<R> {
    callback: R,
    clock: Arc<SampleClock>,
}

impl<R: RenderCallback> RenderDriver<R> {
    /// Driver rendering `callback` against `clock`.
    pub fn new(callback: R, clock: Arc<SampleClock>) -> Self {
        Self { callback, clock }
    }

    /// The shared clock.
    pub fn clock(&self) -> &Arc<SampleClock> {
        &self.clock
    }

    /// The wrapped render callback.
    pub fn callback(&self) -> &R {
        &self.callback
    }

    /// Fill an interleaved buffer of `channels` channels.
    ///
    /// A trailing partial frame is zeroed. A zero channel count writes
    /// silence without advancing the clock.
    pub fn fill(&self, buffer: &mut [f32], channels: u16) {
        let channels = usize::from(channels);
        if channels == 0 {
            buffer.fill(0.0);
            return;
        }

        let mut frames = buffer.chunks_exact_mut(channels);
        for frame in &mut frames {
            let index = self.clock.advance(1);
            let sample = self.callback.render(0, self.clock.time_at(index)) as f32;
            frame.fill(sample);
        }
        frames.into_remainder().fill(0.0);
    }

    /// Render `frames` mono samples.
    pub fn render_offline(&self, frames: usize) -> Vec<f32> {
        let mut out = vec![0.0; frames];
        self.fill(&mut out, 1);
        out
    }

    /// Render mono samples until the clock reaches `frame`.
    ///
    /// Returns an empty buffer if the clock is already past `frame`.
    pub fn render_until(&self, frame: u64) -> Vec<f32> {
        let remaining = frame.saturating_sub(self.clock.frames());
        self.render_offline(usize::try_from(remaining).unwrap_or(usize::MAX))
    }
}

impl<R: RenderCallback + 'static> RenderDriver<R> {
    /// Box this driver as a backend [`OutputCallback`] for `channels` channels.
    pub fn into_output_callback(self, channels: u16) -> OutputCallback {
        Box::new(move |buffer: &mut [f32]| self.fill(buffer, channels))
    }
}
