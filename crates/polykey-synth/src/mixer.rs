//! Render entry point for the audio backend.

use std::sync::Arc;

use crate::instrument::InstrumentBank;
use crate::registry::NoteRegistry;

/// Default master gain, leaving headroom for overlapping notes.
pub const DEFAULT_MASTER_GAIN: f64 = 0.2;

/// Per-sample render callback consumed by audio backends.
///
/// Called once per output frame with the channel index and the synthesis
/// time in seconds. Implementations must return a sample in [-1, 1].
pub trait RenderCallback: Send + Sync {
    /// Render one sample for `channel` at `time` seconds.
    fn render(&self, channel: u16, time: f64) -> f64;
}

impl<T: RenderCallback + ?Sized> RenderCallback for Arc<T> {
    #[inline]
    fn render(&self, channel: u16, time: f64) -> f64 {
        (**self).render(channel, time)
    }
}

/// Sums every active note through its instrument and prunes finished notes.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use polykey_synth::{Mixer, NoteRegistry, RenderCallback};
///
/// let registry = Arc::new(NoteRegistry::new());
/// let mixer = Mixer::new(Arc::clone(&registry));
///
/// assert_eq!(mixer.render(0, 0.0), 0.0);
///
/// registry.on_press(0, 2, 0.0);
/// let sample = mixer.render(0, 0.005);
/// assert!(sample != 0.0 && sample.abs() <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Mixer {
    registry: Arc<NoteRegistry>,
    bank: InstrumentBank,
    master_gain: f64,
}

impl Mixer {
    /// Mixer over the standard instrument bank with the default master gain.
    pub fn new(registry: Arc<NoteRegistry>) -> Self {
        Self::with_bank(registry, InstrumentBank::standard())
    }

    /// Mixer over a custom instrument bank.
    pub fn with_bank(registry: Arc<NoteRegistry>, bank: InstrumentBank) -> Self {
        Self {
            registry,
            bank,
            master_gain: DEFAULT_MASTER_GAIN,
        }
    }

    /// Set the master gain applied after summing.
    pub fn set_master_gain(&mut self, gain: f64) {
        self.master_gain = gain;
    }

    /// Builder form of [`Mixer::set_master_gain`].
    pub fn with_master_gain(mut self, gain: f64) -> Self {
        self.master_gain = gain;
        self
    }

    /// Current master gain.
    pub fn master_gain(&self) -> f64 {
        self.master_gain
    }

    /// Shared note registry.
    pub fn registry(&self) -> &Arc<NoteRegistry> {
        &self.registry
    }

    /// Instrument bank used to resolve note selectors.
    pub fn bank(&self) -> &InstrumentBank {
        &self.bank
    }

    /// Mix every note at `time`, pruning notes that have finished decaying.
    #[inline]
    pub fn mix(&self, time: f64) -> f64 {
        let sum = self
            .registry
            .render_and_prune(|note| self.bank.render(time, note));
        (sum * self.master_gain).clamp(-1.0, 1.0)
    }
}

impl RenderCallback for Mixer {
    /// Output is mono: every channel receives the same sample.
    #[inline]
    fn render(&self, _channel: u16, time: f64) -> f64 {
        self.mix(time)
    }
}
