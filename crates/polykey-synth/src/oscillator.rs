//! Time-addressed oscillators.
//!
//! Every oscillator here is a pure function of absolute time: the phase is
//! computed directly from `time` and `frequency` instead of being accumulated
//! sample by sample. That keeps each voice sample-accurate no matter how the
//! audio backend slices its buffers, and lets the mixer re-anchor a voice to
//! its note onset for free.
//!
//! Phase with optional vibrato (frequency modulation proportional to the
//! carrier):
//!
//! ```text
//! phase = 2π·f·t + depth·f·sin(2π·f_lfo·t)
//! ```

use core::f64::consts::{FRAC_2_PI, TAU};
use core::sync::atomic::{AtomicU32, Ordering};
use libm::{asin, cos, sin};

/// Number of harmonics summed by the additive sawtooth.
pub const SAW_HARMONICS: u32 = 49;

/// Oscillator waveform types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    /// Sine waveform: pure fundamental.
    #[default]
    Sine,
    /// Square waveform, hard edges with no band-limiting.
    Square,
    /// Triangle waveform built from `asin(sin(phase))`.
    Triangle,
    /// Additive sawtooth, first [`SAW_HARMONICS`] partials.
    Sawtooth,
    /// Uniform white noise.
    Noise,
}

impl Waveform {
    /// All waveforms in id order.
    pub const ALL: [Waveform; 5] = [
        Waveform::Sine,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::Sawtooth,
        Waveform::Noise,
    ];

    /// Resolve a raw waveform id (0 = sine .. 4 = noise).
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(Waveform::Sine),
            1 => Some(Waveform::Square),
            2 => Some(Waveform::Triangle),
            3 => Some(Waveform::Sawtooth),
            4 => Some(Waveform::Noise),
            _ => None,
        }
    }

    /// Raw id of this waveform, inverse of [`Waveform::from_id`].
    pub fn id(self) -> i32 {
        match self {
            Waveform::Sine => 0,
            Waveform::Square => 1,
            Waveform::Triangle => 2,
            Waveform::Sawtooth => 3,
            Waveform::Noise => 4,
        }
    }

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Noise => "noise",
        }
    }

    /// Evaluate the waveform at an absolute phase in radians.
    ///
    /// Noise ignores the phase.
    #[inline]
    pub fn at_phase(self, phase: f64) -> f64 {
        match self {
            Waveform::Sine => sin(phase),
            Waveform::Square => {
                if sin(phase) >= 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => asin(sin(phase)) * FRAC_2_PI,
            Waveform::Sawtooth => additive_saw(phase),
            Waveform::Noise => white_noise(),
        }
    }
}

/// Low-frequency vibrato applied to an oscillator's phase.
///
/// `depth` scales with the carrier frequency, so the same setting gives a
/// similar perceived pitch wobble across the keyboard.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vibrato {
    /// LFO rate in Hz.
    pub frequency: f64,
    /// Modulation depth, multiplied by the carrier frequency.
    pub depth: f64,
}

impl Vibrato {
    /// Create a vibrato with the given rate (Hz) and depth.
    pub const fn new(frequency: f64, depth: f64) -> Self {
        Self { frequency, depth }
    }
}

/// A waveform plus optional vibrato, evaluated at arbitrary times.
///
/// # Example
///
/// ```rust
/// use polykey_synth::{Oscillator, Waveform};
///
/// let osc = Oscillator::new(Waveform::Sine).with_vibrato(5.0, 0.001);
/// let sample = osc.sample(0.25, 440.0);
/// assert!((-1.0..=1.0).contains(&sample));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Oscillator {
    /// Waveform shape.
    pub waveform: Waveform,
    /// Vibrato settings, `None` for a steady pitch.
    pub vibrato: Option<Vibrato>,
}

impl Oscillator {
    /// Oscillator with no vibrato.
    pub const fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            vibrato: None,
        }
    }

    /// Add vibrato with the given LFO rate (Hz) and depth.
    pub const fn with_vibrato(mut self, frequency: f64, depth: f64) -> Self {
        self.vibrato = Some(Vibrato::new(frequency, depth));
        self
    }

    /// Sample the oscillator at `time` seconds for a carrier of `frequency` Hz.
    #[inline]
    pub fn sample(&self, time: f64, frequency: f64) -> f64 {
        self.waveform
            .at_phase(phase(time, frequency, self.vibrato.unwrap_or_default()))
    }
}

/// Absolute phase in radians of a carrier at `time`.
#[inline]
pub fn phase(time: f64, frequency: f64, vibrato: Vibrato) -> f64 {
    let carrier = TAU * frequency * time;
    if vibrato.depth == 0.0 {
        return carrier;
    }
    carrier + vibrato.depth * frequency * sin(TAU * vibrato.frequency * time)
}

/// Sample a waveform at `time` for a carrier of `frequency` Hz.
///
/// `lfo_frequency` and `lfo_depth` describe the vibrato; pass zeros for none.
#[inline]
pub fn oscillator(
    time: f64,
    frequency: f64,
    waveform: Waveform,
    lfo_frequency: f64,
    lfo_depth: f64,
) -> f64 {
    waveform.at_phase(phase(
        time,
        frequency,
        Vibrato::new(lfo_frequency, lfo_depth),
    ))
}

/// Like [`oscillator`], but with a raw waveform id.
///
/// Unknown ids produce silence.
#[inline]
pub fn oscillator_by_id(
    time: f64,
    frequency: f64,
    waveform_id: i32,
    lfo_frequency: f64,
    lfo_depth: f64,
) -> f64 {
    Waveform::from_id(waveform_id).map_or(0.0, |waveform| {
        oscillator(time, frequency, waveform, lfo_frequency, lfo_depth)
    })
}

/// Sum of `sin(n·phase)/n` for `n = 1..=SAW_HARMONICS`, scaled by `2/π`.
///
/// The partials come from the Chebyshev recurrence
/// `sin((n+1)x) = 2cos(x)·sin(nx) - sin((n-1)x)`, so only one `sin`/`cos`
/// pair is evaluated per sample.
#[inline]
fn additive_saw(phase: f64) -> f64 {
    let two_cos = 2.0 * cos(phase);
    let mut previous = 0.0;
    let mut current = sin(phase);
    let mut sum = 0.0;
    for n in 1..=SAW_HARMONICS {
        sum += current / f64::from(n);
        let next = two_cos * current - previous;
        previous = current;
        current = next;
    }
    sum * FRAC_2_PI
}

/// Shared xorshift32 state for [`Waveform::Noise`].
static NOISE_STATE: AtomicU32 = AtomicU32::new(0x1234_5678);

/// Uniform pseudo-random value in [-1, 1].
///
/// Concurrent callers may occasionally observe the same value; noise has no
/// repeatability requirement.
#[inline]
fn white_noise() -> f64 {
    let mut x = NOISE_STATE.load(Ordering::Relaxed);
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    NOISE_STATE.store(x, Ordering::Relaxed);

    2.0 * (f64::from(x) / f64::from(u32::MAX)) - 1.0
}
