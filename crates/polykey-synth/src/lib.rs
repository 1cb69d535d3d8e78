//! Polykey Synth - real-time polyphonic synthesis core
//!
//! This crate turns a live set of notes into one mixed sample per call. It
//! is driven from two sides: an input thread presses and releases notes, and
//! the audio backend asks for "one sample for channel C at time T".
//!
//! # Core Components
//!
//! ## Scale
//!
//! - [`Scale`] / [`frequency`] - note id to Hz, twelve-tone equal temperament
//!   anchored at 256 Hz
//!
//! ## Oscillators
//!
//! Pure functions of absolute time, so voices stay sample-accurate no matter
//! how the backend slices its buffers:
//!
//! - [`Waveform`] - sine, square, triangle, additive sawtooth, noise
//! - [`Oscillator`] - a waveform with optional [`Vibrato`]
//! - [`oscillator()`] / [`oscillator_by_id`] - free-function forms
//!
//! ```rust
//! use polykey_synth::{Waveform, oscillator};
//!
//! let s = oscillator(0.001, 440.0, Waveform::Triangle, 0.0, 0.0);
//! assert!((-1.0..=1.0).contains(&s));
//! ```
//!
//! ## Envelopes
//!
//! - [`Envelope`] - linear ADSR evaluated from a note's on/off timestamps
//! - [`EnvelopeStage`] - stage reporting
//!
//! ## Instruments
//!
//! - [`Instrument`] - oscillator stack, envelope and gain
//! - [`InstrumentBank`] - selector table (harmonica, bell, harpsichord, bass,
//!   ocarina on selectors 1 to 5)
//!
//! ## Notes and Mixing
//!
//! - [`Note`] - on/off timestamps for one key
//! - [`NoteRegistry`] - lock-guarded note store shared by both threads
//! - [`Mixer`] - the [`RenderCallback`] handed to the audio backend
//! - [`KeyStateTracker`] / [`InstrumentSelector`] - press/release contract for
//!   front ends
//!
//! # no_std Support
//!
//! Scale, oscillators, envelopes and instruments are `no_std`. The registry,
//! mixer and input contract need the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! polykey-synth = { version = "0.1", default-features = false }
//! ```
//!
//! # Example: Press, Render, Release
//!
//! ```rust
//! use std::sync::Arc;
//! use polykey_synth::{Mixer, NoteRegistry, RenderCallback};
//!
//! let registry = Arc::new(NoteRegistry::new());
//! let mixer = Mixer::new(Arc::clone(&registry));
//!
//! // Bell (selector 2) on key 0
//! registry.on_press(0, 2, 0.0);
//! registry.on_release(0, 0.5);
//!
//! let sample_rate = 44_100.0;
//! let mut buffer = vec![0.0; 44_100 * 2];
//! for (i, sample) in buffer.iter_mut().enumerate() {
//!     *sample = mixer.render(0, i as f64 / sample_rate);
//! }
//!
//! // One second of release later the note is gone
//! assert!(registry.is_empty());
//! assert_eq!(*buffer.last().unwrap(), 0.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod envelope;
pub mod instrument;
pub mod note;
pub mod oscillator;
pub mod scale;

#[cfg(feature = "std")]
pub mod input;
#[cfg(feature = "std")]
pub mod mixer;
#[cfg(feature = "std")]
pub mod registry;

// Re-export main types at crate root
pub use envelope::{Envelope, EnvelopeStage};
pub use instrument::{BankEntry, Instrument, InstrumentBank, OscillatorVoice, Rendered};
pub use note::Note;
pub use oscillator::{Oscillator, SAW_HARMONICS, Vibrato, Waveform, oscillator, oscillator_by_id};
pub use scale::{BASE_FREQUENCY, Scale, frequency};

#[cfg(feature = "std")]
pub use input::{InstrumentSelector, KeyEvent, KeyStateTracker};
#[cfg(feature = "std")]
pub use mixer::{DEFAULT_MASTER_GAIN, Mixer, RenderCallback};
#[cfg(feature = "std")]
pub use registry::{NoteRegistry, PressOutcome};
