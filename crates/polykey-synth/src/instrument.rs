//! Instrument definitions and the selector bank.
//!
//! An [`Instrument`] is a fixed stack of oscillator voices shaped by one
//! [`Envelope`]. Instruments are `'static` data: the reference set lives in
//! the [`InstrumentBank`] and is selected by a small integer, the same value
//! the front end stores in each newly pressed [`Note`].
//!
//! | Selector | Name        | Character                          |
//! |----------|-------------|------------------------------------|
//! | 1        | harmonica   | squares an octave apart, breath    |
//! | 2        | bell        | high sines, percussive decay       |
//! | 3        | harpsichord | plucked sawtooth with a fifth      |
//! | 4        | bass        | doubled sawtooth 2.5 octaves down  |
//! | 5        | ocarina     | soft sines over a triangle         |

use crate::envelope::Envelope;
use crate::note::Note;
use crate::oscillator::{Oscillator, Waveform};
use crate::scale::Scale;

/// One oscillator in an instrument stack.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OscillatorVoice {
    /// Pitch offset from the note, in scale steps.
    pub pitch_offset: i32,
    /// Waveform and vibrato.
    pub oscillator: Oscillator,
    /// Linear weight in the instrument sum.
    pub weight: f64,
}

impl OscillatorVoice {
    /// Voice without vibrato.
    pub const fn new(pitch_offset: i32, waveform: Waveform, weight: f64) -> Self {
        Self {
            pitch_offset,
            oscillator: Oscillator::new(waveform),
            weight,
        }
    }

    /// Add vibrato with the given LFO rate (Hz) and depth.
    pub const fn with_vibrato(mut self, frequency: f64, depth: f64) -> Self {
        self.oscillator = self.oscillator.with_vibrato(frequency, depth);
        self
    }
}

/// Result of rendering one note for one sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rendered {
    /// Output sample, already shaped by the envelope and gain.
    pub sample: f64,
    /// Envelope has reached zero. Only meaningful for released notes.
    pub finished: bool,
}

impl Rendered {
    /// Silent and finished, used for notes with no instrument.
    pub const SILENT: Rendered = Rendered {
        sample: 0.0,
        finished: true,
    };
}

/// A named timbre: oscillator stack, envelope and output gain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instrument {
    /// Display name.
    pub name: &'static str,
    /// Oscillator stack, summed in order.
    pub voices: &'static [OscillatorVoice],
    /// Amplitude envelope.
    pub envelope: Envelope,
    /// Output gain.
    pub gain: f64,
    /// Tuning used to resolve voice pitches.
    pub scale: Scale,
}

impl Instrument {
    /// Instrument with unit gain in the default tuning.
    pub const fn new(
        name: &'static str,
        voices: &'static [OscillatorVoice],
        envelope: Envelope,
    ) -> Self {
        Self {
            name,
            voices,
            envelope,
            gain: 1.0,
            scale: Scale::EqualTemperament,
        }
    }

    /// Render `note` at `time` seconds.
    ///
    /// Voices are evaluated at `note.on_time - time`, anchoring every phase
    /// to the note onset so a retriggered note restarts coherently.
    ///
    /// # Example
    ///
    /// ```rust
    /// use polykey_synth::{Note, instrument::BELL};
    ///
    /// let note = Note::pressed(0, 2, 0.0);
    /// let out = BELL.render(0.005, &note);
    /// assert!(out.sample.abs() <= 1.75);
    /// assert!(!out.finished);
    /// ```
    #[inline]
    pub fn render(&self, time: f64, note: &Note) -> Rendered {
        let amplitude = self.envelope.amplitude(time, note.on_time, note.off_time);
        if amplitude <= 0.0 {
            return Rendered {
                sample: 0.0,
                finished: true,
            };
        }

        let local_time = note.on_time - time;
        let pitch = note.pitch();
        let sum: f64 = self
            .voices
            .iter()
            .map(|voice| {
                let frequency = self.scale.frequency(pitch + voice.pitch_offset);
                voice.oscillator.sample(local_time, frequency) * voice.weight
            })
            .sum();

        Rendered {
            sample: amplitude * sum * self.gain,
            finished: false,
        }
    }

    /// Sum of the absolute voice weights, an upper bound on the stack output
    /// before envelope and gain (ignoring sawtooth overshoot).
    pub fn peak_weight(&self) -> f64 {
        self.voices.iter().map(|voice| voice.weight.abs()).sum()
    }
}

static HARMONICA_VOICES: [OscillatorVoice; 3] = [
    OscillatorVoice::new(0, Waveform::Square, 1.0).with_vibrato(5.0, 0.001),
    OscillatorVoice::new(12, Waveform::Square, 0.5),
    OscillatorVoice::new(24, Waveform::Noise, 0.05),
];

/// Reed organ: square fundamental and octave with a breath of noise.
pub static HARMONICA: Instrument = Instrument::new(
    "harmonica",
    &HARMONICA_VOICES,
    Envelope::new(0.05, 1.0, 0.95, 0.1),
);

static BELL_VOICES: [OscillatorVoice; 3] = [
    OscillatorVoice::new(12, Waveform::Sine, 1.0).with_vibrato(5.0, 0.001),
    OscillatorVoice::new(48, Waveform::Sine, 0.5),
    OscillatorVoice::new(60, Waveform::Sine, 0.25),
];

/// Bright bell: sines one, four and five octaves up.
pub static BELL: Instrument = Instrument::new(
    "bell",
    &BELL_VOICES,
    Envelope::new(0.01, 1.0, 0.0, 1.0),
);

static HARPSICHORD_VOICES: [OscillatorVoice; 2] = [
    OscillatorVoice::new(0, Waveform::Sawtooth, 1.0),
    OscillatorVoice::new(7, Waveform::Sawtooth, 0.2),
];

/// Plucked sawtooth with a quiet fifth above.
pub static HARPSICHORD: Instrument = Instrument::new(
    "harpsichord",
    &HARPSICHORD_VOICES,
    Envelope::new(0.01, 1.0, 0.0, 1.0),
);

static BASS_VOICES: [OscillatorVoice; 2] = [
    OscillatorVoice::new(-30, Waveform::Sawtooth, 1.0),
    OscillatorVoice::new(-30, Waveform::Sawtooth, 0.8),
];

/// Doubled sawtooth thirty steps below the key.
pub static BASS: Instrument = Instrument::new(
    "bass",
    &BASS_VOICES,
    Envelope::new(0.01, 0.5, 0.0, 0.5),
);

static OCARINA_VOICES: [OscillatorVoice; 3] = [
    OscillatorVoice::new(4, Waveform::Sine, 1.0),
    OscillatorVoice::new(4, Waveform::Sine, 0.8),
    OscillatorVoice::new(0, Waveform::Triangle, 0.08),
];

/// Soft sines a major third up over a faint triangle.
pub static OCARINA: Instrument = Instrument::new(
    "ocarina",
    &OCARINA_VOICES,
    Envelope::new(0.1, 0.0, 1.0, 1.0),
);

/// An instrument registered under a selector, with its mixer weight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BankEntry {
    /// Selector stored in notes.
    pub selector: u8,
    /// The instrument definition.
    pub instrument: &'static Instrument,
    /// Per-instrument weight applied by the mixer to balance loudness.
    pub mix_weight: f64,
}

static STANDARD_ENTRIES: [BankEntry; 5] = [
    BankEntry {
        selector: 1,
        instrument: &HARMONICA,
        mix_weight: 0.5,
    },
    BankEntry {
        selector: 2,
        instrument: &BELL,
        mix_weight: 1.0,
    },
    BankEntry {
        selector: 3,
        instrument: &HARPSICHORD,
        mix_weight: 0.5,
    },
    BankEntry {
        selector: 4,
        instrument: &BASS,
        mix_weight: 1.0,
    },
    BankEntry {
        selector: 5,
        instrument: &OCARINA,
        mix_weight: 1.0,
    },
];

/// Selector-to-instrument table.
#[derive(Clone, Copy, Debug)]
pub struct InstrumentBank {
    entries: &'static [BankEntry],
}

impl Default for InstrumentBank {
    fn default() -> Self {
        Self::standard()
    }
}

impl InstrumentBank {
    /// The five reference instruments on selectors 1 to 5.
    pub const fn standard() -> Self {
        Self {
            entries: &STANDARD_ENTRIES,
        }
    }

    /// Bank over a custom static table.
    pub const fn from_entries(entries: &'static [BankEntry]) -> Self {
        Self { entries }
    }

    /// Entry for `selector`, `None` when nothing is registered there.
    #[inline]
    pub fn get(&self, selector: u8) -> Option<&'static BankEntry> {
        self.entries.iter().find(|entry| entry.selector == selector)
    }

    /// Case-insensitive lookup by instrument name.
    pub fn find_by_name(&self, name: &str) -> Option<&'static BankEntry> {
        self.entries
            .iter()
            .find(|entry| entry.instrument.name.eq_ignore_ascii_case(name))
    }

    /// All entries in selector order.
    pub fn entries(&self) -> &'static [BankEntry] {
        self.entries
    }

    /// Number of registered instruments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if no instruments are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render `note` through its instrument, pre-scaled by the mix weight.
    ///
    /// Notes whose selector has no entry render silent and finished.
    #[inline]
    pub fn render(&self, time: f64, note: &Note) -> Rendered {
        match self.get(note.instrument) {
            Some(entry) => {
                let rendered = entry.instrument.render(time, note);
                Rendered {
                    sample: rendered.sample * entry.mix_weight,
                    finished: rendered.finished,
                }
            }
            None => Rendered::SILENT,
        }
    }
}
