//! Linear ADSR envelope evaluated from note timestamps.
//!
//! Unlike a per-sample state machine, this envelope is a closed-form function
//! of `(time, on_time, off_time)`. A note is held while `on_time > off_time`
//! and released otherwise. The release segment starts from the level the held
//! curve had at the instant of release, so the output is continuous across
//! the held/released boundary and reaches exactly zero `release` seconds later.

/// ADSR envelope stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EnvelopeStage {
    /// Attack phase: output ramps from 0 toward the start level.
    Attack,
    /// Decay phase: output moves from the start level toward the sustain level.
    Decay,
    /// Sustain phase: output holds at the sustain level while the note is held.
    Sustain,
    /// Release phase: output falls linearly to zero after the note is released.
    Release,
    /// Released and fully decayed; output is zero.
    #[default]
    Finished,
}

/// Attack-decay-sustain-release amplitude envelope.
///
/// All times are in seconds, all levels are linear amplitudes. Parameters
/// are fixed once the owning instrument is built.
///
/// # Example
///
/// ```rust
/// use polykey_synth::Envelope;
///
/// let env = Envelope::new(0.01, 1.0, 0.0, 1.0);
///
/// // Pressed at t = 0, still held at t = 0.5
/// let held = env.amplitude(0.5, 0.0, f64::NEG_INFINITY);
/// // Released at t = 0.5: continuous at the release instant
/// assert_eq!(env.amplitude(0.5, 0.0, 0.5), held);
/// // Silent once the release time has elapsed
/// assert_eq!(env.amplitude(1.5, 0.0, 0.5), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    /// Attack time in seconds.
    pub attack: f64,
    /// Decay time in seconds.
    pub decay: f64,
    /// Level held after the decay phase.
    pub sustain_level: f64,
    /// Release time in seconds.
    pub release: f64,
    /// Level reached at the end of the attack phase.
    pub start_level: f64,
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new(0.1, 0.1, 1.0, 0.2)
    }
}

impl Envelope {
    /// Envelope with a start level of 1.0.
    pub const fn new(attack: f64, decay: f64, sustain_level: f64, release: f64) -> Self {
        Self {
            attack,
            decay,
            sustain_level,
            release,
            start_level: 1.0,
        }
    }

    /// Override the level reached at the end of the attack.
    pub const fn with_start_level(mut self, start_level: f64) -> Self {
        self.start_level = start_level;
        self
    }

    /// Level of the held curve `life` seconds after the press.
    #[inline]
    pub fn held_level(&self, life: f64) -> f64 {
        if life <= self.attack {
            if self.attack > 0.0 {
                life / self.attack * self.start_level
            } else {
                self.start_level
            }
        } else if life <= self.attack + self.decay {
            (life - self.attack) / self.decay * (self.sustain_level - self.start_level)
                + self.start_level
        } else {
            self.sustain_level
        }
    }

    /// Amplitude at `time` for a note pressed at `on_time` and released at
    /// `off_time` (`off_time < on_time` while the note is held).
    ///
    /// The result is never negative.
    #[inline]
    pub fn amplitude(&self, time: f64, on_time: f64, off_time: f64) -> f64 {
        let amplitude = if on_time > off_time {
            self.held_level(time - on_time)
        } else {
            let release_level = self.held_level(off_time - on_time);
            let elapsed = time - off_time;
            if self.release <= 0.0 || elapsed >= self.release || time >= off_time + self.release {
                0.0
            } else {
                release_level * (1.0 - elapsed / self.release)
            }
        };

        if amplitude <= 0.0 { 0.0 } else { amplitude }
    }

    /// Stage the envelope is in at `time`.
    pub fn stage(&self, time: f64, on_time: f64, off_time: f64) -> EnvelopeStage {
        if on_time > off_time {
            let life = time - on_time;
            if life <= self.attack {
                EnvelopeStage::Attack
            } else if life <= self.attack + self.decay {
                EnvelopeStage::Decay
            } else {
                EnvelopeStage::Sustain
            }
        } else if self.amplitude(time, on_time, off_time) > 0.0 {
            EnvelopeStage::Release
        } else {
            EnvelopeStage::Finished
        }
    }
}
