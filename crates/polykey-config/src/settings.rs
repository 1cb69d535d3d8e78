//! Synthesizer settings file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::validation::validate_config;

/// Top-level configuration file.
///
/// # TOML Format
///
/// ```toml
/// [audio]
/// sample_rate = 44100
/// buffer_size = 512
/// channels = 1
/// # device = "USB"
///
/// [mixer]
/// master_gain = 0.2
///
/// [keyboard]
/// note_keys = "zsxcfvgbnjmk,l./"
/// instrument_keys = "qwert"
/// poll_interval_ms = 5
/// hold_timeout_ms = 150
/// initial_instrument = 0
/// ```
///
/// Every section and field is optional; missing values take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SynthConfig {
    /// Audio output settings.
    pub audio: AudioSettings,
    /// Mixer settings.
    pub mixer: MixerSettings,
    /// Terminal keyboard settings.
    pub keyboard: KeyboardSettings,
}

/// Audio output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct AudioSettings {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Preferred buffer size in frames.
    pub buffer_size: u32,
    /// Output channel count; the mono mix is copied to every channel.
    pub channels: u16,
    /// Output device name filter (system default if absent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            buffer_size: 512,
            channels: 1,
            device: None,
        }
    }
}

/// Mixer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MixerSettings {
    /// Gain applied to the summed notes before clamping.
    pub master_gain: f64,
}

impl Default for MixerSettings {
    fn default() -> Self {
        Self { master_gain: 0.2 }
    }
}

/// Terminal keyboard settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct KeyboardSettings {
    /// Characters mapped to note ids 0, 1, 2, ... in order.
    pub note_keys: String,
    /// Characters mapped to instrument selectors 1, 2, 3, ... in order.
    pub instrument_keys: String,
    /// Interval between key-state samples.
    pub poll_interval_ms: u64,
    /// How long a key counts as held after its last press or repeat event,
    /// used when the terminal cannot report releases.
    pub hold_timeout_ms: u64,
    /// Instrument selected at startup (0 = none).
    pub initial_instrument: u8,
}

impl Default for KeyboardSettings {
    fn default() -> Self {
        Self {
            note_keys: "zsxcfvgbnjmk,l./".to_string(),
            instrument_keys: "qwert".to_string(),
            poll_interval_ms: 5,
            hold_timeout_ms: 150,
            initial_instrument: 0,
        }
    }
}

impl KeyboardSettings {
    /// Note id bound to `key`, if any. Letter case is ignored.
    pub fn note_id(&self, key: char) -> Option<u8> {
        self.note_keys
            .chars()
            .position(|c| c.eq_ignore_ascii_case(&key))
            .and_then(|i| u8::try_from(i).ok())
    }

    /// Instrument selector bound to `key`, if any (1-based). Letter case is
    /// ignored.
    pub fn instrument_selector(&self, key: char) -> Option<u8> {
        self.instrument_keys
            .chars()
            .position(|c| c.eq_ignore_ascii_case(&key))
            .and_then(|i| u8::try_from(i + 1).ok())
    }

    /// Number of note keys.
    pub fn note_count(&self) -> usize {
        self.note_keys.chars().count()
    }
}

impl SynthConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load `path` if it exists, otherwise return the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: SynthConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate and save to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        self.validate()?;
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::info!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Check every value against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_config(self)?;
        Ok(())
    }
}
