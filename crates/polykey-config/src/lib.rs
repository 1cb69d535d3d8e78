//! Configuration for the polykey synthesizer.
//!
//! This crate owns everything the `polykey` front end reads from disk:
//!
//! - **Settings**: [`SynthConfig`] with audio, mixer and keyboard sections,
//!   stored as TOML
//! - **Validation**: range and keyboard-layout checks ([`ValidationError`])
//! - **Paths**: platform-specific config directory ([`paths`])
//!
//! # Example
//!
//! ```rust,no_run
//! use polykey_config::{SynthConfig, default_config_path};
//!
//! // Missing file: defaults. Present file: parsed and validated.
//! let config = SynthConfig::load_or_default(default_config_path()).unwrap();
//! println!("{} Hz, gain {}", config.audio.sample_rate, config.mixer.master_gain);
//!
//! // Tweak and save next to the default location
//! let mut config = config;
//! config.keyboard.initial_instrument = 2;
//! config.save(default_config_path()).unwrap();
//! ```

mod error;
mod settings;

/// Platform-specific configuration paths.
pub mod paths;

/// Range and keyboard-layout validation.
pub mod validation;

pub use error::ConfigError;
pub use paths::{CONFIG_FILE_NAME, default_config_path, ensure_user_config_dir, user_config_dir};
pub use settings::{AudioSettings, KeyboardSettings, MixerSettings, SynthConfig};
pub use validation::{SAMPLE_RATE_RANGE, ValidationError, ValidationResult, validate_config};
