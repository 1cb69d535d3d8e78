//! Audio output layer for polykey.
//!
//! This crate connects the synthesis core to the outside world:
//!
//! - **Backends**: [`AudioBackend`] abstracts device enumeration and output
//!   streams; [`CpalBackend`] is the cross-platform implementation
//! - **Timing**: [`SampleClock`] counts rendered frames and converts them to
//!   synthesis time, shared between the audio and input threads
//! - **Rendering**: [`RenderDriver`] adapts a per-sample
//!   [`RenderCallback`](polykey_synth::RenderCallback) to interleaved buffers,
//!   both for live streams and offline rendering
//! - **WAV export**: [`write_wav`] / [`read_wav`] via hound
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use polykey_io::{AudioBackend, BackendStreamConfig, CpalBackend, RenderDriver, SampleClock};
//! use polykey_synth::{Mixer, NoteRegistry};
//!
//! # fn main() -> polykey_io::Result<()> {
//! let registry = Arc::new(NoteRegistry::new());
//! let clock = Arc::new(SampleClock::new(44_100));
//! let driver = RenderDriver::new(Mixer::new(Arc::clone(&registry)), Arc::clone(&clock));
//!
//! let config = BackendStreamConfig::default();
//! let backend = CpalBackend::new();
//! let _stream = backend.build_output_stream(
//!     &config,
//!     driver.into_output_callback(config.channels),
//!     Box::new(|err: &str| eprintln!("audio error: {err}")),
//! )?;
//!
//! // Press a bell note "now"; the stream renders it until `_stream` is dropped.
//! registry.on_press(0, 2, clock.time());
//! # Ok(())
//! # }
//! ```

pub mod backend;
mod clock;
pub mod cpal_backend;
mod device;
mod driver;
mod wav;

pub use backend::{AudioBackend, BackendStreamConfig, ErrorCallback, OutputCallback, StreamHandle};
pub use clock::SampleClock;
pub use cpal_backend::CpalBackend;
pub use device::{AudioDevice, default_output_device, list_output_devices};
pub use driver::RenderDriver;
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio output device available")]
    NoDevice,

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
