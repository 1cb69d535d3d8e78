//! Pluggable audio backend abstraction.
//!
//! [`AudioBackend`] decouples the synthesizer from any specific platform
//! audio API. The default implementation wraps
//! [cpal](https://crates.io/crates/cpal); tests and offline tools drive a
//! [`RenderDriver`](crate::RenderDriver) directly instead.
//!
//! ```text
//! ┌──────────────────────────────────┐
//! │   polykey play (input thread)    │
//! └──────────────┬───────────────────┘
//!                │ AudioBackend::build_output_stream
//!                ▼
//! ┌──────────────────────────────────┐
//! │ CpalBackend ─► audio thread      │
//! │   OutputCallback(&mut [f32])     │
//! │     └─► RenderDriver ─► Mixer    │
//! └──────────────────────────────────┘
//! ```
//!
//! Callbacks are boxed closures rather than generic parameters, so the trait
//! stays object-safe and the backend can be chosen at runtime. Streams are
//! returned as a type-erased [`StreamHandle`] that stops playback on drop.

use crate::{AudioDevice, Result};

/// Configuration for building an output stream.
///
/// Defaults match the synthesizer's reference setup: 44.1 kHz mono with a
/// 512-frame buffer on the system default device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendStreamConfig {
    /// Requested sample rate in Hz.
    pub sample_rate: u32,
    /// Preferred buffer size in frames.
    pub buffer_size: u32,
    /// Number of interleaved output channels.
    pub channels: u16,
    /// Optional device name filter (system default if `None`).
    pub device_name: Option<String>,
}

impl Default for BackendStreamConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            buffer_size: 512,
            channels: 1,
            device_name: None,
        }
    }
}

/// Type-erased audio stream handle.
///
/// The stream is active while this handle exists; dropping it stops
/// playback.
pub struct StreamHandle {
    _inner: Box<dyn Send>,
}

impl StreamHandle {
    /// Wrap a backend-specific stream object, keeping it alive until drop.
    pub fn new<T: Send + 'static>(stream: T) -> Self {
        Self {
            _inner: Box::new(stream),
        }
    }
}

impl std::fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamHandle").finish_non_exhaustive()
    }
}

/// Audio output callback.
///
/// Runs on the real-time audio thread and fills a buffer of interleaved f32
/// samples (`frames * channels` long). It must not allocate or block beyond
/// the note registry's short critical section.
pub type OutputCallback = Box<dyn FnMut(&mut [f32]) + Send>;

/// Error callback, invoked with a human-readable message when the backend
/// reports a streaming error.
pub type ErrorCallback = Box<dyn FnMut(&str) + Send>;

/// Pluggable audio output backend.
///
/// Object-safe, so front ends can hold a `Box<dyn AudioBackend>`.
pub trait AudioBackend: Send {
    /// Human-readable name of this backend (e.g., "cpal").
    fn name(&self) -> &str;

    /// List the available output devices.
    fn list_devices(&self) -> Result<Vec<AudioDevice>>;

    /// The default output device, if any.
    fn default_output_device(&self) -> Result<Option<AudioDevice>>;

    /// Build and start an output stream.
    ///
    /// `callback` is invoked on the audio thread for every buffer. The
    /// returned [`StreamHandle`] keeps the stream alive.
    fn build_output_stream(
        &self,
        config: &BackendStreamConfig,
        callback: OutputCallback,
        error_callback: ErrorCallback,
    ) -> Result<StreamHandle>;

    /// Sample rate the backend will actually run at for `config`.
    ///
    /// Defaults to the requested rate.
    fn actual_sample_rate(&self, config: &BackendStreamConfig) -> u32 {
        config.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BackendStreamConfig::default();
        assert_eq!(config.sample_rate, 44_100);
        assert_eq!(config.buffer_size, 512);
        assert_eq!(config.channels, 1);
        assert!(config.device_name.is_none());
    }

    #[test]
    fn test_stream_handle_debug() {
        let handle = StreamHandle::new(42u32);
        assert!(format!("{handle:?}").contains("StreamHandle"));
    }
}
