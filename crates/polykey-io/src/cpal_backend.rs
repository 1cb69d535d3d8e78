//! cpal-based audio backend.
//!
//! [`CpalBackend`] is the default [`AudioBackend`], covering ALSA (Linux),
//! CoreAudio (macOS) and WASAPI (Windows) through
//! [cpal](https://crates.io/crates/cpal).
//!
//! ```rust,no_run
//! use polykey_io::{AudioBackend, BackendStreamConfig, CpalBackend};
//!
//! # fn main() -> polykey_io::Result<()> {
//! let backend = CpalBackend::new();
//! let stream = backend.build_output_stream(
//!     &BackendStreamConfig::default(),
//!     Box::new(|buffer: &mut [f32]| buffer.fill(0.0)),
//!     Box::new(|err: &str| eprintln!("audio error: {err}")),
//! )?;
//! // Silence plays until `stream` is dropped.
//! # drop(stream);
//! # Ok(())
//! # }
//! ```

use crate::backend::{
    AudioBackend, BackendStreamConfig, ErrorCallback, OutputCallback, StreamHandle,
};
use crate::device::{AudioDevice, device_name, list_host_devices};
use crate::{Error, Result};
use cpal::Host;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

/// cpal-based audio backend holding the platform's default [`Host`].
pub struct CpalBackend {
    host: Host,
}

impl CpalBackend {
    /// Backend on the platform's default audio host.
    pub fn new() -> Self {
        let host = cpal::default_host();
        tracing::info!(host = host.id().name(), "cpal backend initialized");
        Self { host }
    }

    /// Find an output device whose name contains `name` (case-insensitive),
    /// or the default output device.
    fn find_output_device(&self, name: Option<&str>) -> Result<cpal::Device> {
        match name {
            Some(search) => {
                let search_lower = search.to_lowercase();
                let devices = self
                    .host
                    .output_devices()
                    .map_err(|e| Error::Stream(e.to_string()))?;

                for device in devices {
                    if let Ok(dev_name) = device_name(&device)
                        && dev_name.to_lowercase().contains(&search_lower)
                    {
                        tracing::info!(device = %dev_name, "selected output device");
                        return Ok(device);
                    }
                }
                Err(Error::DeviceNotFound(format!(
                    "no output device matching '{search}'"
                )))
            }
            None => self.host.default_output_device().ok_or(Error::NoDevice),
        }
    }
}

impl Default for CpalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CpalBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpalBackend")
            .field("host", &self.host.id().name())
            .finish()
    }
}

impl AudioBackend for CpalBackend {
    fn name(&self) -> &'static str {
        "cpal"
    }

    fn list_devices(&self) -> Result<Vec<AudioDevice>> {
        list_host_devices(&self.host)
    }

    fn default_output_device(&self) -> Result<Option<AudioDevice>> {
        Ok(self
            .host
            .default_output_device()
            .and_then(|d| AudioDevice::from_cpal(&d, true)))
    }

    fn build_output_stream(
        &self,
        config: &BackendStreamConfig,
        mut callback: OutputCallback,
        mut error_callback: ErrorCallback,
    ) -> Result<StreamHandle> {
        if config.channels == 0 {
            return Err(Error::UnsupportedFormat("zero output channels".to_string()));
        }
        let device = self.find_output_device(config.device_name.as_deref())?;

        let stream_config = cpal::StreamConfig {
            channels: config.channels,
            sample_rate: config.sample_rate,
            buffer_size: cpal::BufferSize::Fixed(config.buffer_size),
        };

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    callback(data);
                },
                move |err| {
                    tracing::error!(error = %err, "output stream error");
                    error_callback(&err.to_string());
                },
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        stream.play().map_err(|e| Error::Stream(e.to_string()))?;
        tracing::info!(
            channels = config.channels,
            sample_rate = config.sample_rate,
            buffer_size = config.buffer_size,
            "output stream started"
        );

        Ok(StreamHandle::new(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpal_backend_name() {
        let backend = CpalBackend::new();
        assert_eq!(backend.name(), "cpal");
    }

    #[test]
    fn test_cpal_backend_list_devices() {
        let backend = CpalBackend::new();
        // Should not panic; device availability depends on the system.
        assert!(backend.list_devices().is_ok());
    }

    #[test]
    fn test_unknown_device_is_reported() {
        let backend = CpalBackend::new();
        let config = BackendStreamConfig {
            device_name: Some("no-such-device-7f3a".to_string()),
            ..Default::default()
        };
        let result = backend.build_output_stream(
            &config,
            Box::new(|_: &mut [f32]| {}),
            Box::new(|_: &str| {}),
        );
        assert!(matches!(
            result,
            Err(Error::DeviceNotFound(_) | Error::Stream(_))
        ));
    }

    #[test]
    fn test_zero_channels_rejected() {
        let backend = CpalBackend::new();
        let config = BackendStreamConfig {
            channels: 0,
            ..Default::default()
        };
        let result = backend.build_output_stream(
            &config,
            Box::new(|_: &mut [f32]| {}),
            Box::new(|_: &str| {}),
        );
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }
}
