//! Output device discovery via cpal.

use crate::Result;
use cpal::Device;
use cpal::traits::{DeviceTrait, HostTrait};

/// Fallback when a device does not report a default configuration.
const FALLBACK_SAMPLE_RATE: u32 = 44_100;

/// Extract device name via `description()` (cpal 0.17+).
pub(crate) fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Audio output device information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioDevice {
    /// Human-readable device name.
    pub name: String,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
    /// Default channel count.
    pub default_channels: u16,
    /// Whether this is the host's default output.
    pub is_default: bool,
}

impl AudioDevice {
    pub(crate) fn from_cpal(device: &Device, is_default: bool) -> Option<Self> {
        let name = device_name(device).ok()?;
        let (default_sample_rate, default_channels) = device
            .default_output_config()
            .map(|c| (c.sample_rate(), c.channels()))
            .unwrap_or((FALLBACK_SAMPLE_RATE, 2));
        Some(Self {
            name,
            default_sample_rate,
            default_channels,
            is_default,
        })
    }
}

/// List every output device of the default host.
pub fn list_output_devices() -> Result<Vec<AudioDevice>> {
    list_host_devices(&cpal::default_host())
}

pub(crate) fn list_host_devices(host: &cpal::Host) -> Result<Vec<AudioDevice>> {
    let default_name = host
        .default_output_device()
        .and_then(|d| device_name(&d).ok());

    let mut devices = Vec::new();
    if let Ok(outputs) = host.output_devices() {
        for device in outputs {
            let Ok(name) = device_name(&device) else {
                continue;
            };
            if devices.iter().any(|d: &AudioDevice| d.name == name) {
                continue;
            }
            let is_default = default_name.as_deref() == Some(name.as_str());
            if let Some(info) = AudioDevice::from_cpal(&device, is_default) {
                devices.push(info);
            }
        }
    }

    Ok(devices)
}

/// The default host's default output device, if any.
pub fn default_output_device() -> Result<Option<AudioDevice>> {
    Ok(cpal::default_host()
        .default_output_device()
        .and_then(|d| AudioDevice::from_cpal(&d, true)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_output_devices_does_not_fail() {
        // Availability depends on the machine; enumeration itself must succeed.
        let devices = list_output_devices().unwrap();
        assert!(devices.iter().filter(|d| d.is_default).count() <= 1);
    }
}
