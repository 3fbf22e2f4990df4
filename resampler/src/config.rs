//! Resampler configuration and PCM stream formats.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default half-width of the interpolation kernel, in input samples.
pub const DEFAULT_FILTER_WINDOW: usize = 8;

/// Bytes per sample for 16-bit PCM.
pub const SAMPLE_BYTES: usize = 2;

/// Conversion parameters for a [`Resampler`](crate::Resampler).
///
/// Serialized field names follow the camelCase option names
/// (`inRate`, `outRate`, `inChannels`, `outChannels`, `filterWindow`,
/// `volume`); everything except the two rates is optional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Input sample rate in Hz.
    pub in_rate: f64,
    /// Output sample rate in Hz.
    pub out_rate: f64,
    /// Interleaved channels per input frame.
    #[serde(default = "default_channels")]
    pub in_channels: usize,
    /// Requested channels per output frame.
    #[serde(default = "default_channels")]
    pub out_channels: usize,
    /// Kernel half-width in input samples.
    #[serde(default = "default_filter_window")]
    pub filter_window: usize,
    /// Output amplitude scale factor.
    #[serde(default = "default_volume")]
    pub volume: f64,
}

fn default_channels() -> usize {
    1
}

fn default_filter_window() -> usize {
    DEFAULT_FILTER_WINDOW
}

fn default_volume() -> f64 {
    1.0
}

impl Config {
    /// Creates a mono-to-mono configuration with default window and volume.
    pub fn new(in_rate: f64, out_rate: f64) -> Self {
        Self {
            in_rate,
            out_rate,
            in_channels: default_channels(),
            out_channels: default_channels(),
            filter_window: default_filter_window(),
            volume: default_volume(),
        }
    }

    /// Creates a configuration converting between two stream formats.
    pub fn from_formats(src: Format, dst: Format) -> Self {
        Self::new(src.sample_rate as f64, dst.sample_rate as f64)
            .with_channels(src.channels as usize, dst.channels as usize)
    }

    pub fn with_channels(mut self, in_channels: usize, out_channels: usize) -> Self {
        self.in_channels = in_channels;
        self.out_channels = out_channels;
        self
    }

    pub fn with_filter_window(mut self, filter_window: usize) -> Self {
        self.filter_window = filter_window;
        self
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }

    /// Input-sample advance per output sample (`in_rate / out_rate`).
    pub fn ratio(&self) -> f64 {
        self.in_rate / self.out_rate
    }

    /// Bytes per input frame.
    pub fn in_frame_bytes(&self) -> usize {
        self.in_channels * SAMPLE_BYTES
    }

    /// Nominal output length for `input_len` input bytes, ignoring filter
    /// latency and the channel count actually produced.
    pub fn nominal_output_len(&self, input_len: u64) -> f64 {
        input_len as f64 * (self.out_rate * self.out_channels as f64)
            / (self.in_rate * self.in_channels as f64)
    }

    /// Checks every parameter, returning the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_rate("in_rate", self.in_rate)?;
        check_rate("out_rate", self.out_rate)?;
        check_channels("in_channels", self.in_channels)?;
        check_channels("out_channels", self.out_channels)?;
        if self.filter_window < 1 {
            return Err(ConfigError::InvalidFilterWindow(self.filter_window));
        }
        if !self.volume.is_finite() {
            return Err(ConfigError::InvalidVolume(self.volume));
        }
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    // NaN fails the comparison as well.
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}

fn check_channels(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::InvalidChannels { name, value });
    }
    Ok(())
}

/// Describes one side of a 16-bit signed little-endian PCM stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Format {
    /// Sample rate in Hz (e.g., 24000, 48000).
    pub sample_rate: u32,
    /// Interleaved channels per frame.
    pub channels: u16,
}

impl Format {
    pub const fn new(sample_rate: u32, channels: u16) -> Self {
        Self { sample_rate, channels }
    }

    pub const fn mono(sample_rate: u32) -> Self {
        Self::new(sample_rate, 1)
    }

    pub const fn stereo(sample_rate: u32) -> Self {
        Self::new(sample_rate, 2)
    }

    /// Returns the number of bytes per frame.
    pub fn frame_bytes(&self) -> usize {
        self.channels as usize * SAMPLE_BYTES
    }

    /// Returns the number of bytes per second.
    pub fn bytes_rate(&self) -> u64 {
        self.sample_rate as u64 * self.frame_bytes() as u64
    }

    /// Returns the frame-aligned byte count covering `duration`.
    pub fn bytes_in_duration(&self, duration: Duration) -> u64 {
        let frames = (self.sample_rate as u128 * duration.as_nanos()) / 1_000_000_000;
        frames as u64 * self.frame_bytes() as u64
    }

    /// Returns the playback duration of `bytes` bytes.
    pub fn duration(&self, bytes: u64) -> Duration {
        let rate = self.bytes_rate();
        if rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos((bytes as u128 * 1_000_000_000 / rate as u128) as u64)
    }

    /// Returns the nominal output length for `input_len` bytes converted
    /// from `src` to `dst`, ignoring filter latency.
    pub fn expected_output_len(input_len: u64, src: Format, dst: Format) -> f64 {
        Config::from_formats(src, dst).nominal_output_len(input_len)
    }
}

// Common format presets
impl Format {
    /// 16kHz mono (common for speech)
    pub const MONO_16K: Format = Format::mono(16000);
    /// 24kHz mono
    pub const MONO_24K: Format = Format::mono(24000);
    /// 48kHz mono
    pub const MONO_48K: Format = Format::mono(48000);
    /// 44.1kHz stereo (CD quality)
    pub const STEREO_44K: Format = Format::stereo(44100);
    /// 48kHz stereo
    pub const STEREO_48K: Format = Format::stereo(48000);
}
