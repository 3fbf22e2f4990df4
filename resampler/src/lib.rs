//! Streaming sample rate and channel conversion for raw PCM audio.
//!
//! This crate converts interleaved 16-bit signed little-endian PCM from one
//! sample rate and channel count to another using Lanczos-windowed sinc
//! interpolation:
//!
//! - `config`: conversion parameters and stream [`Format`] descriptions
//! - `kernel`: the interpolation kernel
//! - `resampler`: the push-style [`Resampler`] (`feed` chunks, then `finish`)
//! - `io`: `Read`/`Write` adapters for piping a whole stream
//!
//! # Example
//!
//! ```rust
//! use pcm_resampler::{Config, Resampler};
//!
//! // 48kHz stereo to 24kHz mono
//! let config = Config::new(48000.0, 24000.0).with_channels(2, 1);
//! let mut resampler = Resampler::new(config).unwrap();
//!
//! let input = vec![0u8; 4 * 480]; // 10ms of stereo silence
//! let mut output = resampler.feed(&input);
//! output.extend(resampler.finish());
//! assert!(output.iter().all(|&b| b == 0));
//! ```

mod buffer;
pub mod codec;
pub mod config;
mod error;
pub mod io;
pub mod kernel;
mod mapping;
mod resampler;

pub use config::{Config, Format};
pub use error::{ConfigError, ResamplerError};
pub use io::{CopyStats, ResampleReader, ResampleWriter, copy};
pub use mapping::ChannelMap;
pub use resampler::Resampler;
