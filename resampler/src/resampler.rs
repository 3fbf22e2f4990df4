//! Streaming windowed-sinc resampler.

use tracing::{debug, trace};

use crate::buffer::ChannelBuffer;
use crate::codec;
use crate::config::Config;
use crate::error::ConfigError;
use crate::kernel::{lanczos_window, sinc};
use crate::mapping::ChannelMap;

/// Push-style PCM16LE resampler.
///
/// Feed input chunks in arrival order with [`feed`](Self::feed); each call
/// returns whatever output became computable. Call [`finish`](Self::finish)
/// once at end of input to drain the filter tail. Chunks may have any size,
/// including zero.
///
/// Output lags input by roughly `filter_window` input samples, since an
/// output sample is only produced once the kernel's full right-hand support
/// has arrived.
///
/// # Example
///
/// ```rust
/// use pcm_resampler::{Config, Resampler};
///
/// let mut r = Resampler::new(Config::new(24000.0, 48000.0).with_channels(1, 2)).unwrap();
/// let mut out = Vec::new();
/// for chunk in [vec![0u8; 100], vec![0u8; 60]] {
///     out.extend(r.feed(&chunk));
/// }
/// out.extend(r.finish());
/// ```
#[derive(Debug)]
pub struct Resampler {
    config: Config,
    ratio: f64,
    /// Fractional read position, relative to the buffers' current head.
    phase: f64,
    buffers: Vec<ChannelBuffer>,
    map: ChannelMap,
    /// Per-channel interpolated values for the frame being built.
    sums: Vec<f64>,
}

impl Resampler {
    /// Creates a resampler, validating `config` first.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let ratio = config.ratio();
        let map = ChannelMap::new(config.in_channels, config.out_channels);
        if map.output_channels() < config.out_channels {
            debug!(
                in_channels = config.in_channels,
                out_channels = config.out_channels,
                produced = map.output_channels(),
                "requested more output channels than the input provides"
            );
        }
        debug!(
            in_rate = config.in_rate,
            out_rate = config.out_rate,
            ratio,
            filter_window = config.filter_window,
            ?map,
            volume = config.volume,
            "resampler created"
        );

        Ok(Self {
            config,
            ratio,
            phase: config.filter_window as f64,
            buffers: vec![ChannelBuffer::new(); config.in_channels],
            map,
            sums: vec![0.0; config.in_channels],
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Input samples consumed per output frame.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Current fractional read position within the buffered window.
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Number of input frames currently retained.
    pub fn buffered_frames(&self) -> usize {
        self.buffers[0].len()
    }

    pub fn channel_map(&self) -> ChannelMap {
        self.map
    }

    /// Consumes one input chunk and returns the output it makes available.
    ///
    /// Bytes are interleaved PCM16LE frames of `in_channels` samples. A
    /// trailing partial frame is dropped. The result may be empty.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<u8> {
        let buffers = &mut self.buffers;
        let frames = codec::decode_frames(bytes, self.config.in_channels, |ch, s| {
            buffers[ch].push(s)
        });
        let dropped = bytes.len() - frames * self.config.in_frame_bytes();
        if dropped > 0 {
            trace!(dropped, "ignoring trailing partial frame");
        }
        self.process(frames)
    }

    /// Drains the filter tail and returns the final output.
    ///
    /// Pads every channel with `filter_window` zero samples so the last input
    /// samples are fully represented, then runs one more emit pass.
    pub fn finish(mut self) -> Vec<u8> {
        for buf in &mut self.buffers {
            buf.pad(self.config.filter_window);
        }
        let out = self.process(0);
        debug!(bytes = out.len(), "resampler finished");
        out
    }

    /// Emits every computable output frame, trims the consumed history and
    /// encodes the result.
    fn process(&mut self, frames_in: usize) -> Vec<u8> {
        let window = self.config.filter_window as f64;
        let mut out = Vec::new();

        while self.phase + window <= self.buffers[0].len() as f64 {
            self.interpolate();
            self.map.apply(&self.sums, self.config.volume, &mut out);
            self.phase += self.ratio;
        }

        let trimmed = self.trim();
        trace!(
            frames_in,
            frames_out = out.len() / self.map.output_channels(),
            trimmed,
            phase = self.phase,
            "processed chunk"
        );

        codec::encode_samples(&out)
    }

    /// Fills `sums` with each channel's kernel sum at the current phase.
    fn interpolate(&mut self) {
        let pos = self.phase;
        let a = self.config.filter_window as f64;
        let window = self.config.filter_window as i64;
        let i0 = pos.floor() as i64;

        for (buf, sum) in self.buffers.iter().zip(self.sums.iter_mut()) {
            let mut acc = 0.0;
            for k in (i0 - window + 1)..=(i0 + window) {
                let x = pos - k as f64;
                acc += buf.get(k) * sinc(x) * lanczos_window(x, a);
            }
            *sum = acc;
        }
    }

    /// Drops history that can no longer reach the kernel and rebases phase.
    /// Returns the number of samples removed per channel.
    fn trim(&mut self) -> usize {
        let drop = self.phase.floor() as i64 - self.config.filter_window as i64;
        if drop <= 0 {
            return 0;
        }
        // With very large ratios the cursor can run past the buffered data;
        // only what is buffered can be removed.
        let drop = (drop as usize).min(self.buffers[0].len());
        for buf in &mut self.buffers {
            buf.trim_front(drop);
        }
        self.phase -= drop as f64;
        drop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{bytes_from_samples, samples_from_bytes};

    fn mono(in_rate: f64, out_rate: f64) -> Resampler {
        Resampler::new(Config::new(in_rate, out_rate)).unwrap()
    }

    #[test]
    fn test_new_initial_state() {
        let r = Resampler::new(Config::new(48000.0, 24000.0).with_channels(2, 1)).unwrap();
        assert_eq!(r.ratio(), 2.0);
        assert_eq!(r.phase(), 8.0);
        assert_eq!(r.buffered_frames(), 0);
        assert_eq!(r.channel_map(), ChannelMap::Downmix);
        assert_eq!(r.config().in_channels, 2);
    }

    #[test]
    fn test_new_invalid_config() {
        let err = Resampler::new(Config::new(0.0, 24000.0)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidRate { name: "in_rate", .. }));

        let err = Resampler::new(Config::new(1.0, 1.0).with_filter_window(0)).unwrap_err();
        assert_eq!(err, ConfigError::InvalidFilterWindow(0));

        let err = Resampler::new(Config::new(1.0, 1.0).with_channels(0, 1)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidChannels { .. }));
    }

    #[test]
    fn test_feed_empty() {
        let mut r = mono(16000.0, 16000.0);
        assert!(r.feed(&[]).is_empty());
        assert_eq!(r.buffered_frames(), 0);
    }

    #[test]
    fn test_feed_waits_for_kernel_support() {
        let mut r = mono(16000.0, 16000.0);
        // phase starts at 8 and needs phase + 8 samples buffered
        let out = r.feed(&bytes_from_samples(&[0; 15]));
        assert!(out.is_empty());
        let out = r.feed(&bytes_from_samples(&[0; 1]));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_feed_drops_partial_frame() {
        let mut r = Resampler::new(Config::new(8000.0, 8000.0).with_channels(2, 2)).unwrap();
        let mut bytes = bytes_from_samples(&[1, 2, 3, 4]);
        bytes.extend_from_slice(&[9, 9, 9]);
        r.feed(&bytes);
        assert_eq!(r.buffered_frames(), 2);
    }

    #[test]
    fn test_identity_reproduces_impulse() {
        let mut r = mono(8000.0, 8000.0);
        let mut input = vec![0i16; 40];
        input[10] = 16384;
        let mut out = r.feed(&bytes_from_samples(&input));
        out.extend(r.finish());
        let samples = samples_from_bytes(&out);

        // Integer phases sample the kernel at its zero crossings, so an
        // impulse comes back as a single sample.
        let nonzero: Vec<(usize, i16)> = samples
            .iter()
            .enumerate()
            .filter(|(_, s)| **s != 0)
            .map(|(i, s)| (i, *s))
            .collect();
        assert_eq!(nonzero.len(), 1);
        // 0.5 * 32767 = 16383.5 rounds up
        assert_eq!(nonzero[0].1, 16384);
    }

    #[test]
    fn test_identity_latency() {
        let mut r = mono(8000.0, 8000.0);
        let input: Vec<i16> = (0..64).map(|i| (i * 100) as i16).collect();
        let mut out = r.feed(&bytes_from_samples(&input));
        out.extend(r.finish());
        let samples = samples_from_bytes(&out);

        // The first output is interpolated at input index 8.
        let expected = (800.0 / 32768.0 * 32767.0_f64 + 0.5).floor() as i16;
        assert_eq!(samples[0], expected);
        assert_eq!(samples.len(), 64 - 8 + 1);
    }

    #[test]
    fn test_trim_bounds_buffer() {
        let mut r = mono(48000.0, 24000.0);
        for _ in 0..100 {
            r.feed(&bytes_from_samples(&[100; 480]));
            assert!(r.buffered_frames() <= 480 + 2 * 8 + 2);
        }
        assert!(r.phase() >= 8.0 && r.phase() < 10.0);
    }

    #[test]
    fn test_trim_large_ratio_keeps_phase_consistent() {
        // 100 input samples per output sample, tiny chunks.
        let mut r = mono(100.0, 1.0);
        let mut produced = 0;
        for _ in 0..100 {
            produced += r.feed(&bytes_from_samples(&[0; 20])).len() / 2;
            assert!(r.phase() >= 0.0);
        }
        produced += r.finish().len() / 2;
        // 2000 input samples at ratio 100
        assert!((19..=21).contains(&produced), "produced {}", produced);
    }

    #[test]
    fn test_finish_drains_tail() {
        let mut r = mono(16000.0, 16000.0);
        let out = r.feed(&bytes_from_samples(&[0; 8]));
        assert!(out.is_empty());
        // 8 samples + 8 padding: one output at phase 8
        let out = r.finish();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_finish_without_input() {
        let r = mono(48000.0, 24000.0);
        assert!(r.finish().is_empty());
    }

    #[test]
    fn test_stereo_to_mono_averages() {
        let cfg = Config::new(8000.0, 8000.0).with_channels(2, 1);
        let mut r = Resampler::new(cfg).unwrap();
        let frames: Vec<i16> = (0..32).flat_map(|_| [8192i16, -4096]).collect();
        let out = r.feed(&bytes_from_samples(&frames));
        let samples = samples_from_bytes(&out);
        assert!(!samples.is_empty());
        // (0.25 + -0.125) / 2 = 0.0625 -> 2047.9375 -> 2048
        assert_eq!(samples[0], 2048);
    }

    #[test]
    fn test_mono_to_stereo_duplicates() {
        let cfg = Config::new(8000.0, 16000.0).with_channels(1, 2);
        let mut r = Resampler::new(cfg).unwrap();
        let input: Vec<i16> = (0..64).map(|i| ((i * 37) % 200 - 100) as i16).collect();
        let mut out = r.feed(&bytes_from_samples(&input));
        out.extend(r.finish());
        for frame in out.chunks_exact(4) {
            assert_eq!(frame[..2], frame[2..]);
        }
    }

    #[test]
    fn test_volume_scales_output() {
        let input = bytes_from_samples(&[16384; 32]);
        let mut full = mono(8000.0, 8000.0);
        let mut half = Resampler::new(Config::new(8000.0, 8000.0).with_volume(0.5)).unwrap();
        let a = samples_from_bytes(&full.feed(&input));
        let b = samples_from_bytes(&half.feed(&input));
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert!(((*x as f64) * 0.5 - *y as f64).abs() <= 1.0);
        }
    }

    #[test]
    fn test_output_clamped() {
        let mut r = Resampler::new(Config::new(8000.0, 8000.0).with_volume(4.0)).unwrap();
        let out = samples_from_bytes(&r.feed(&bytes_from_samples(&[i16::MIN; 32])));
        assert!(!out.is_empty());
        assert!(out.iter().all(|&s| s == -32767));
    }
}
