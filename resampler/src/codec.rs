//! PCM16LE sample conversion.

/// Full-scale divisor used when decoding.
const DECODE_SCALE: f64 = 32768.0;
/// Full-scale multiplier used when encoding.
const ENCODE_SCALE: f64 = 32767.0;

/// Converts a 16-bit sample to a float in `[-1, 1)`.
#[inline]
pub fn normalize(sample: i16) -> f64 {
    sample as f64 / DECODE_SCALE
}

/// Converts a float to a 16-bit sample.
///
/// The value is clamped to `[-1, 1]`, scaled by 32767 and rounded to the
/// nearest integer with ties going towards positive infinity.
#[inline]
pub fn quantize(value: f64) -> i16 {
    let s = value.clamp(-1.0, 1.0) * ENCODE_SCALE;
    (s + 0.5).floor() as i16
}

/// Calls `f(channel, sample)` for every sample of every complete frame in
/// `bytes`, in interleaved order. Returns the number of frames decoded.
///
/// A trailing partial frame is ignored.
pub fn decode_frames<F>(bytes: &[u8], channels: usize, mut f: F) -> usize
where
    F: FnMut(usize, f64),
{
    let frame_bytes = channels * 2;
    let mut frames = 0;
    for frame in bytes.chunks_exact(frame_bytes) {
        for (ch, pair) in frame.chunks_exact(2).enumerate() {
            f(ch, normalize(i16::from_le_bytes([pair[0], pair[1]])));
        }
        frames += 1;
    }
    frames
}

/// Encodes float samples as interleaved PCM16LE bytes.
pub fn encode_samples(samples: &[f64]) -> Vec<u8> {
    let mut out = Vec::with_capacity(samples.len() * 2);
    for &s in samples {
        out.extend_from_slice(&quantize(s).to_le_bytes());
    }
    out
}

/// Decodes PCM16LE bytes to i16 samples, ignoring a trailing odd byte.
pub fn samples_from_bytes(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect()
}

/// Encodes i16 samples as PCM16LE bytes.
pub fn bytes_from_samples(samples: &[i16]) -> Vec<u8> {
    let mut data = Vec::with_capacity(samples.len() * 2);
    for sample in samples {
        data.extend_from_slice(&sample.to_le_bytes());
    }
    data
}
