//! Channel mapping from interpolated input channels to output frames.

/// How per-input-channel interpolated values become an output frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMap {
    /// Stereo to mono: average of the two channels.
    Downmix,
    /// Mono to stereo: the single channel written twice.
    Duplicate,
    /// Any other combination: the first `n` input channels in order.
    ///
    /// `n` is `min(out_channels, in_channels)`, so asking for more channels
    /// than the input has yields fewer than requested.
    Truncate(usize),
}

impl ChannelMap {
    pub fn new(in_channels: usize, out_channels: usize) -> Self {
        match (in_channels, out_channels) {
            (2, 1) => ChannelMap::Downmix,
            (1, 2) => ChannelMap::Duplicate,
            _ => ChannelMap::Truncate(out_channels.min(in_channels)),
        }
    }

    /// Number of channels actually written per output frame.
    pub fn output_channels(&self) -> usize {
        match self {
            ChannelMap::Downmix => 1,
            ChannelMap::Duplicate => 2,
            ChannelMap::Truncate(n) => *n,
        }
    }

    /// Appends one output frame built from `sums`, scaled by `volume`.
    pub fn apply(&self, sums: &[f64], volume: f64, out: &mut Vec<f64>) {
        match self {
            ChannelMap::Downmix => out.push((sums[0] + sums[1]) / 2.0 * volume),
            ChannelMap::Duplicate => {
                let v = sums[0] * volume;
                out.push(v);
                out.push(v);
            }
            ChannelMap::Truncate(n) => out.extend(sums[..*n].iter().map(|s| s * volume)),
        }
    }
}
