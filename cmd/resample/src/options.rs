//! Resolves the conversion config from an optional YAML file and flags.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use pcm_resampler::Config;

/// Conversion parameters given on the command line.
///
/// Each flag overrides the corresponding value from `--config`.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Input sample rate in Hz
    #[arg(long)]
    pub in_rate: Option<f64>,

    /// Output sample rate in Hz
    #[arg(long)]
    pub out_rate: Option<f64>,

    /// Interleaved input channels [default: 1]
    #[arg(long)]
    pub in_channels: Option<usize>,

    /// Output channels [default: 1]
    #[arg(long)]
    pub out_channels: Option<usize>,

    /// Interpolation kernel half-width in input samples [default: 8]
    #[arg(long)]
    pub filter_window: Option<usize>,

    /// Output amplitude scale factor [default: 1.0]
    #[arg(long, allow_hyphen_values = true)]
    pub volume: Option<f64>,
}

/// Loads a YAML config file.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_yaml::from_slice(&data).with_context(|| format!("failed to parse {}", path.display()))
}

/// Merges `args` over `base` (if any) and validates the result.
pub fn resolve(base: Option<Config>, args: &ConfigArgs) -> Result<Config> {
    let mut config = match base {
        Some(config) => config,
        None => {
            let in_rate = args.in_rate.ok_or_else(|| anyhow!("--in-rate is required"))?;
            let out_rate = args.out_rate.ok_or_else(|| anyhow!("--out-rate is required"))?;
            Config::new(in_rate, out_rate)
        }
    };

    if let Some(v) = args.in_rate {
        config.in_rate = v;
    }
    if let Some(v) = args.out_rate {
        config.out_rate = v;
    }
    if let Some(v) = args.in_channels {
        config.in_channels = v;
    }
    if let Some(v) = args.out_channels {
        config.out_channels = v;
    }
    if let Some(v) = args.filter_window {
        config.filter_window = v;
    }
    if let Some(v) = args.volume {
        config.volume = v;
    }

    config.validate().context("invalid resampler config")?;
    Ok(config)
}
