//! resample - convert raw PCM16LE audio between sample rates and channel counts.

mod options;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pcm_resampler::{Config, ResampleReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use options::ConfigArgs;

/// Convert raw 16-bit little-endian PCM between sample rates and channel counts.
///
/// Input and output are headerless interleaved PCM16LE. Use `-` (or omit the
/// path) for stdin/stdout.
///
/// Examples:
///   resample --in-rate 48000 --out-rate 24000 --in-channels 2 in.s16le out.s16le
///   resample --config down.yaml --volume 0.5 < in.s16le > out.s16le
#[derive(Parser, Debug)]
#[command(name = "resample")]
#[command(about = "PCM16LE sample rate and channel converter")]
#[command(version)]
struct Cli {
    /// Input file (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    output: Option<PathBuf>,

    /// YAML config file (inRate, outRate, inChannels, outChannels, filterWindow, volume)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    params: ConfigArgs,

    /// Bytes read from the input per step
    #[arg(long, default_value_t = 4096)]
    chunk_size: usize,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn is_stdio(path: &Option<PathBuf>) -> bool {
    path.as_ref().is_none_or(|p| p.as_os_str() == "-")
}

fn open_input(path: &Option<PathBuf>) -> Result<Box<dyn Read>> {
    match path {
        Some(p) if !is_stdio(path) => {
            let file = File::open(p).with_context(|| format!("failed to open {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

fn open_output(path: &Option<PathBuf>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) if !is_stdio(path) => {
            let file =
                File::create(p).with_context(|| format!("failed to create {}", p.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

fn run(cli: &Cli, config: Config) -> Result<()> {
    let input = open_input(&cli.input)?;
    let mut output = open_output(&cli.output)?;

    let mut reader = ResampleReader::with_chunk_size(input, config, cli.chunk_size)?;
    let written = io::copy(&mut reader, &mut output).context("resampling failed")?;
    output.flush().context("failed to flush output")?;

    let read = reader.bytes_read();
    let expected = config.nominal_output_len(read).round();
    info!(bytes_in = read, bytes_out = written, expected, "done");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let base = cli.config.as_ref().map(options::load_config).transpose()?;
    let config = options::resolve(base, &cli.params)?;
    debug!(?config, "resolved config");

    run(&cli, config)
}
