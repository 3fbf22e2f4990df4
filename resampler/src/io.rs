//! Byte-stream adapters around [`Resampler`].
//!
//! [`Resampler::feed`] only sees whole frames of the chunk it is given. The
//! adapters here sit between arbitrary `Read`/`Write` boundaries and the
//! resampler, carrying a split frame over to the next chunk so that only a
//! partial frame at the very end of the stream is lost.

use std::io::{self, Read, Write};

use tracing::{debug, trace};

use crate::config::Config;
use crate::error::ResamplerError;
use crate::resampler::Resampler;

/// Read size used by [`ResampleReader`] and [`copy`].
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Holds bytes of an incomplete frame between chunks.
#[derive(Debug)]
struct FrameCarry {
    frame_bytes: usize,
    pending: Vec<u8>,
}

impl FrameCarry {
    fn new(frame_bytes: usize) -> Self {
        Self {
            frame_bytes,
            pending: Vec::with_capacity(frame_bytes),
        }
    }

    /// Feeds all complete frames of `pending + bytes` and keeps the rest.
    fn feed(&mut self, resampler: &mut Resampler, bytes: &[u8]) -> Vec<u8> {
        if self.pending.is_empty() {
            let aligned = bytes.len() - bytes.len() % self.frame_bytes;
            self.pending.extend_from_slice(&bytes[aligned..]);
            return resampler.feed(&bytes[..aligned]);
        }

        self.pending.extend_from_slice(bytes);
        let aligned = self.pending.len() - self.pending.len() % self.frame_bytes;
        let out = resampler.feed(&self.pending[..aligned]);
        self.pending.drain(..aligned);
        out
    }

    /// Finishes the resampler; an incomplete final frame is discarded.
    fn finish(&mut self, resampler: Resampler) -> Vec<u8> {
        if !self.pending.is_empty() {
            trace!(bytes = self.pending.len(), "discarding incomplete final frame");
            self.pending.clear();
        }
        resampler.finish()
    }
}

/// Byte totals of a completed [`copy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub bytes_read: u64,
    pub bytes_written: u64,
}

/// Converts everything from `r` into `w` and returns the byte totals.
///
/// Reads in [`DEFAULT_CHUNK_SIZE`] chunks until EOF, then drains the filter
/// tail. Interrupted reads are retried.
pub fn copy<R, W>(r: &mut R, w: &mut W, config: Config) -> Result<CopyStats, ResamplerError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut resampler = Resampler::new(config)?;
    let mut carry = FrameCarry::new(config.in_frame_bytes());
    let mut buf = vec![0u8; DEFAULT_CHUNK_SIZE];
    let mut stats = CopyStats::default();

    loop {
        let n = match r.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        stats.bytes_read += n as u64;

        let out = carry.feed(&mut resampler, &buf[..n]);
        w.write_all(&out)?;
        stats.bytes_written += out.len() as u64;
    }

    let tail = carry.finish(resampler);
    w.write_all(&tail)?;
    w.flush()?;
    stats.bytes_written += tail.len() as u64;

    debug!(
        bytes_read = stats.bytes_read,
        bytes_written = stats.bytes_written,
        "copy complete"
    );
    Ok(stats)
}

/// Wraps an `io::Read` of input PCM and reads resampled PCM from it.
///
/// The resampler is finished when the inner reader reports EOF; after the
/// tail has been served every read returns `Ok(0)`.
pub struct ResampleReader<R: Read> {
    inner: R,
    /// None once the tail has been produced.
    resampler: Option<Resampler>,
    carry: FrameCarry,
    read_buf: Vec<u8>,
    /// Produced bytes not yet returned to the caller.
    leftover: Vec<u8>,
    leftover_pos: usize,
    bytes_read: u64,
}

impl<R: Read> ResampleReader<R> {
    pub fn new(inner: R, config: Config) -> Result<Self, ResamplerError> {
        Self::with_chunk_size(inner, config, DEFAULT_CHUNK_SIZE)
    }

    /// Like [`new`](Self::new), reading at most `chunk_size` bytes from
    /// `inner` per call.
    pub fn with_chunk_size(
        inner: R,
        config: Config,
        chunk_size: usize,
    ) -> Result<Self, ResamplerError> {
        let resampler = Resampler::new(config)?;
        Ok(Self {
            inner,
            resampler: Some(resampler),
            carry: FrameCarry::new(config.in_frame_bytes()),
            read_buf: vec![0u8; chunk_size.max(1)],
            leftover: Vec::new(),
            leftover_pos: 0,
            bytes_read: 0,
        })
    }

    /// Input bytes consumed from the inner reader so far.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Returns true once the inner reader hit EOF and the tail was produced.
    pub fn is_finished(&self) -> bool {
        self.resampler.is_none()
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for ResampleReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        loop {
            // First, return any leftover data
            if self.leftover_pos < self.leftover.len() {
                let remaining = &self.leftover[self.leftover_pos..];
                let n = remaining.len().min(buf.len());
                buf[..n].copy_from_slice(&remaining[..n]);
                self.leftover_pos += n;
                return Ok(n);
            }

            let Some(resampler) = self.resampler.as_mut() else {
                return Ok(0);
            };

            let n = match self.inner.read(&mut self.read_buf) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            self.bytes_read += n as u64;

            self.leftover = if n == 0 {
                match self.resampler.take() {
                    Some(resampler) => self.carry.finish(resampler),
                    None => Vec::new(),
                }
            } else {
                self.carry.feed(resampler, &self.read_buf[..n])
            };
            self.leftover_pos = 0;
        }
    }
}

/// Wraps an `io::Write` of output PCM; bytes written to it are input PCM.
///
/// Call [`finish`](Self::finish) after the last write to emit the filter
/// tail. Dropping the writer without finishing loses the tail.
pub struct ResampleWriter<W: Write> {
    inner: W,
    resampler: Resampler,
    carry: FrameCarry,
    bytes_written: u64,
}

impl<W: Write> ResampleWriter<W> {
    pub fn new(inner: W, config: Config) -> Result<Self, ResamplerError> {
        let resampler = Resampler::new(config)?;
        Ok(Self {
            inner,
            resampler,
            carry: FrameCarry::new(config.in_frame_bytes()),
            bytes_written: 0,
        })
    }

    /// Output bytes written to the inner writer so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Writes the filter tail, flushes, and returns the inner writer.
    pub fn finish(self) -> io::Result<W> {
        let Self {
            mut inner,
            resampler,
            mut carry,
            bytes_written,
        } = self;

        let tail = carry.finish(resampler);
        inner.write_all(&tail)?;
        inner.flush()?;
        debug!(bytes_written = bytes_written + tail.len() as u64, "writer finished");
        Ok(inner)
    }
}

impl<W: Write> Write for ResampleWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let out = self.carry.feed(&mut self.resampler, buf);
        self.inner.write_all(&out)?;
        self.bytes_written += out.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
