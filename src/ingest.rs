//! Raw IF file ingestion: the boundary adapter that turns the external
//! flat-binary sample format of §6 into a [`SampleBuffer`]. Not part of
//! the numeric core proper, but the only place outside it that needs to
//! know the file's byte layout.

use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use crate::buffer::{Iq, SampleBuffer};
use crate::cpx::Cpx8;
use crate::error::CoreError;

/// Read a window of a raw IF file into a [`SampleBuffer`]. `toff_sec` and
/// `duration_sec` are converted to byte offsets/counts via `fs` and the
/// per-sample byte width implied by `iq` (1 byte for real, 2 for
/// interleaved I/Q). `duration_sec <= 0.0` reads to end of file. A short
/// read (fewer bytes available than requested) is an error, not a
/// truncated buffer.
pub fn read_raw_if_file(
    path: &Path,
    fs: f64,
    iq: Iq,
    toff_sec: f64,
    duration_sec: f64,
) -> Result<SampleBuffer, CoreError> {
    let bytes_per_sample = iq as u64;
    let mut file = File::open(path)?;

    let byte_offset = (fs * toff_sec * bytes_per_sample as f64).round() as u64;
    file.seek(SeekFrom::Start(byte_offset))?;

    let file_len = file.metadata()?.len();
    let remaining = file_len.saturating_sub(byte_offset);

    let requested_bytes = if duration_sec <= 0.0 {
        remaining
    } else {
        (fs * duration_sec * bytes_per_sample as f64).round() as u64
    };

    let mut raw = vec![0u8; requested_bytes as usize];
    file.read_exact(&mut raw).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => CoreError::ShortRead {
            requested: raw.len(),
            available: remaining as usize,
        },
        _ => CoreError::FileIo(e),
    })?;

    Ok(SampleBuffer::from_samples(decode_samples(&raw, iq), iq))
}

/// Decode a flat byte slice into [`Cpx8`] samples per the IQ convention:
/// IQ=1 ingests one byte per real sample (`I=sample, Q=0`); IQ=2 ingests
/// interleaved `(I,Q)` byte pairs.
pub fn decode_samples(raw: &[u8], iq: Iq) -> Vec<Cpx8> {
    match iq {
        Iq::Real => raw.iter().map(|&b| Cpx8::new(b as i8, 0)).collect(),
        Iq::Complex => raw
            .chunks_exact(2)
            .map(|pair| Cpx8::new(pair[0] as i8, pair[1] as i8))
            .collect(),
    }
}
