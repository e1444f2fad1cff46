//! Code reference loading: the thin adapter that turns a flat file of
//! `{-1,0,+1}` bytes on disk into the time- and frequency-domain code
//! forms the correlators consume. Generating the codes themselves (Gold
//! codes, PRN tables, ...) is an external collaborator's job (§1); this
//! module only knows how to read one in.

use std::fs;
use std::path::Path;

use crate::cpx::{Cpx16, CpxF};
use crate::engine::Engine;
use crate::error::CoreError;

/// Read a code reference from a flat file of signed bytes, each `-1`,
/// `0`, or `+1`, and widen it to [`Cpx16`] (Q=0; the code is real-valued).
/// Any other byte value is an [`CoreError::InputConstraintViolation`]-style
/// contract violation and is rejected at the boundary rather than
/// silently clamped, since a corrupted code file would otherwise produce
/// a plausible-looking but wrong correlation.
pub fn read_code_file(path: &Path) -> Result<Vec<Cpx16>, CoreError> {
    let raw = fs::read(path)?;
    raw.iter()
        .enumerate()
        .map(|(offset, &b)| {
            let v = b as i8;
            match v {
                -1 | 0 | 1 => Ok(Cpx16::new(v as i16, 0)),
                value => Err(CoreError::InvalidCodeByte { offset, value }),
            }
        })
        .collect()
}

/// Zero-pad (or require exact length of) a time-domain code reference to
/// `n` samples and compute its forward DFT, ready to pass as `code_fft`
/// to [`crate::correlator::corr_fft`] / [`Engine::corr_fft`].
pub fn code_fft(engine: &Engine, code: &[Cpx16], n: usize) -> Result<Vec<CpxF>, CoreError> {
    let code_f: Vec<CpxF> = code.iter().map(|c| CpxF::new(c.i as f32, c.q as f32)).collect();
    engine.forward_code_fft(&code_f, n)
}
