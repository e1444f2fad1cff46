//! The carrier lookup table: the precomputed `round(CSCALE * sample *
//! exp(-2*pi*i*phase/NTBL))` values the mixer's hot loop indexes into
//! instead of evaluating trigonometric functions per sample.

use once_cell::sync::Lazy;

use crate::constants::{CSCALE, NTBL};
use crate::cpx::{Cpx16, Cpx8};

/// Read-only table of size 256 * NTBL, keyed by `(sample_byte << 8) |
/// phase_idx`. Built once; immutable thereafter.
pub struct CarrierLut {
    table: Vec<Cpx16>,
}

impl CarrierLut {
    pub fn new() -> Self {
        let mut table = vec![Cpx16::default(); 256 * NTBL];
        for j in 0..256usize {
            let sample = Cpx8::from_key(j as u8);
            for i in 0..NTBL {
                let theta = -2.0 * crate::constants::PI * i as f64 / NTBL as f64;
                let (sin_t, cos_t) = theta.sin_cos();
                // (I + jQ) * (cos + j sin) = (I*cos - Q*sin) + j(I*sin + Q*cos)
                let re = CSCALE * (sample.i as f64 * cos_t - sample.q as f64 * sin_t);
                let im = CSCALE * (sample.i as f64 * sin_t + sample.q as f64 * cos_t);
                table[(j << 8) | i] = Cpx16::new(re.round() as i16, im.round() as i16);
            }
        }
        Self { table }
    }

    #[inline]
    pub fn lookup(&self, sample_byte: u8, phase_idx: u8) -> Cpx16 {
        self.table[((sample_byte as usize) << 8) | phase_idx as usize]
    }
}

impl Default for CarrierLut {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide default LUT for call sites that don't carry an [`crate::engine::Engine`].
pub static DEFAULT_LUT: Lazy<CarrierLut> = Lazy::new(CarrierLut::new);
