//! Fixed-point carrier mixer: the hot path that shifts IF samples down by
//! a candidate carrier frequency, quantized through the carrier LUT
//! instead of evaluating `sin`/`cos` per sample.

use crate::buffer::SampleBuffer;
use crate::constants::{NTBL, PHASE_FRAC_BITS};
use crate::cpx::Cpx16;
use crate::lut::CarrierLut;

/// Mix `n_req` samples starting at `ix` (wrapping on the sample buffer's
/// ring) down by `fc` Hz at sample rate `fs`, starting at phase `phi`
/// cycles. `out[i] ~= sample(ix+i) * exp(-2*pi*j*(phi + fc*i/fs))`,
/// quantized via `lut`.
///
/// Phase is carried in a 32-bit fixed-point accumulator with
/// [`PHASE_FRAC_BITS`] fractional bits below the NTBL-wide table index;
/// because `NTBL * 2^PHASE_FRAC_BITS == 2^32` the accumulator wraps
/// exactly on a full NTBL cycle, so reading the ring in one pass here
/// produces bit-identical results to mixing the pre- and post-wrap spans
/// separately and carrying the phase across the split by hand.
pub fn mix_carr(
    lut: &CarrierLut,
    buff: &SampleBuffer,
    ix: usize,
    n_req: usize,
    fs: f64,
    fc: f64,
    phi: f64,
) -> Vec<Cpx16> {
    let samples = buff.read_ring(ix, n_req);

    let ntbl_scale = NTBL as f64 * (1u64 << PHASE_FRAC_BITS) as f64; // == 2^32
    let phi_frac = phi.rem_euclid(1.0);
    let mut p: u32 = (phi_frac * ntbl_scale).round() as i64 as u32;
    let s: u32 = ((fc / fs) * ntbl_scale).round() as i64 as u32;

    let mut out = Vec::with_capacity(n_req);
    for sample in samples {
        let sample_byte = sample.to_key();
        let phase_idx = (p >> PHASE_FRAC_BITS) as u8;
        out.push(lut.lookup(sample_byte, phase_idx));
        p = p.wrapping_add(s);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Iq;
    use crate::cpx::Cpx8;

    fn test_buffer(n: usize) -> SampleBuffer {
        let samples: Vec<Cpx8> = (0..n)
            .map(|k| Cpx8::new(((k % 7) as i8) - 3, ((k % 5) as i8) - 2))
            .collect();
        SampleBuffer::from_samples(samples, Iq::Complex)
    }

    #[test]
    fn ring_crossing_matches_manual_split() {
        let lut = CarrierLut::new();
        let buf = test_buffer(16);
        let fs = 2_046_000.0;
        let fc = 1000.0;
        let k = 5usize;
        let n = buf.len();

        let one_shot = mix_carr(&lut, &buf, n - k, 2 * k, fs, fc, 0.25);

        let first = mix_carr(&lut, &buf, n - k, k, fs, fc, 0.25);
        // Phase carried across the split: recompute the exact phase that
        // would be live after `k` samples of the first half and start the
        // second mix there.
        let ntbl_scale = NTBL as f64 * (1u64 << PHASE_FRAC_BITS) as f64;
        let phi_frac = 0.25f64.rem_euclid(1.0);
        let p0 = (phi_frac * ntbl_scale).round() as i64 as u32;
        let s = ((fc / fs) * ntbl_scale).round() as i64 as u32;
        let p_after_first = p0.wrapping_add(s.wrapping_mul(k as u32));
        let phi_after_first = p_after_first as f64 / ntbl_scale;
        let second = mix_carr(&lut, &buf, 0, k, fs, fc, phi_after_first);

        let mut spliced = first;
        spliced.extend(second);
        assert_eq!(one_shot, spliced);
    }

    #[test]
    fn zero_doppler_zero_phase_passes_through_lut_directly() {
        let lut = CarrierLut::new();
        let buf = test_buffer(8);
        let out = mix_carr(&lut, &buf, 0, 8, 2_046_000.0, 0.0, 0.0);
        for (k, o) in out.iter().enumerate() {
            let expect = lut.lookup(buf.as_slice()[k].to_key(), 0);
            assert_eq!(*o, expect);
        }
    }
}
