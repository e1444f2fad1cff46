//! The two correlator variants: a time-domain inner product over integer
//! code offsets, and a frequency-domain circular correlator against a
//! precomputed code spectrum.

use crate::constants::CSCALE;
use crate::cpx::{Cpx16, CpxF};
use crate::error::CoreError;
use crate::fftplan::FftPlanCache;

/// Time-domain correlator. `positions[i] = k` selects the window
/// `a=k,b=0,M=N-k` for `k>0`, `a=0,b=-k,M=N+k` for `k<0`, `a=b=0,M=N`
/// for `k=0`. The code is real-valued ({-1,0,+1} per component), so the
/// "multiply" against it is sign-application, summed independently for
/// I and Q in a wide accumulator.
pub fn corr_std(iq: &[Cpx16], code: &[Cpx16], n: usize, positions: &[i64]) -> Vec<CpxF> {
    assert_eq!(iq.len(), n, "iq slice must have length n");
    positions
        .iter()
        .map(|&k| {
            let (a, b, m) = if k > 0 {
                (k as usize, 0usize, n - k as usize)
            } else if k < 0 {
                (0usize, (-k) as usize, n - (-k) as usize)
            } else {
                (0usize, 0usize, n)
            };
            debug_assert!(m > 0, "degenerate correlation window for position {k}");

            let mut sum_i: i64 = 0;
            let mut sum_q: i64 = 0;
            for j in 0..m {
                let s = iq[a + j];
                let c = code[b + j].i as i64;
                sum_i += s.i as i64 * c;
                sum_q += s.q as i64 * c;
            }
            let scale = m as f64 * CSCALE;
            CpxF::new((sum_i as f64 / scale) as f32, (sum_q as f64 / scale) as f32)
        })
        .collect()
}

/// Frequency-domain circular correlator. Computes
/// `IFFT( FFT(IQ/CSCALE) * conj(code_fft) ) / N^2`: the conjugate on the
/// code spectrum is what makes this a correlation rather than a circular
/// convolution (the code's own DFT, supplied unconjugated per the
/// external boundary contract, would otherwise correlate `IQ` against a
/// circularly time-reversed code). Acquires its scratch plan from
/// `cache`, failing if the cache has no room left for a new size `n`.
pub fn corr_fft(
    cache: &FftPlanCache,
    iq: &[Cpx16],
    code_fft: &[CpxF],
    n: usize,
) -> Result<Vec<CpxF>, CoreError> {
    assert_eq!(iq.len(), n, "iq slice must have length n");
    assert_eq!(code_fft.len(), n, "code_fft slice must have length n");

    let plans = cache.acquire(n)?;

    let inv_cscale = 1.0f32 / CSCALE as f32;
    let mut buf: Vec<CpxF> = iq
        .iter()
        .map(|s| CpxF::new(s.i as f32 * inv_cscale, s.q as f32 * inv_cscale))
        .collect();

    plans.forward.process(&mut buf);
    for (x, h) in buf.iter_mut().zip(code_fft.iter()) {
        *x *= h.conj();
    }
    plans.backward.process(&mut buf);

    let norm = 1.0f32 / (n as f32 * n as f32);
    for v in buf.iter_mut() {
        *v *= norm;
    }
    Ok(buf)
}

/// Compute the forward DFT of a code reference, zero-padded to `n`, for
/// use as the `code_fft` input to [`corr_fft`].
pub fn forward_code_fft(cache: &FftPlanCache, code: &[CpxF], n: usize) -> Result<Vec<CpxF>, CoreError> {
    assert!(code.len() <= n, "code longer than the transform size");
    let plans = cache.acquire(n)?;
    let mut buf = vec![CpxF::default(); n];
    buf[..code.len()].copy_from_slice(code);
    plans.forward.process(&mut buf);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::{Iq, SampleBuffer};
    use crate::cpx::Cpx8;
    use crate::lut::CarrierLut;
    use crate::mixer::mix_carr;

    fn make_code(n: usize) -> Vec<Cpx16> {
        (0..n)
            .map(|k| {
                let v = match k % 3 {
                    0 => 1,
                    1 => -1,
                    _ => 0,
                };
                Cpx16::new(v, 0)
            })
            .collect()
    }

    #[test]
    fn zero_lag_std_and_fft_agree() {
        let lut = CarrierLut::new();
        let cache = FftPlanCache::new();
        let n = 64usize;

        let samples: Vec<Cpx8> = (0..n)
            .map(|k| Cpx8::new(((k % 7) as i8) - 3, ((k % 5) as i8) - 2))
            .collect();
        let buf = SampleBuffer::from_samples(samples, Iq::Complex);

        let mixed = mix_carr(&lut, &buf, 0, n, 2_046_000.0, 0.0, 0.0);
        let code = make_code(n);

        let std_result = corr_std(&mixed, &code, n, &[0]);

        let code_f: Vec<CpxF> = code.iter().map(|c| CpxF::new(c.i as f32, c.q as f32)).collect();
        let code_fft = forward_code_fft(&cache, &code_f, n).unwrap();
        let fft_result = corr_fft(&cache, &mixed, &code_fft, n).unwrap();

        let d_re = (std_result[0].re - fft_result[0].re).abs();
        let d_im = (std_result[0].im - fft_result[0].im).abs();
        let scale = std_result[0].norm().max(1e-6);
        assert!(d_re / scale < 1e-3, "re mismatch: {} vs {}", std_result[0].re, fft_result[0].re);
        assert!(d_im / scale < 1e-3, "im mismatch: {} vs {}", std_result[0].im, fft_result[0].im);
    }

    #[test]
    fn constant_signal_zero_lag_normalizes_to_one() {
        let cache = FftPlanCache::new();
        let n = 32usize;
        let iq: Vec<Cpx16> = vec![Cpx16::new(CSCALE as i16, 0); n];
        let code_fft = forward_code_fft(&cache, &vec![CpxF::new(1.0, 0.0); n], n).unwrap();

        let result = corr_fft(&cache, &iq, &code_fft, n).unwrap();
        assert!((result[0].re - 1.0).abs() < 1e-4, "got {}", result[0].re);
        assert!(result[0].im.abs() < 1e-4);
    }
}
