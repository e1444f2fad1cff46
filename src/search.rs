//! Doppler bin generation and the parallel code search: sweeps a Doppler
//! grid, FFT-correlates each bin against the code, and non-coherently
//! accumulates power into a caller-owned 2D grid.

use std::thread;
use std::time::Duration;

use crate::buffer::SampleBuffer;
use crate::constants::{DOP_STEP, YIELD_DURATION_MS, YIELD_EVERY_N_BINS};
use crate::correlator::corr_fft;
use crate::cpx::CpxF;
use crate::error::CoreError;
use crate::fftplan::FftPlanCache;
use crate::lut::CarrierLut;
use crate::mixer::mix_carr;

/// Emit `floor(2*max_dop/step)+1` Doppler bins spaced `DOP_STEP/t` apart,
/// centered on `dop_center`, spanning `[dop_center - max_dop, dop_center
/// + max_dop]`.
pub fn dop_bins(t: f64, dop_center: f64, max_dop: f64) -> Vec<f64> {
    let step = DOP_STEP / t;
    let len = (2.0 * max_dop / step).floor() as usize + 1;
    (0..len).map(|i| dop_center - max_dop + i as f64 * step).collect()
}

/// For each Doppler bin `d = fds[i]`, FFT-correlate `mix_carr(buff, ix,
/// n, fs, fi + d, 0)` against `code_fft` and accumulate `|C[j]|^2` into
/// `p[i*n + j]`. `p` is additive: calling this repeatedly over successive
/// code periods performs non-coherent integration. Doppler bins are
/// processed in index order, yielding the CPU briefly every
/// [`YIELD_EVERY_N_BINS`] bins so a long search doesn't starve other
/// threads; this is a scheduling heuristic, not a correctness property.
#[allow(clippy::too_many_arguments)]
pub fn search_code(
    lut: &CarrierLut,
    cache: &FftPlanCache,
    code_fft: &[CpxF],
    buff: &SampleBuffer,
    ix: usize,
    n: usize,
    fs: f64,
    fi: f64,
    fds: &[f64],
    p: &mut [f64],
) -> Result<(), CoreError> {
    assert_eq!(p.len(), fds.len() * n, "power grid must be len_fds * n");

    for (i, &d) in fds.iter().enumerate() {
        let mixed = mix_carr(lut, buff, ix, n, fs, fi + d, 0.0);
        let c = corr_fft(cache, &mixed, code_fft, n)?;

        let row = &mut p[i * n..(i + 1) * n];
        for (slot, sample) in row.iter_mut().zip(c.iter()) {
            *slot += sample.norm_sqr() as f64;
        }

        if (i + 1) % YIELD_EVERY_N_BINS == 0 {
            thread::sleep(Duration::from_millis(YIELD_DURATION_MS));
        }
    }
    Ok(())
}
