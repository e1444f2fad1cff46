//! Top-level acquisition orchestration (§4.10): ties the Doppler bin
//! generator, the parallel code search, peak detection and fine-Doppler
//! refinement together into the single call a per-satellite acquisition
//! attempt makes, the way the sibling receiver application's acquisition
//! routine composes the same four steps.

use crate::buffer::SampleBuffer;
use crate::cpx::CpxF;
use crate::engine::Engine;
use crate::error::CoreError;
use crate::peak::{corr_max, fine_dop};
use crate::search::{dop_bins, search_code};
use crate::types::AcquisitionResult;

/// Parameters for one acquisition attempt, beyond the buffer/code/engine
/// already threaded through.
pub struct AcquisitionParams {
    pub ix: usize,
    pub n: usize,
    pub fs: f64,
    pub fi: f64,
    pub dop_center: f64,
    pub max_dop: f64,
    pub t: f64,
    /// Number of code periods to non-coherently integrate (§4.6); 1 for a
    /// single pass.
    pub num_periods: usize,
    /// Minimum C/N0, in dB-Hz, to accept the result rather than report
    /// [`CoreError::BelowThreshold`].
    pub cn0_threshold_db: f64,
}

/// Run one acquisition attempt: build the Doppler grid, accumulate power
/// over `params.num_periods` repeated code windows, locate the peak, and
/// refine its Doppler estimate. `code_fft` must already be sized to
/// `params.n` (see [`crate::code::code_fft`]).
pub fn acquire(
    engine: &Engine,
    buff: &SampleBuffer,
    code_fft: &[CpxF],
    params: &AcquisitionParams,
) -> Result<AcquisitionResult, CoreError> {
    let fds = dop_bins(params.t, params.dop_center, params.max_dop);
    let mut power = vec![0.0f64; fds.len() * params.n];

    let mut ix = params.ix;
    for _ in 0..params.num_periods.max(1) {
        engine.search_code(code_fft, buff, ix, params.n, params.fs, params.fi, &fds, &mut power)?;
        ix += params.n;
    }

    let (ix_dop, ix_code, cn0_db) = corr_max(&power, params.n, params.n, fds.len(), params.t);
    if cn0_db < params.cn0_threshold_db {
        return Err(CoreError::BelowThreshold {
            cn0_db,
            threshold_db: params.cn0_threshold_db,
        });
    }

    let doppler_hz = fine_dop(&power, params.n, &fds, ix_dop, ix_code);
    log::info!(
        "acquisition: doppler={doppler_hz:.1} Hz code_offset={ix_code} cn0={cn0_db:.1} dB-Hz"
    );

    Ok(AcquisitionResult {
        doppler_hz,
        code_offset: ix_code,
        cn0_db,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Iq;
    use crate::code::code_fft;
    use crate::cpx::Cpx8;

    #[test]
    fn below_threshold_is_reported_as_a_typed_error() {
        let engine = Engine::new();
        let n = 32usize;
        let samples: Vec<Cpx8> = vec![Cpx8::new(0, 0); n];
        let buff = SampleBuffer::from_samples(samples, Iq::Complex);
        let code = vec![crate::cpx::Cpx16::new(1, 0); n];
        let fft = code_fft(&engine, &code, n).unwrap();

        let params = AcquisitionParams {
            ix: 0,
            n,
            fs: 2_046_000.0,
            fi: 0.0,
            dop_center: 0.0,
            max_dop: 1000.0,
            t: 1e-3,
            num_periods: 1,
            cn0_threshold_db: 1000.0,
        };
        let err = acquire(&engine, &buff, &fft, &params).unwrap_err();
        assert!(matches!(err, CoreError::BelowThreshold { .. }));
    }

    #[test]
    fn non_coherent_integration_accumulates_across_periods() {
        let engine = Engine::new();
        let n = 16usize;
        let samples: Vec<Cpx8> = (0..n).map(|k| Cpx8::new(((k % 3) as i8) - 1, 0)).collect();
        let buff = SampleBuffer::from_samples(samples.repeat(4), Iq::Complex);
        let code: Vec<crate::cpx::Cpx16> =
            samples.iter().map(|s| crate::cpx::Cpx16::new(s.i as i16, 0)).collect();
        let fft = code_fft(&engine, &code, n).unwrap();

        let params = AcquisitionParams {
            ix: 0,
            n,
            fs: 2_046_000.0,
            fi: 0.0,
            dop_center: 0.0,
            max_dop: 500.0,
            t: 1e-3,
            num_periods: 4,
            cn0_threshold_db: -1000.0,
        };
        let result = acquire(&engine, &buff, &fft, &params).unwrap();
        assert_eq!(result.code_offset, 0);
    }
}
