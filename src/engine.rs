//! The explicit context value that owns the process-wide LUT and FFT
//! plan cache (§9 design notes). Construct one at startup and thread it
//! through call sites; clone is cheap since it only clones `Arc`
//! handles. Call sites that don't want to carry an `Engine` can use the
//! free functions below, which go through a lazily-initialized default.

use std::sync::Arc;

use crate::buffer::SampleBuffer;
use crate::correlator;
use crate::cpx::{Cpx16, CpxF};
use crate::error::CoreError;
use crate::fftplan::FftPlanCache;
use crate::lut::{CarrierLut, DEFAULT_LUT};
use crate::mixer;
use crate::search;

#[derive(Clone)]
pub struct Engine {
    lut: Arc<CarrierLut>,
    plans: Arc<FftPlanCache>,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            lut: Arc::new(CarrierLut::new()),
            plans: Arc::new(FftPlanCache::new()),
        }
    }

    pub fn mix_carr(
        &self,
        buff: &SampleBuffer,
        ix: usize,
        n_req: usize,
        fs: f64,
        fc: f64,
        phi: f64,
    ) -> Vec<Cpx16> {
        mixer::mix_carr(&self.lut, buff, ix, n_req, fs, fc, phi)
    }

    pub fn corr_fft(&self, iq: &[Cpx16], code_fft: &[CpxF], n: usize) -> Result<Vec<CpxF>, CoreError> {
        correlator::corr_fft(&self.plans, iq, code_fft, n)
    }

    pub fn forward_code_fft(&self, code: &[CpxF], n: usize) -> Result<Vec<CpxF>, CoreError> {
        correlator::forward_code_fft(&self.plans, code, n)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn search_code(
        &self,
        code_fft: &[CpxF],
        buff: &SampleBuffer,
        ix: usize,
        n: usize,
        fs: f64,
        fi: f64,
        fds: &[f64],
        p: &mut [f64],
    ) -> Result<(), CoreError> {
        search::search_code(&self.lut, &self.plans, code_fft, buff, ix, n, fs, fi, fds, p)
    }

    pub fn plan_cache_len(&self) -> usize {
        self.plans.len()
    }

    /// Pre-warm the plan cache for a list of transform sizes (see
    /// [`crate::wisdom`]).
    pub fn warm_plans(&self, sizes: &[usize]) -> Result<(), CoreError> {
        for &n in sizes {
            self.plans.acquire(n)?;
        }
        Ok(())
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Mix through the process-wide default LUT, for call sites that don't
/// carry an [`Engine`].
pub fn mix_carr(
    buff: &SampleBuffer,
    ix: usize,
    n_req: usize,
    fs: f64,
    fc: f64,
    phi: f64,
) -> Vec<Cpx16> {
    mixer::mix_carr(&DEFAULT_LUT, buff, ix, n_req, fs, fc, phi)
}

/// Correlate through the process-wide default plan cache, for call sites
/// that don't carry an [`Engine`].
pub fn corr_fft(iq: &[Cpx16], code_fft: &[CpxF], n: usize) -> Result<Vec<CpxF>, CoreError> {
    correlator::corr_fft(&crate::fftplan::DEFAULT_PLAN_CACHE, iq, code_fft, n)
}
