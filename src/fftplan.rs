//! Process-wide FFT plan cache: a fixed-capacity registry mapping
//! transform size to a forward/backward plan pair, guarded by a single
//! mutex during plan *creation* only. Execution of an already-acquired
//! plan needs no lock — `rustfft`'s `Fft` trait is `Send + Sync` and its
//! `process` takes `&self`, so the same plan can run concurrently on
//! distinct buffers from distinct threads.

use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use rustfft::{Fft, FftPlanner};

use crate::constants::MAX_FFT_PLANS;
use crate::error::CoreError;

#[derive(Clone)]
pub struct PlanPair {
    pub forward: Arc<dyn Fft<f32>>,
    pub backward: Arc<dyn Fft<f32>>,
}

struct Slot {
    n: usize,
    plans: PlanPair,
}

pub struct FftPlanCache {
    slots: Mutex<Vec<Slot>>,
}

impl FftPlanCache {
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(Vec::with_capacity(MAX_FFT_PLANS)),
        }
    }

    /// Return the plan pair for size `n`, creating it if this is the
    /// first request for that size. Fails once [`MAX_FFT_PLANS`] distinct
    /// sizes have been installed and a new size is requested; previously
    /// cached sizes keep succeeding.
    pub fn acquire(&self, n: usize) -> Result<PlanPair, CoreError> {
        let mut slots = self.slots.lock().expect("fft plan cache mutex poisoned");
        if let Some(slot) = slots.iter().find(|s| s.n == n) {
            return Ok(slot.plans.clone());
        }
        if slots.len() >= MAX_FFT_PLANS {
            log::error!(
                "fft plan cache overflow: {} slots full, cannot plan size {}",
                MAX_FFT_PLANS,
                n
            );
            return Err(CoreError::PlanCacheOverflow {
                size: n,
                max: MAX_FFT_PLANS,
            });
        }
        let mut planner = FftPlanner::<f32>::new();
        let plans = PlanPair {
            forward: planner.plan_fft_forward(n),
            backward: planner.plan_fft_inverse(n),
        };
        slots.push(Slot { n, plans: plans.clone() });
        Ok(plans)
    }

    pub fn len(&self) -> usize {
        self.slots.lock().expect("fft plan cache mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FftPlanCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide default plan cache for call sites that don't carry an
/// [`crate::engine::Engine`].
pub static DEFAULT_PLAN_CACHE: Lazy<FftPlanCache> = Lazy::new(FftPlanCache::new);

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn overflow_after_max_distinct_sizes() {
        let cache = FftPlanCache::new();
        for n in 1..=MAX_FFT_PLANS {
            cache.acquire(n).expect("should have room");
        }
        assert_eq!(cache.len(), MAX_FFT_PLANS);

        let err = cache.acquire(MAX_FFT_PLANS + 1).unwrap_err();
        assert!(matches!(err, CoreError::PlanCacheOverflow { .. }));

        // Previously cached sizes still succeed.
        cache.acquire(1).expect("cached size still works");
        cache.acquire(MAX_FFT_PLANS).expect("cached size still works");
    }

    #[test]
    fn concurrent_acquire_of_new_size_installs_one_slot() {
        let cache = Arc::new(FftPlanCache::new());
        let mut handles = vec![];
        for _ in 0..8 {
            let cache = cache.clone();
            handles.push(thread::spawn(move || {
                cache.acquire(2048).expect("should plan");
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(cache.len(), 1);
    }
}
