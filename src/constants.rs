pub const PI: f64 = std::f64::consts::PI;

/// Fixed carrier-mixer output gain. Chosen so max |I|,|Q| after mixing
/// (CSCALE * 127 * sqrt(2)) stays comfortably under i16::MAX.
pub const CSCALE: f64 = 10.0;

/// Carrier LUT phase resolution: top 8 bits of the fixed-point phase
/// accumulator index this many table columns.
pub const NTBL: usize = 256;

/// Fractional bits of the fixed-point NCO phase accumulator.
pub const PHASE_FRAC_BITS: u32 = 24;

/// Maximum number of distinct transform sizes the FFT plan cache holds.
pub const MAX_FFT_PLANS: usize = 32;

/// Doppler grid step, in cycles per code period.
pub const DOP_STEP: f64 = 0.5;

/// search_code yields the CPU roughly this often, in Doppler bins.
pub const YIELD_EVERY_N_BINS: usize = 22;

/// Duration of the cooperative yield in search_code.
pub const YIELD_DURATION_MS: u64 = 1;
