use thiserror::Error;

/// Recoverable failures reported by the acquisition/correlation core.
///
/// Allocation failure during the small, early setup allocations (the LUT,
/// the plan cache) is treated as a broken environment and is not part of
/// this enum: the core aborts with a diagnostic instead of threading a
/// `Result` through call sites that cannot meaningfully recover from it.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("failed to read raw IF samples: {0}")]
    FileIo(#[from] std::io::Error),

    #[error("short read: requested {requested} bytes, file/stream had {available}")]
    ShortRead { requested: usize, available: usize },

    #[error("code file byte {value} at offset {offset} is not in {{-1,0,+1}}")]
    InvalidCodeByte { offset: usize, value: i8 },

    #[error("failed to import FFT wisdom from {path}: {reason}")]
    WisdomImport { path: String, reason: String },

    #[error("FFT plan cache is full ({max} slots); cannot plan size {size}")]
    PlanCacheOverflow { size: usize, max: usize },

    #[error("quadratic Doppler fit is degenerate at bin {bin}; falling back to coarse estimate")]
    DegenerateFit { bin: usize },

    #[error("acquisition did not reach the C/N0 threshold: got {cn0_db:.1} dB-Hz, need {threshold_db:.1}")]
    BelowThreshold { cn0_db: f64, threshold_db: f64 },
}

pub type CoreResult<T> = Result<T, CoreError>;
