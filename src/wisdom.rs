//! Plan cache warm-up: the portable stand-in for FFTW-style wisdom
//! described in §6. `rustfft` plans transforms lazily on first use rather
//! than through a separate tunable-effort planning pass, so there is no
//! literal wisdom blob to import/export; instead the "wisdom file" is a
//! plain list of transform sizes to pre-warm the plan cache with at
//! startup, preserving the same external contract (an optional file
//! path, fail-soft on import, explicit export) without inventing an
//! effort-tuning phase the library doesn't have.

use std::fs;
use std::path::Path;

use crate::engine::Engine;
use crate::error::CoreError;

/// Load a newline-separated list of transform sizes and pre-warm the
/// engine's plan cache with them. Import failure (missing file,
/// unparsable contents) is a warning, not a hard error: the caller
/// proceeds with an empty, lazily-filled cache.
pub fn import_wisdom(engine: &Engine, path: &Path) {
    if path.as_os_str().is_empty() {
        return;
    }
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            let err = CoreError::WisdomImport {
                path: path.display().to_string(),
                reason: e.to_string(),
            };
            log::warn!("{err}");
            return;
        }
    };

    let sizes: Vec<usize> = contents
        .lines()
        .filter_map(|line| line.trim().parse::<usize>().ok())
        .collect();

    if let Err(e) = engine.warm_plans(&sizes) {
        let err = CoreError::WisdomImport {
            path: path.display().to_string(),
            reason: e.to_string(),
        };
        log::warn!("{err}");
    }
}

/// Export the transform sizes worth pre-warming next time, one per line.
pub fn export_wisdom(path: &Path, sizes: &[usize]) -> std::io::Result<()> {
    let body = sizes.iter().map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
    fs::write(path, body)
}
