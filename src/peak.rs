//! Peak detection, carrier-to-noise estimation, and sub-bin Doppler
//! refinement over the accumulated power grid.

/// Scan the sub-region `i in [0,m)`, `j in [0,n_max)` of the `len_fds *
/// n` power grid `p` for its maximum, tracking the mean over the same
/// region with the incremental update `mean += (x - mean) / count`. Ties
/// go to the first occurrence in row-major scan order. Returns
/// `(ix_dop, ix_code, cn0_db)`; `cn0_db` is `0.0` if the region's mean is
/// non-positive.
pub fn corr_max(p: &[f64], n: usize, n_max: usize, m: usize, t: f64) -> (usize, usize, f64) {
    assert!(n_max <= n, "n_max must not exceed the grid's row stride");
    assert!(m * n <= p.len(), "m exceeds the number of rows in p");

    let mut max_val = f64::MIN;
    let mut ix_dop = 0usize;
    let mut ix_code = 0usize;
    let mut mean = 0.0f64;
    let mut count: u64 = 0;

    for i in 0..m {
        let row = &p[i * n..i * n + n_max];
        for (j, &x) in row.iter().enumerate() {
            count += 1;
            mean += (x - mean) / count as f64;
            if x > max_val {
                max_val = x;
                ix_dop = i;
                ix_code = j;
            }
        }
    }

    let cn0_db = if mean <= 0.0 {
        0.0
    } else {
        10.0 * ((max_val - mean) / mean / t).log10()
    };
    (ix_dop, ix_code, cn0_db)
}

/// Refine the Doppler estimate at peak `(i_star, j_star)` by fitting an
/// exact quadratic through the power samples at Doppler bins
/// `i_star-1, i_star, i_star+1` (same code offset `j_star`) and
/// returning the vertex. Falls back to the coarse bin frequency
/// `fds[i_star]` at either edge of the grid or when the fit is
/// degenerate (collinear samples).
pub fn fine_dop(p: &[f64], n: usize, fds: &[f64], i_star: usize, j_star: usize) -> f64 {
    if i_star == 0 || i_star + 1 >= fds.len() {
        return fds[i_star];
    }

    let x0 = fds[i_star - 1];
    let x1 = fds[i_star];
    let x2 = fds[i_star + 1];
    let y0 = p[(i_star - 1) * n + j_star];
    let y1 = p[i_star * n + j_star];
    let y2 = p[(i_star + 1) * n + j_star];

    let d1 = (y1 - y0) / (x1 - x0);
    let d2 = (y2 - y0) / (x2 - x0);
    let p2 = (d2 - d1) / (x2 - x1);
    if p2.abs() < f64::EPSILON {
        log::debug!("{}", crate::error::CoreError::DegenerateFit { bin: i_star });
        return fds[i_star];
    }
    let p1 = d1 - p2 * (x0 + x1);
    -p1 / (2.0 * p2)
}
