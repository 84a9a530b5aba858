//! Estimator math shared by the Heule and Ertl cardinality pipelines.

/// Register histogram used by Ertl's estimator: `counts[k]` is the number of
/// registers holding rank `k`, over `m` registers with maximum rank `q + 1`.
pub(crate) struct RankHistogram {
    pub(crate) m: usize,
    pub(crate) q: u8,
    pub(crate) counts: Vec<u32>,
}

/// Bias correction factor for the raw estimate.
pub(crate) fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}

/// Linear counting of Whang et al.: `m * ln(m / v)` for `m` slots of which
/// `v` are unused. Accurate at low load; requires `0 < v <= m`.
pub(crate) fn linear_counting(m: usize, v: usize) -> f64 {
    debug_assert!(v > 0 && v <= m, "unused slots must be in (0, m]");
    (m as f64) * ((m as f64) / (v as f64)).ln()
}

/// Raw HyperLogLog estimate: scaled harmonic mean of the register powers.
pub(crate) fn raw_estimate(registers: &[u8]) -> f64 {
    let inverse_sum: f64 = registers.iter().map(|&r| 1.0 / (1u64 << r) as f64).sum();
    let m = registers.len();
    alpha(m) * ((m * m) as f64) / inverse_sum
}

/// Ertl's sigma correction for zero registers:
/// `sigma(x) = x + sum[k >= 1] x^(2^k) * 2^(k-1)`, evaluated as a fixed
/// point. `sigma(1) = +inf`.
pub(crate) fn sigma(x: f64) -> f64 {
    debug_assert!((0.0..=1.0).contains(&x));
    if x == 1.0 {
        return f64::INFINITY;
    }

    let mut sigma_x = x;
    let mut x_pow = x;
    let mut y = 1.0;
    loop {
        let previous = sigma_x;
        x_pow *= x_pow;
        sigma_x += x_pow * y;
        y += y;
        if sigma_x == previous {
            return sigma_x;
        }
    }
}

/// Ertl's tau correction for saturated registers:
/// `tau(x) = (1 - x - sum[k >= 1] (1 - x^(2^-k))^2 * 2^-k) / 3`, evaluated
/// as a fixed point. `tau(0) = tau(1) = 0`.
pub(crate) fn tau(x: f64) -> f64 {
    debug_assert!((0.0..=1.0).contains(&x));
    if x == 0.0 || x == 1.0 {
        return 0.0;
    }

    let mut tau_x = 1.0 - x;
    let mut x_root = x;
    let mut y = 1.0;
    loop {
        let previous = tau_x;
        x_root = x_root.sqrt();
        y /= 2.0;
        tau_x -= (1.0 - x_root).powi(2) * y;
        if tau_x == previous {
            return tau_x / 3.0;
        }
    }
}

/// Improved estimator of Ertl, 2017 (section 4). Corrections for zero and
/// saturated registers replace both the empirical bias tables and the switch
/// to linear counting:
///
/// ```text
///                        alpha_inf * m^2
/// ----------------------------------------------------------------
/// m * sigma(C[0]/m) + sum[k=1..q] C[k] * 2^-k + m * tau(1 - C[q+1]/m) * 2^-q
/// ```
pub(crate) fn ertl_estimate(histogram: &RankHistogram) -> f64 {
    let m = histogram.m as f64;
    let q = histogram.q as usize;
    let counts = &histogram.counts;

    let mut denominator = m * tau(1.0 - f64::from(counts[q + 1]) / m);
    for k in (1..=q).rev() {
        denominator += f64::from(counts[k]);
        denominator *= 0.5;
    }
    denominator += m * sigma(f64::from(counts[0]) / m);

    let m_sq_alpha_inf = (m / (2.0 * std::f64::consts::LN_2)) * m;
    m_sq_alpha_inf / denominator
}
