//! Single-pass numeric reductions used by the insight engine.

/// Arithmetic mean. Callers guarantee `values` is non-empty.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation: the sum of squared deviations is divided
/// by `n`, not `n - 1`. The anomaly threshold assumes the population form,
/// so the divisor must not change.
pub fn population_std_dev(values: &[f64]) -> f64 {
    let avg = mean(values);
    let variance = values
        .iter()
        .map(|&v| {
            let diff = v - avg;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Pearson correlation coefficient between two equal-length series
///
/// # Arguments
/// * `x` - First series
/// * `y` - Second series, paired index-wise with `x`
///
/// # Returns
/// * Pearson's r in [-1, 1]; `0.0` when either series is constant or empty,
///   so a zero denominator never propagates NaN into trend classification
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    if x.is_empty() {
        return 0.0;
    }

    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    let denominator = (sum_sq_x * sum_sq_y).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
