//! Rolling sample standard deviation.
//!
//! STDDEV(n)[i] = sqrt(sum((X[i-j] - mean)^2 for j in 0..n) / (n - 1))
//! Defined only when all n values in the trailing window are defined, so
//! undefined inputs never leak into the aggregate. n < 2 is always undefined.

pub fn rolling_sample_stddev(values: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    if period < 2 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let window: Vec<f64> = values[i + 1 - period..=i]
                .iter()
                .copied()
                .collect::<Option<Vec<f64>>>()?;
            sample_stddev(&window)
        })
        .collect()
}

/// Sample standard deviation (n-1 denominator). `None` for fewer than 2 values.
pub fn sample_stddev(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / (n - 1) as f64;

    Some(variance.sqrt()).filter(|s| s.is_finite())
}
