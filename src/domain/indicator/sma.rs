//! Simple Moving Average.
//!
//! SMA(n)[i] = (P[i-n+1] + ... + P[i]) / n
//! Warmup: first (n-1) values are undefined. A window holding a non-finite
//! price, or whose sum overflows, is undefined.

pub fn rolling_mean(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let window = &values[i + 1 - period..=i];
            if !window.iter().all(|v| v.is_finite()) {
                return None;
            }
            Some(window.iter().sum::<f64>() / period as f64).filter(|m| m.is_finite())
        })
        .collect()
}
