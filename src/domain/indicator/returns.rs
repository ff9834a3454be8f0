//! Daily return (one-period percent change).
//!
//! R[i] = (P[i] - P[i-1]) / P[i-1]
//! R[0] is undefined. If P[i-1] == 0 the return is undefined rather than
//! infinite; the same holds for non-finite prices.

pub fn pct_change(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());

    for i in 0..values.len() {
        if i == 0 {
            out.push(None);
            continue;
        }

        let prev = values[i - 1];
        let curr = values[i];

        let value = if prev == 0.0 || !prev.is_finite() || !curr.is_finite() {
            None
        } else {
            Some((curr - prev) / prev).filter(|r| r.is_finite())
        };
        out.push(value);
    }

    out
}
