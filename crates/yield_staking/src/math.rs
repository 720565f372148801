//! Shared numeric helpers.

/// Rounds the stored binary value to `decimals` places, ties to even.
///
/// Works on the exact decimal expansion of `value`, never on `value * 10^decimals`.
/// Non-finite inputs are returned unchanged.
pub fn round_half_even(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let precision = decimals as usize;
    format!("{value:.precision$}").parse().unwrap_or(value)
}

/// Simple period-over-period returns. Pairs starting at a zero price are skipped.
pub fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect()
}

/// Sample standard deviation (n - 1). Zero with fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}
