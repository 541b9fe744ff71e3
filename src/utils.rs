//! Utility functions shared by the training and bandit statistics

/// Calculate Shannon entropy from a probability distribution.
///
/// The Shannon entropy is calculated as: H = -Σ(p * ln(p)) for p > 0
///
/// # Examples
///
/// ```
/// use menace_sandbox::utils::shannon_entropy;
///
/// // Uniform distribution over 2 outcomes
/// let entropy = shannon_entropy(vec![0.5, 0.5]);
/// assert!((entropy - std::f64::consts::LN_2).abs() < 0.001);
///
/// // Deterministic distribution (zero entropy)
/// let entropy = shannon_entropy(vec![1.0, 0.0, 0.0]);
/// assert!(entropy.abs() < 0.001);
/// ```
pub fn shannon_entropy<I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    probabilities
        .into_iter()
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.ln())
        .sum()
}

/// Calculate entropy from weights (normalizes first).
///
/// Returns 0.0 if the total weight is zero or negative.
///
/// ```
/// use menace_sandbox::utils::entropy_from_weights;
///
/// let entropy = entropy_from_weights(vec![1.0, 1.0]);
/// assert!((entropy - std::f64::consts::LN_2).abs() < 0.001);
/// assert_eq!(entropy_from_weights(vec![0.0, 0.0]), 0.0);
/// ```
pub fn entropy_from_weights<I>(weights: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    normalize_weights(weights)
        .map(shannon_entropy)
        .unwrap_or(0.0)
}

/// Normalize weights to probabilities that sum to 1.0.
///
/// Returns `None` if the total weight is zero, negative or not finite.
///
/// ```
/// use menace_sandbox::utils::normalize_weights;
///
/// let normalized = normalize_weights(vec![1.0, 2.0, 1.0]).unwrap();
/// assert_eq!(normalized, vec![0.25, 0.5, 0.25]);
/// assert_eq!(normalize_weights(vec![0.0, 0.0]), None);
/// ```
pub fn normalize_weights<I>(weights: I) -> Option<Vec<f64>>
where
    I: IntoIterator<Item = f64>,
{
    let weights: Vec<f64> = weights.into_iter().collect();
    let sum: f64 = weights.iter().sum();
    if weights.is_empty() || !sum.is_finite() || sum <= 0.0 {
        return None;
    }
    Some(weights.iter().map(|&w| w / sum).collect())
}

/// `count / total`, or 0.0 when `total` is zero.
pub fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Simple moving average keeping only fully covered windows.
///
/// The result has `values.len() - window + 1` entries, and is empty when the
/// window is zero or longer than the input.
///
/// ```
/// use menace_sandbox::utils::moving_average;
///
/// assert_eq!(moving_average(&[1.0, 2.0, 3.0, 4.0], 2), vec![1.5, 2.5, 3.5]);
/// assert!(moving_average(&[1.0], 2).is_empty());
/// ```
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || window > values.len() {
        return Vec::new();
    }

    let mut averages = Vec::with_capacity(values.len() - window + 1);
    let mut sum: f64 = values[..window].iter().sum();
    averages.push(sum / window as f64);
    for i in window..values.len() {
        sum += values[i] - values[i - window];
        averages.push(sum / window as f64);
    }
    averages
}

/// Indices of every maximal element. Empty for an empty slice.
pub fn argmax_all(values: &[f64]) -> Vec<usize> {
    let Some(max) = values.iter().copied().reduce(f64::max) else {
        return Vec::new();
    };
    values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v == max)
        .map(|(i, _)| i)
        .collect()
}

/// Index of the first maximal element.
pub fn argmax(values: &[f64]) -> Option<usize> {
    argmax_all(values).first().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_of_zero_total_is_zero() {
        assert_eq!(rate(3, 0), 0.0);
        assert_eq!(rate(1, 4), 0.25);
    }

    #[test]
    fn moving_average_matches_naive_windows() {
        let values: Vec<f64> = (0..20).map(|i| (i * i % 7) as f64).collect();
        let window = 5;
        let fast = moving_average(&values, window);
        let naive: Vec<f64> = values
            .windows(window)
            .map(|w| w.iter().sum::<f64>() / window as f64)
            .collect();
        assert_eq!(fast.len(), naive.len());
        for (a, b) in fast.iter().zip(&naive) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn moving_average_degenerate_windows() {
        assert!(moving_average(&[1.0, 2.0], 0).is_empty());
        assert!(moving_average(&[], 1).is_empty());
        assert_eq!(moving_average(&[2.0, 4.0], 2), vec![3.0]);
    }

    #[test]
    fn argmax_reports_ties() {
        assert_eq!(argmax_all(&[1.0, 3.0, 3.0, 0.5]), vec![1, 2]);
        assert_eq!(argmax(&[1.0, 3.0, 3.0]), Some(1));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn normalize_weights_returns_none_for_zero_total() {
        assert!(normalize_weights(vec![0.0, 0.0]).is_none());
        assert!(normalize_weights(Vec::new()).is_none());
    }
}
