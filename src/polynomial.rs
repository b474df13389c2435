//! Polynomial evaluation for coefficient vectors in ascending power order.

/// Evaluates `Σ w[k]·x^k` at a single point using Horner's method.
///
/// `0^0` is taken as 1, so the constant term is always `w[0]`.
#[inline]
pub fn evaluate_at(x: f64, w: &[f64]) -> f64 {
    w.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Evaluates the polynomial `w` at every x in `xs`.
pub fn evaluate(xs: &[f64], w: &[f64]) -> Vec<f64> {
    xs.iter().map(|&x| evaluate_at(x, w)).collect()
}
