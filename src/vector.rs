//! Euclidean primitives on fixed-length real vectors.
//!
//! Vectors are plain `[f64; N]` arrays, so combining vectors of different
//! dimensions is rejected at compile time.

/// Euclidean dot product.
pub fn dot<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Euclidean norm.
pub fn norm<const N: usize>(v: &[f64; N]) -> f64 {
    dot(v, v).sqrt()
}

pub fn scale<const N: usize>(scalar: f64, v: &[f64; N]) -> [f64; N] {
    v.map(|x| scalar * x)
}

/// Component-wise sum.
pub fn sum<const N: usize>(a: &[f64; N], b: &[f64; N]) -> [f64; N] {
    let mut out = *a;
    for (o, y) in out.iter_mut().zip(b.iter()) {
        *o += y;
    }
    out
}

/// Component-wise `a - b`.
pub fn difference<const N: usize>(a: &[f64; N], b: &[f64; N]) -> [f64; N] {
    sum(a, &scale(-1.0, b))
}

pub fn euclidean_distance<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
    norm(&difference(a, b))
}
