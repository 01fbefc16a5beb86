//! Distance metrics.
//!
//! A [`Metric`] is picked once when the clusterer is configured. The neighbor
//! scan dispatches on the variant with a `match`, so the hot loop never does a
//! name lookup.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Dissimilarity between two feature vectors.
///
/// Every variant is symmetric and non-negative. `eps` must be expressed in the
/// units of the chosen metric (e.g. squared units for [`Metric::SquaredEuclidean`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    /// L2 norm of the difference.
    #[default]
    Euclidean,
    /// Squared L2 norm; avoids the square root when only ordering matters.
    SquaredEuclidean,
    /// L1 norm of the difference.
    Manhattan,
    /// L∞ norm of the difference.
    Chebyshev,
    /// `1 - cos(a, b)`, in `[0, 2]`.
    Cosine,
}

impl Metric {
    /// All built-in metrics.
    pub const ALL: [Metric; 5] = [
        Metric::Euclidean,
        Metric::SquaredEuclidean,
        Metric::Manhattan,
        Metric::Chebyshev,
        Metric::Cosine,
    ];

    /// Canonical name, accepted back by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Metric::Euclidean => "euclidean",
            Metric::SquaredEuclidean => "sqeuclidean",
            Metric::Manhattan => "manhattan",
            Metric::Chebyshev => "chebyshev",
            Metric::Cosine => "cosine",
        }
    }

    /// Distance between `a` and `b`.
    #[inline]
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        debug_assert_eq!(a.len(), b.len());
        match self {
            Metric::Euclidean => squared_euclidean(a, b).sqrt(),
            Metric::SquaredEuclidean => squared_euclidean(a, b),
            Metric::Manhattan => a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum(),
            Metric::Chebyshev => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y).abs())
                .fold(0.0, f32::max),
            Metric::Cosine => cosine_distance(a, b),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" | "l2" => Ok(Metric::Euclidean),
            "sqeuclidean" | "squared_euclidean" => Ok(Metric::SquaredEuclidean),
            "manhattan" | "l1" | "cityblock" => Ok(Metric::Manhattan),
            "chebyshev" | "linf" => Ok(Metric::Chebyshev),
            "cosine" => Ok(Metric::Cosine),
            _ => Err(Error::UnknownMetric(s.to_string())),
        }
    }
}

#[inline]
pub(crate) fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    // Accumulate in f64: squared norms of finite f32 input can neither overflow
    // nor underflow to zero there.
    let mut dot = 0.0f64;
    let mut na = 0.0f64;
    let mut nb = 0.0f64;
    for (&x, &y) in a.iter().zip(b) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        na += x * x;
        nb += y * y;
    }
    // Zero vectors have no direction: identical if both are zero, orthogonal otherwise.
    if na == 0.0 || nb == 0.0 {
        return if na == 0.0 && nb == 0.0 { 0.0 } else { 1.0 };
    }
    let d = (1.0 - dot / (na * nb).sqrt()).clamp(0.0, 2.0) as f32;
    debug_assert!(d >= 0.0);
    d
}
