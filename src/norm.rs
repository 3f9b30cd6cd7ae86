use crate::error::ConfigurationError;
use crate::math::Vector;

/// Scalar "size" functions used for the escape test. Any norm works with
/// any vector dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Norm {
    /// `a^2 + b^2 + …`
    SumOfSquares,
    /// `(a^2 - b^2 + c^2 - …)^2`
    Relativistic,
    /// `(a·b·…)^2`
    Product,
    /// `|a| + |b| + …`
    Taxicab,
    /// `max(|a|, |b|, …)`
    Max,
}

impl Norm {
    pub const ALL: &'static [Norm] = &[
        Norm::SumOfSquares,
        Norm::Relativistic,
        Norm::Product,
        Norm::Taxicab,
        Norm::Max,
    ];

    pub fn from_key(key: &str) -> Result<Norm, ConfigurationError> {
        Norm::ALL
            .iter()
            .copied()
            .find(|n| n.key() == key)
            .ok_or_else(|| ConfigurationError::UnknownNorm(key.to_string()))
    }

    pub fn key(&self) -> &'static str {
        match self {
            Norm::SumOfSquares => "norm2",
            Norm::Relativistic => "relnorm",
            Norm::Product => "relnorm2",
            Norm::Taxicab => "taxicab",
            Norm::Max => "max",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Norm::SumOfSquares => "$a^2 + b^2$",
            Norm::Relativistic => "$(a^2 - b^2)^2$",
            Norm::Product => "$(ab)^2$",
            Norm::Taxicab => "$|a| + |b|$",
            Norm::Max => "$\\max(|a|, |b|)$",
        }
    }

    pub fn evaluate(&self, v: &Vector) -> f64 {
        let xs = v.as_slice();
        match self {
            Norm::SumOfSquares => xs.iter().map(|x| x * x).sum(),
            Norm::Relativistic => {
                let s: f64 = xs
                    .iter()
                    .enumerate()
                    .map(|(i, x)| if i % 2 == 0 { x * x } else { -(x * x) })
                    .sum();
                s * s
            }
            Norm::Product => {
                let p: f64 = xs.iter().product();
                p * p
            }
            Norm::Taxicab => xs.iter().map(|x| x.abs()).sum(),
            // f64::max ignores NaN, so fold by hand to keep NaN visible
            Norm::Max => xs.iter().fold(0.0, |m: f64, x| {
                let a = x.abs();
                if a.is_nan() || a > m { a } else { m }
            }),
        }
    }
}

/// Whether a norm value counts as "at or above threshold".
///
/// NaN never escapes; infinities compare as usual, so `+∞` always escapes.
pub fn escaped(value: f64, threshold: f64) -> bool {
    !value.is_nan() && value >= threshold
}
