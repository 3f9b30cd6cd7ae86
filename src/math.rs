use std::f64::consts::PI;
use serde::{Deserialize, Serialize};

use crate::error::ShapeError;

/// Largest vector the algebra catalog works with.
pub const MAX_DIM: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct C {
    pub re: f64,
    pub im: f64,
}

impl C {
    pub const I: C = C { re: 0.0, im: 1.0 };

    pub fn new(re: f64, im: f64) -> Self {
        C { re, im }
    }

    /// Primitive `n`-th root of unity, `exp(2πi / n)`.
    pub fn root_of_unity(n: u32) -> Self {
        let (s, c) = (2.0 * PI / n as f64).sin_cos();
        C::new(c, s)
    }

    pub fn abs_sq(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    pub fn add(&self, other: C) -> C {
        C::new(self.re + other.re, self.im + other.im)
    }

    pub fn mul(&self, other: C) -> C {
        C::new(
            self.re * other.re - self.im * other.im,
            self.re * other.im + self.im * other.re
        )
    }

    pub fn scale(&self, k: f64) -> C {
        C::new(self.re * k, self.im * k)
    }

    /// `z^n` by repeated multiplication from the left, `((z·z)·z)…`.
    pub fn powu(&self, n: u32) -> C {
        (1..n).fold(*self, |acc, _| acc.mul(*self))
    }
}

impl From<C> for Vector {
    fn from(z: C) -> Self {
        Vector::from([z.re, z.im])
    }
}

/// A point of a 2-, 3- or 4-dimensional algebra.
///
/// Storage is a fixed `[f64; 4]` so vectors stay `Copy`; components past
/// `dim` are always zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector {
    comps: [f64; MAX_DIM],
    dim: usize,
}

impl Vector {
    pub fn new(components: &[f64]) -> Result<Self, ShapeError> {
        let dim = components.len();
        if !(2..=MAX_DIM).contains(&dim) {
            return Err(ShapeError::UnsupportedDimension(dim));
        }
        let mut comps = [0.0; MAX_DIM];
        comps[..dim].copy_from_slice(components);
        Ok(Vector { comps, dim })
    }

    pub fn zeros(dim: usize) -> Result<Self, ShapeError> {
        if !(2..=MAX_DIM).contains(&dim) {
            return Err(ShapeError::UnsupportedDimension(dim));
        }
        Ok(Vector { comps: [0.0; MAX_DIM], dim })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.comps[..self.dim]
    }

    /// Raw storage, zero-padded to four components.
    pub fn padded(&self) -> [f64; MAX_DIM] {
        self.comps
    }

    pub fn expect_dim(&self, expected: usize) -> Result<(), ShapeError> {
        if self.dim != expected {
            return Err(ShapeError::DimensionMismatch { expected, found: self.dim });
        }
        Ok(())
    }

    /// Component-wise sum. Both vectors must share a dimension.
    pub fn add(&self, other: &Vector) -> Result<Vector, ShapeError> {
        other.expect_dim(self.dim)?;
        let mut comps = self.comps;
        for (a, b) in comps.iter_mut().zip(other.comps.iter()) {
            *a += b;
        }
        Ok(Vector { comps, dim: self.dim })
    }

    pub fn neg(&self) -> Vector {
        let mut comps = self.comps;
        for a in comps.iter_mut() {
            *a = -*a;
        }
        Vector { comps, dim: self.dim }
    }

    pub fn is_finite(&self) -> bool {
        self.as_slice().iter().all(|v| v.is_finite())
    }

    pub(crate) fn from_padded(comps: [f64; MAX_DIM], dim: usize) -> Vector {
        Vector { comps, dim }
    }
}

macro_rules! vector_from_array {
    ($($n:literal),*) => {
        $(
            impl From<[f64; $n]> for Vector {
                fn from(arr: [f64; $n]) -> Self {
                    let mut comps = [0.0; MAX_DIM];
                    comps[..$n].copy_from_slice(&arr);
                    Vector { comps, dim: $n }
                }
            }
        )*
    };
}

vector_from_array!(2, 3, 4);

/// `n` evenly spaced samples from `lower` to `upper`, both ends included.
///
/// Samples mirrored around the midpoint are computed from opposite ends so
/// that symmetric bounds give exactly negated values; `n == 1` is `[lower]`.
pub fn linspace(lower: f64, upper: f64, n: usize) -> Vec<f64> {
    match n {
        0 => return Vec::new(),
        1 => return vec![lower],
        _ => {}
    }
    let span = upper - lower;
    let steps = (n - 1) as f64;
    (0..n)
        .map(|i| {
            if 2 * i < n - 1 {
                lower + span * (i as f64 / steps)
            } else if 2 * i == n - 1 {
                lower + span * 0.5
            } else {
                upper - span * ((n - 1 - i) as f64 / steps)
            }
        })
        .collect()
}
