// Empirical check of the properties each algebra declares, on random
// vectors drawn from the same [-2, 2] box the escape plane covers.

use rand::Rng;
use serde::Serialize;

use crate::algebra::{Algebra, Properties};
use crate::error::ShapeError;
use crate::math::{MAX_DIM, Vector};

const TOLERANCE: f64 = 1e-9;

/// What the samples showed. A property is observed when no sample broke it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Audit {
    pub commutative: bool,
    pub anticommutative: bool,
    pub associative: bool,
    pub samples: usize,
}

impl Audit {
    /// Declared commutativity and anticommutativity must be observed;
    /// associativity must match in both directions, so a non-associative
    /// entry has to show at least one failing triple.
    pub fn consistent_with(&self, declared: Properties) -> bool {
        (!declared.commutative || self.commutative)
            && (!declared.anticommutative || self.anticommutative)
            && declared.associative == self.associative
    }
}

pub fn audit<R: Rng>(algebra: Algebra, samples: usize, rng: &mut R) -> Result<Audit, ShapeError> {
    let dim = algebra.dimension();
    let mut result = Audit { commutative: true, anticommutative: true, associative: true, samples };

    for _ in 0..samples {
        let x = random_vector(rng, dim, false)?;
        let y = random_vector(rng, dim, false)?;
        let z = random_vector(rng, dim, false)?;

        if result.commutative && !close(&algebra.multiply(&x, &y)?, &algebra.multiply(&y, &x)?) {
            result.commutative = false;
        }
        if result.associative {
            let left = algebra.multiply(&algebra.multiply(&x, &y)?, &z)?;
            let right = algebra.multiply(&x, &algebra.multiply(&y, &z)?)?;
            if !close(&left, &right) {
                result.associative = false;
            }
        }

        let u = random_vector(rng, dim, true)?;
        let v = random_vector(rng, dim, true)?;
        let uv = algebra.multiply(&u, &v)?;
        let vu = algebra.multiply(&v, &u)?.neg();
        if result.anticommutative && !close(&imaginary(&uv), &imaginary(&vu)) {
            result.anticommutative = false;
        }
    }
    Ok(result)
}

fn random_vector<R: Rng>(rng: &mut R, dim: usize, pure_imaginary: bool) -> Result<Vector, ShapeError> {
    let mut comps = [0.0; MAX_DIM];
    for (i, c) in comps.iter_mut().enumerate().take(dim) {
        if !(pure_imaginary && i == 0) {
            *c = rng.gen_range(-2.0..2.0);
        }
    }
    Vector::new(&comps[..dim])
}

/// Non-real components, real slot zeroed.
fn imaginary(v: &Vector) -> Vector {
    let mut comps = v.padded();
    comps[0] = 0.0;
    Vector::from_padded(comps, v.dim())
}

fn close(a: &Vector, b: &Vector) -> bool {
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .all(|(x, y)| (x - y).abs() <= TOLERANCE * x.abs().max(y.abs()).max(1.0))
}
