// Escape-time iteration over arbitrary algebras.
//
// Every point runs `z <- fold(z) + c` for the full iteration budget and
// counts the steps on which its norm sat at or above the threshold. The
// counter is never reset or frozen at first escape.

use std::time::Instant;

use ndarray::{Array1, Array2};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::algebra::Algebra;
use crate::error::{ConfigurationError, Result, ShapeError};
use crate::grid::{Field, FieldShape, PlaneSpec};
use crate::math::{C, Vector};
use crate::norm::{Norm, escaped};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Iterate every point on every step.
    #[default]
    Accumulate,
    /// Stop iterating a point after its first escape and count it on every
    /// remaining step. Refused unless [`EscapeEngine::freeze_is_exact`]
    /// holds for the fields being run.
    FreezeOnEscape,
}

impl Strategy {
    pub fn from_key(key: &str) -> std::result::Result<Strategy, ConfigurationError> {
        match key {
            "accumulate" => Ok(Strategy::Accumulate),
            "freeze-on-escape" | "freeze" => Ok(Strategy::FreezeOnEscape),
            other => Err(ConfigurationError::UnknownStrategy(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EscapeEngine {
    pub algebra: Algebra,
    pub norm: Norm,
    pub power: u32,
    pub iterations: u32,
    pub threshold: f64,
    pub strategy: Strategy,
}

impl EscapeEngine {
    pub fn new(algebra: Algebra, norm: Norm) -> Self {
        EscapeEngine {
            algebra,
            norm,
            power: 2,
            iterations: 7,
            threshold: 4.0,
            strategy: Strategy::Accumulate,
        }
    }

    pub fn with_norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    pub fn with_power(mut self, power: u32) -> Self {
        self.power = power;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigurationError> {
        if self.power < 1 {
            return Err(ConfigurationError::InvalidPower(self.power));
        }
        if !self.threshold.is_finite() {
            return Err(ConfigurationError::InvalidThreshold(self.threshold));
        }
        if self.strategy == Strategy::FreezeOnEscape && !self.freeze_supported() {
            return Err(ConfigurationError::FreezeUnsupported {
                algebra: self.algebra.key().to_string(),
                norm: self.norm.key().to_string(),
                power: self.power,
            });
        }
        Ok(())
    }

    /// Freezing needs `|xy| = |x||y|` under the escape norm, which holds for
    /// complex and quaternion multiplication measured by `norm2`.
    fn freeze_supported(&self) -> bool {
        matches!(self.algebra, Algebra::Complex | Algebra::Quaternion)
            && self.norm == Norm::SumOfSquares
            && self.power >= 2
    }

    /// Whether freezing reproduces the accumulated counts for these fields.
    ///
    /// With `s = sqrt(threshold)` and `m` the largest constant, an escaped
    /// point satisfies `|z^p + c| >= |z|^p - m > |z|` whenever
    /// `s^p - s - m > 0` and `s >= 1`, so it never drops back under the
    /// threshold. The orbit bound `r <- r^p + m` must also stay finite for the
    /// whole budget, since an overflowed orbit turns NaN and stops counting.
    pub fn freeze_is_exact(&self, initial: &Field, constant: &Field) -> bool {
        if !self.freeze_supported() || self.threshold < 1.0 {
            return false;
        }
        let (Some(mut r), Some(m), Ok(p)) = (radius(initial), radius(constant), i32::try_from(self.power)) else {
            return false;
        };
        let s = self.threshold.sqrt();
        let grown = s.powi(p);
        if !(grown - s - m > FREEZE_MARGIN * grown) {
            return false;
        }
        for _ in 0..self.iterations {
            let next = r.powi(p) + m;
            if !(16.0 * next * next).is_finite() {
                return false;
            }
            if next == r {
                break;
            }
            r = next;
        }
        true
    }

    /// Plot title pairing the algebra and norm labels.
    pub fn title(&self) -> String {
        format!("{} | {}", self.algebra.label(), self.norm.label())
    }

    /// Per-point over-threshold counts for `initial`, with `constant` added
    /// after every power fold. Both fields must share shape and dimension.
    pub fn run(&self, initial: &Field, constant: &Field) -> Result<Array1<u32>> {
        self.validate()?;
        if initial.shape() != constant.shape() || initial.dim() != constant.dim() {
            return Err(ShapeError::FieldMismatch.into());
        }
        if !initial.is_empty() && initial.dim() != self.algebra.dimension() {
            return Err(ShapeError::DimensionMismatch {
                expected: self.algebra.dimension(),
                found: initial.dim(),
            }
            .into());
        }

        if self.strategy == Strategy::FreezeOnEscape && !self.freeze_is_exact(initial, constant) {
            return Err(ConfigurationError::FreezeNotExact {
                threshold: self.threshold,
                iterations: self.iterations,
            }
            .into());
        }

        let c = constant.points();
        let mut z: Vec<Vector> = initial.points().to_vec();
        let mut counts = vec![0u32; z.len()];
        let mut frozen = vec![false; z.len()];
        let mut non_finite_seen = false;

        info!(
            algebra = self.algebra.key(),
            norm = self.norm.key(),
            points = z.len(),
            power = self.power,
            iterations = self.iterations,
            threshold = self.threshold,
            strategy = ?self.strategy,
            "running escape iteration"
        );

        for step in 0..self.iterations {
            let tick = Instant::now();
            z.par_iter_mut()
                .zip(c.par_iter())
                .zip(counts.par_iter_mut())
                .zip(frozen.par_iter_mut())
                .try_for_each(|(((z, c), count), frozen)| self.step_point(z, c, count, frozen))?;
            debug!(step, elapsed = ?tick.elapsed(), "iteration complete");

            if !non_finite_seen && z.par_iter().any(|v| !v.is_finite()) {
                warn!(step, "orbit values overflowed; NaN norms no longer count as escaped");
                non_finite_seen = true;
            }
        }

        Ok(Array1::from(counts))
    }

    fn step_point(
        &self,
        z: &mut Vector,
        c: &Vector,
        count: &mut u32,
        frozen: &mut bool,
    ) -> std::result::Result<(), ShapeError> {
        if *frozen {
            *count += 1;
            return Ok(());
        }
        *z = self.algebra.power(z, self.power)?.add(c)?;
        if escaped(self.norm.evaluate(z), self.threshold) {
            *count += 1;
            if self.strategy == Strategy::FreezeOnEscape {
                *frozen = true;
            }
        }
        Ok(())
    }

    /// Counts for a field iterated against a copy of itself as the constant.
    pub fn run_field(&self, field: &Field) -> Result<Array1<u32>> {
        let constant = field.clone();
        self.run(field, &constant)
    }

    /// Counts for a plane-shaped field, reshaped to `(rows, cols)`.
    pub fn run_plane(&self, plane: &Field) -> Result<Array2<u32>> {
        let counts = self.run_field(plane)?;
        Ok(reshape(counts, plane.shape())?)
    }

    /// Generates the plane described by `spec` and runs it. The algebra must
    /// be two-dimensional.
    pub fn plane(&self, spec: &PlaneSpec) -> Result<Array2<u32>> {
        let field = spec.generate()?;
        self.run_plane(&field)
    }

    /// `true` exactly where the orbit never reached the threshold.
    pub fn bounded_mask(&self, lattice: &Field) -> Result<Array1<bool>> {
        let counts = self.run_field(lattice)?;
        Ok(counts.mapv(|n| n == 0))
    }

    /// The starting points whose orbits stayed bounded.
    pub fn bounded_points(&self, lattice: &Field) -> Result<Vec<Vector>> {
        let mask = self.bounded_mask(lattice)?;
        Ok(lattice
            .points()
            .iter()
            .zip(mask.iter())
            .filter(|(_, bounded)| **bounded)
            .map(|(p, _)| *p)
            .collect())
    }
}

/// Relative slack kept between the escape radius and the constants so that
/// rounding in the products cannot pull an escaped point back.
const FREEZE_MARGIN: f64 = 1e-6;

/// Largest Euclidean length in the field, `None` if any point is not finite.
fn radius(field: &Field) -> Option<f64> {
    field.points().iter().try_fold(0.0f64, |max, p| {
        let r = Norm::SumOfSquares.evaluate(p).sqrt();
        r.is_finite().then(|| max.max(r))
    })
}

/// Flat counts back to the plane's `(rows, cols)` layout.
pub fn reshape(counts: Array1<u32>, shape: FieldShape) -> std::result::Result<Array2<u32>, ShapeError> {
    let FieldShape::Plane { rows, cols } = shape else {
        return Err(ShapeError::NotPlanar);
    };
    let found = counts.len();
    counts
        .into_shape_with_order((rows, cols))
        .map_err(|_| ShapeError::LengthMismatch { expected: rows * cols, found })
}

/// Over-threshold count for one point of the classical recurrence
/// `z <- z^power + c`, starting from `z = c`, compared on squared modulus.
pub fn classical_count(c: C, power: u32, iterations: u32, threshold: f64) -> u32 {
    let mut z = c;
    let mut count = 0;
    for _ in 0..iterations {
        z = z.powu(power).add(c);
        if escaped(z.abs_sq(), threshold) {
            count += 1;
        }
    }
    count
}

/// Classical complex Mandelbrot counts over `spec`, using its rotation.
/// `PlaneSpec::with_rotation(C::root_of_unity(n))` gives the rotated variants.
pub fn classical(spec: &PlaneSpec, power: u32, iterations: u32, threshold: f64) -> Result<Array2<u32>> {
    spec.validate()?;
    if power < 1 {
        return Err(ConfigurationError::InvalidPower(power).into());
    }
    if !threshold.is_finite() {
        return Err(ConfigurationError::InvalidThreshold(threshold).into());
    }
    let n = spec.resolution;
    let len = crate::grid::point_count(n, 2)?;
    let axis = crate::math::linspace(spec.lower, spec.upper, n);
    let counts: Vec<u32> = (0..len)
        .into_par_iter()
        .map(|idx| classical_count(spec.point(idx / n, idx % n, &axis), power, iterations, threshold))
        .collect();
    Ok(reshape(Array1::from(counts), FieldShape::Plane { rows: n, cols: n })?)
}
