// Sample fields for the escape engine: a rotated square plane of 2D points,
// or the full cartesian lattice of d-dimensional points.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, ShapeError};
use crate::math::{C, MAX_DIM, Vector, linspace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldShape {
    Plane { rows: usize, cols: usize },
    Lattice { len: usize },
}

impl FieldShape {
    pub fn len(&self) -> usize {
        match *self {
            FieldShape::Plane { rows, cols } => rows * cols,
            FieldShape::Lattice { len } => len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Flat, row-major storage of vectors of a single dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    points: Vec<Vector>,
    shape: FieldShape,
    dim: usize,
}

impl Field {
    pub fn new(points: Vec<Vector>, shape: FieldShape) -> Result<Self, ShapeError> {
        if points.len() != shape.len() {
            return Err(ShapeError::LengthMismatch { expected: shape.len(), found: points.len() });
        }
        let dim = points.first().map(Vector::dim).unwrap_or(2);
        for p in &points {
            p.expect_dim(dim)?;
        }
        Ok(Field { points, shape, dim })
    }

    pub fn points(&self) -> &[Vector] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Vector> {
        self.points
    }

    pub fn shape(&self) -> FieldShape {
        self.shape
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maps every point to a new vector, keeping the shape.
    pub fn try_map<F, E>(&self, f: F) -> Result<Field, E>
    where
        F: FnMut(&Vector) -> Result<Vector, E>,
        E: From<ShapeError>,
    {
        let points = self.points.iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(Field::new(points, self.shape)?)
    }
}

/// Bounds, resolution and rotation of a square sample plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaneSpec {
    pub resolution: usize,
    pub lower: f64,
    pub upper: f64,
    /// Multiplies the second axis before it is added to the first; `i` gives
    /// the ordinary complex plane.
    pub rotation: C,
}

impl Default for PlaneSpec {
    fn default() -> Self {
        PlaneSpec { resolution: 200, lower: -2.0, upper: 2.0, rotation: C::I }
    }
}

impl PlaneSpec {
    pub fn new(resolution: usize) -> Self {
        PlaneSpec { resolution, ..Default::default() }
    }

    pub fn with_bounds(mut self, lower: f64, upper: f64) -> Self {
        self.lower = lower;
        self.upper = upper;
        self
    }

    pub fn with_rotation(mut self, rotation: C) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_resolution(self.resolution)?;
        check_bounds(self.lower, self.upper)?;
        if !(self.rotation.re.is_finite() && self.rotation.im.is_finite()) {
            return Err(ConfigurationError::InvalidRotation { re: self.rotation.re, im: self.rotation.im });
        }
        Ok(())
    }

    /// Complex sample at `(row, col)`. Columns sweep the real axis from
    /// `lower` to `upper`; rows sweep the second axis from `upper` down to
    /// `lower` before rotation.
    pub(crate) fn point(&self, row: usize, col: usize, axis: &[f64]) -> C {
        let n = axis.len();
        let x = C::new(axis[col], 0.0);
        x.add(self.rotation.scale(axis[n - 1 - row]))
    }

    /// The `resolution × resolution` field of 2-component points.
    pub fn generate(&self) -> Result<Field, ConfigurationError> {
        self.validate()?;
        let n = self.resolution;
        point_count(n, 2)?;
        let axis = linspace(self.lower, self.upper, n);
        let points = (0..n)
            .flat_map(|row| (0..n).map(move |col| (row, col)))
            .map(|(row, col)| Vector::from(self.point(row, col, &axis)))
            .collect();
        Ok(Field { points, shape: FieldShape::Plane { rows: n, cols: n }, dim: 2 })
    }
}

/// Plane of 2-component points, see [`PlaneSpec::generate`].
pub fn plane(resolution: usize, lower: f64, upper: f64, rotation: C) -> Result<Field, ConfigurationError> {
    PlaneSpec { resolution, lower, upper, rotation }.generate()
}

/// Cartesian product of `dimension` copies of a `resolution`-point axis, in
/// row-major order (the first component varies slowest).
pub fn lattice(resolution: usize, lower: f64, upper: f64, dimension: usize) -> Result<Field, ConfigurationError> {
    check_resolution(resolution)?;
    check_bounds(lower, upper)?;
    if !(2..=MAX_DIM).contains(&dimension) {
        return Err(ConfigurationError::InvalidDimension(dimension));
    }
    let len = point_count(resolution, dimension)?;
    let axis = linspace(lower, upper, resolution);
    let mut points = Vec::with_capacity(len);
    let mut comps = [0.0; MAX_DIM];
    for index in 0..len {
        let mut rest = index;
        for slot in (0..dimension).rev() {
            comps[slot] = axis[rest % resolution];
            rest /= resolution;
        }
        points.push(Vector::from_padded(comps, dimension));
    }
    Ok(Field { points, shape: FieldShape::Lattice { len }, dim: dimension })
}

/// `resolution^dimension`, refused when it overflows or could not be
/// allocated as a vector field.
pub(crate) fn point_count(resolution: usize, dimension: usize) -> Result<usize, ConfigurationError> {
    let too_large = || ConfigurationError::TooManyPoints { resolution, dimension };
    let len = u32::try_from(dimension)
        .ok()
        .and_then(|d| resolution.checked_pow(d))
        .ok_or_else(too_large)?;
    match len.checked_mul(std::mem::size_of::<Vector>()) {
        Some(bytes) if bytes <= isize::MAX as usize => Ok(len),
        _ => Err(too_large()),
    }
}

fn check_resolution(resolution: usize) -> Result<(), ConfigurationError> {
    if resolution < 1 {
        return Err(ConfigurationError::InvalidResolution(resolution as i64));
    }
    Ok(())
}

fn check_bounds(lower: f64, upper: f64) -> Result<(), ConfigurationError> {
    if !(lower.is_finite() && upper.is_finite()) {
        return Err(ConfigurationError::InvalidBounds { lower, upper });
    }
    Ok(())
}
