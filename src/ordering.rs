use crate::error::ConfigurationError;
use crate::math::Vector;

/// Where the two free plane coordinates `x, y` and the two fixed parameters
/// `a, b` land in a 4-component vector. Changing the ordering changes which
/// cross-section of the 4D set is viewed, not the algebra.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisOrdering {
    /// `(x, y, a, b)`
    Default,
    /// `(a, x, y, b)`
    PartialVector,
    /// `(b, a, x, y)`
    Vector,
    /// `(a, b, x, y)`
    Dihedral,
}

impl AxisOrdering {
    pub const ALL: &'static [AxisOrdering] = &[
        AxisOrdering::Default,
        AxisOrdering::PartialVector,
        AxisOrdering::Vector,
        AxisOrdering::Dihedral,
    ];

    pub fn from_key(key: &str) -> Result<AxisOrdering, ConfigurationError> {
        AxisOrdering::ALL
            .iter()
            .copied()
            .find(|o| o.key() == key)
            .ok_or_else(|| ConfigurationError::UnknownOrdering(key.to_string()))
    }

    pub fn key(&self) -> &'static str {
        match self {
            AxisOrdering::Default => "default",
            AxisOrdering::PartialVector => "partial-vector",
            AxisOrdering::Vector => "vector",
            AxisOrdering::Dihedral => "dihedral",
        }
    }

    /// Basis units spanned by the free coordinates.
    pub fn short_name(&self) -> &'static str {
        match self {
            AxisOrdering::Default => "1",
            AxisOrdering::PartialVector => "j",
            AxisOrdering::Vector => "ijk",
            AxisOrdering::Dihedral => "1jk",
        }
    }

    pub fn apply(&self, x: f64, y: f64, a: f64, b: f64) -> Vector {
        let comps = match self {
            AxisOrdering::Default => [x, y, a, b],
            AxisOrdering::PartialVector => [a, x, y, b],
            AxisOrdering::Vector => [b, a, x, y],
            AxisOrdering::Dihedral => [a, b, x, y],
        };
        Vector::from(comps)
    }
}

/// How a 2D plane point plus fixed parameters becomes a full algebra vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Embedding {
    /// `(x, y)`, no parameters.
    Planar,
    /// `(a, x, y)`
    Leading,
    /// `(x, y, a)`
    Trailing,
    /// Four components laid out by an [`AxisOrdering`].
    Ordered(AxisOrdering),
}

impl Embedding {
    /// The natural embedding for an algebra of the given dimension.
    pub fn for_dimension(dim: usize, ordering: AxisOrdering) -> Embedding {
        match dim {
            2 => Embedding::Planar,
            3 => Embedding::Leading,
            _ => Embedding::Ordered(ordering),
        }
    }

    pub fn dimension(&self) -> usize {
        match self {
            Embedding::Planar => 2,
            Embedding::Leading | Embedding::Trailing => 3,
            Embedding::Ordered(_) => 4,
        }
    }

    pub fn parameter_count(&self) -> usize {
        self.dimension() - 2
    }

    pub fn check_params(&self, params: &[f64]) -> Result<(), ConfigurationError> {
        let expected = self.parameter_count();
        if params.len() != expected {
            return Err(ConfigurationError::ParameterCount { expected, found: params.len() });
        }
        Ok(())
    }

    /// The full vector for plane point `(x, y)`; `params` must hold exactly
    /// [`Embedding::parameter_count`] values.
    pub fn embed(&self, x: f64, y: f64, params: &[f64]) -> Result<Vector, ConfigurationError> {
        self.check_params(params)?;
        Ok(match (self, params) {
            (Embedding::Leading, &[a]) => Vector::from([a, x, y]),
            (Embedding::Trailing, &[a]) => Vector::from([x, y, a]),
            (Embedding::Ordered(ordering), &[a, b]) => ordering.apply(x, y, a, b),
            _ => Vector::from([x, y]),
        })
    }
}
