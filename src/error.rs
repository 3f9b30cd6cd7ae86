use thiserror::Error;

/// Result type used throughout the escape-time engine.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Raised when a vector or field does not have the shape an operator expects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("expected a {expected}-component vector, found {found} components")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("vectors must have 2 to 4 components, found {0}")]
    UnsupportedDimension(usize),
    #[error("field shape holds {expected} points but {found} were supplied")]
    LengthMismatch { expected: usize, found: usize },
    #[error("initial and constant fields differ in shape or dimension")]
    FieldMismatch,
    #[error("a lattice field has no 2D shape to reshape into")]
    NotPlanar,
}

/// Raised before any computation when a run is configured with bad values.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("iteration count must be non-negative, got {0}")]
    NegativeIterations(i64),
    #[error("iteration count {0} does not fit in 32 bits")]
    TooManyIterations(i64),
    #[error("resolution must be at least 1, got {0}")]
    InvalidResolution(i64),
    #[error("power must be at least 1, got {0}")]
    InvalidPower(u32),
    #[error("threshold must be a finite number, got {0}")]
    InvalidThreshold(f64),
    #[error("bounds must be finite, got [{lower}, {upper}]")]
    InvalidBounds { lower: f64, upper: f64 },
    #[error("plane rotation must be finite, got {re} + {im}i")]
    InvalidRotation { re: f64, im: f64 },
    #[error("lattice dimension must be 2 to 4, got {0}")]
    InvalidDimension(usize),
    #[error("a grid of {resolution}^{dimension} points is too large")]
    TooManyPoints { resolution: usize, dimension: usize },
    #[error("expected {expected} fixed parameters, got {found}")]
    ParameterCount { expected: usize, found: usize },
    #[error("unknown algebra `{0}`")]
    UnknownAlgebra(String),
    #[error("unknown norm `{0}`")]
    UnknownNorm(String),
    #[error("unknown ordering `{0}`")]
    UnknownOrdering(String),
    #[error("unknown strategy `{0}`")]
    UnknownStrategy(String),
    #[error("freeze-on-escape is not exact for `{algebra}` under `{norm}` at power {power}")]
    FreezeUnsupported { algebra: String, norm: String, power: u32 },
    #[error("freeze-on-escape would change counts at threshold {threshold} over {iterations} iterations on this field")]
    FreezeNotExact { threshold: f64, iterations: u32 },
    #[error("invalid run config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not read run config: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
