use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algebra::Algebra;
use crate::error::ConfigurationError;
use crate::escape::{EscapeEngine, Strategy};
use crate::grid::PlaneSpec;
use crate::math::C;
use crate::norm::Norm;
use crate::ordering::AxisOrdering;

/// A run description as it arrives from a JSON file or the command line.
///
/// Counts are signed so that negative values surface as configuration
/// errors instead of parse failures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub algebra: String,
    pub norm: String,
    pub ordering: String,
    pub strategy: String,
    pub power: u32,
    pub iterations: i64,
    pub threshold: f64,
    pub resolution: i64,
    pub lower: f64,
    pub upper: f64,
    /// Rotate the plane by the primitive n-th root of unity; `4` is the
    /// ordinary orientation.
    pub unity_root: Option<u32>,
    /// Every fixed component of a 3D/4D slice; a sweep replaces the first.
    pub params: Vec<f64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            algebra: "complex".to_string(),
            norm: "norm2".to_string(),
            ordering: "default".to_string(),
            strategy: "accumulate".to_string(),
            power: 2,
            iterations: 7,
            threshold: 4.0,
            resolution: 200,
            lower: -2.0,
            upper: 2.0,
            unity_root: None,
            params: Vec::new(),
        }
    }
}

/// Everything a run needs, with every key resolved and every number checked.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedRun {
    pub engine: EscapeEngine,
    pub plane: PlaneSpec,
    pub ordering: AxisOrdering,
    pub params: Vec<f64>,
}

impl RunConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let text = fs::read_to_string(path)?;
        RunConfig::from_json(&text)
    }

    pub fn validate(&self) -> Result<ValidatedRun, ConfigurationError> {
        if self.iterations < 0 {
            return Err(ConfigurationError::NegativeIterations(self.iterations));
        }
        let iterations = u32::try_from(self.iterations)
            .map_err(|_| ConfigurationError::TooManyIterations(self.iterations))?;
        if self.resolution < 1 {
            return Err(ConfigurationError::InvalidResolution(self.resolution));
        }
        let resolution = usize::try_from(self.resolution)
            .map_err(|_| ConfigurationError::InvalidResolution(self.resolution))?;

        let algebra = Algebra::from_key(&self.algebra)?;
        let norm = Norm::from_key(&self.norm)?;
        let ordering = AxisOrdering::from_key(&self.ordering)?;
        let strategy = Strategy::from_key(&self.strategy)?;

        let engine = EscapeEngine::new(algebra, norm)
            .with_power(self.power)
            .with_iterations(iterations)
            .with_threshold(self.threshold)
            .with_strategy(strategy);
        engine.validate()?;

        let rotation = self.unity_root.map(C::root_of_unity).unwrap_or(C::I);
        let plane = PlaneSpec::new(resolution)
            .with_bounds(self.lower, self.upper)
            .with_rotation(rotation);
        plane.validate()?;

        Ok(ValidatedRun { engine, plane, ordering, params: self.params.clone() })
    }
}
