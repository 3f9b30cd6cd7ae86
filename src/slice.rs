// 2D cross-sections of 3D and 4D escape fields. A slice fixes every
// component but two, sweeps those two over a plane and reshapes the counts
// back into the plane's grid.

use ndarray::Array2;
use tracing::debug;

use crate::error::{ConfigurationError, EngineError, Result, ShapeError};
use crate::escape::{EscapeEngine, reshape};
use crate::grid::PlaneSpec;
use crate::ordering::{AxisOrdering, Embedding};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slicer {
    pub engine: EscapeEngine,
    pub plane: PlaneSpec,
    pub embedding: Embedding,
}

impl Slicer {
    pub fn new(engine: EscapeEngine, plane: PlaneSpec, embedding: Embedding) -> Result<Self> {
        engine.validate()?;
        plane.validate()?;
        let expected = engine.algebra.dimension();
        if embedding.dimension() != expected {
            return Err(ShapeError::DimensionMismatch { expected, found: embedding.dimension() }.into());
        }
        Ok(Slicer { engine, plane, embedding })
    }

    /// Slicer using the natural embedding for the engine's algebra: planar in
    /// 2D, leading parameter in 3D, `ordering` in 4D.
    pub fn for_algebra(engine: EscapeEngine, plane: PlaneSpec, ordering: AxisOrdering) -> Result<Self> {
        let embedding = Embedding::for_dimension(engine.algebra.dimension(), ordering);
        Slicer::new(engine, plane, embedding)
    }

    /// Batch label, e.g. `slices Quaternion ijk`.
    pub fn label(&self) -> String {
        match self.embedding {
            Embedding::Ordered(ordering) => {
                format!("slices {} {}", self.engine.algebra.short_name(), ordering.short_name())
            }
            _ => format!("slices {}", self.engine.algebra.short_name()),
        }
    }

    /// Counts over the plane with the fixed components set to `params`.
    pub fn slice(&self, params: &[f64]) -> Result<Array2<u32>> {
        self.embedding.check_params(params)?;
        let plane = self.plane.generate()?;
        let lifted = plane.try_map(|p| {
            let xy = p.as_slice();
            Ok::<_, EngineError>(self.embedding.embed(xy[0], xy[1], params)?)
        })?;
        let counts = self.engine.run_field(&lifted)?;
        Ok(reshape(counts, lifted.shape())?)
    }

    /// Lazy sequence of slices, one per entry of `values`. Each value is the
    /// first fixed parameter; `rest` supplies any remaining ones.
    pub fn sequence(&self, values: Vec<f64>, rest: Vec<f64>) -> std::result::Result<SliceSequence, ConfigurationError> {
        let expected = self.embedding.parameter_count();
        if expected == 0 || rest.len() + 1 != expected {
            return Err(ConfigurationError::ParameterCount { expected, found: rest.len() + 1 });
        }
        Ok(SliceSequence { slicer: *self, values, rest })
    }

    /// Like [`Slicer::sequence`], but `fixed` holds every fixed parameter,
    /// as for [`Slicer::slice`]; each value replaces `fixed[0]`.
    pub fn sweep(&self, values: Vec<f64>, fixed: &[f64]) -> std::result::Result<SliceSequence, ConfigurationError> {
        self.embedding.check_params(fixed)?;
        match fixed.split_first() {
            Some((_, rest)) => self.sequence(values, rest.to_vec()),
            None => Err(ConfigurationError::ParameterCount { expected: 1, found: 0 }),
        }
    }
}

/// One rendered-to-be frame: the swept parameter, a title and the counts.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub value: f64,
    pub title: String,
    pub counts: Array2<u32>,
}

/// Finite, restartable sequence of slices. Nothing is computed until the
/// sequence is iterated, and every iteration starts from the first value.
#[derive(Clone, Debug)]
pub struct SliceSequence {
    slicer: Slicer,
    values: Vec<f64>,
    rest: Vec<f64>,
}

impl SliceSequence {
    pub fn label(&self) -> String {
        self.slicer.label()
    }

    pub fn slicer(&self) -> &Slicer {
        &self.slicer
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> Frames<'_> {
        Frames { sequence: self, next: 0 }
    }
}

impl<'a> IntoIterator for &'a SliceSequence {
    type Item = Result<Frame>;
    type IntoIter = Frames<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Frames<'a> {
    sequence: &'a SliceSequence,
    next: usize,
}

impl Iterator for Frames<'_> {
    type Item = Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        let value = *self.sequence.values.get(self.next)?;
        self.next += 1;
        debug!(value, label = %self.sequence.label(), "computing slice");

        let mut params = Vec::with_capacity(self.sequence.rest.len() + 1);
        params.push(value);
        params.extend_from_slice(&self.sequence.rest);

        Some(self.sequence.slicer.slice(&params).map(|counts| Frame {
            value,
            title: format!("$\\Re(z) = {value}$"),
            counts,
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.sequence.values.len() - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Frames<'_> {}

/// One sequence per axis ordering for a 4D algebra, sweeping the first
/// fixed parameter over `values` with the second held at zero.
pub fn catalog_sequences(engine: EscapeEngine, plane: PlaneSpec, values: &[f64]) -> Result<Vec<SliceSequence>> {
    AxisOrdering::ALL
        .iter()
        .map(|&ordering| {
            let slicer = Slicer::new(engine, plane, Embedding::Ordered(ordering))?;
            Ok(slicer.sequence(values.to_vec(), vec![0.0])?)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::Algebra;
    use crate::norm::Norm;

    fn engine(algebra: Algebra) -> EscapeEngine {
        EscapeEngine::new(algebra, Norm::SumOfSquares).with_iterations(6).with_threshold(16.0)
    }

    #[test]
    fn slices_have_plane_shape() {
        let slicer = Slicer::for_algebra(engine(Algebra::SixthRoot), PlaneSpec::new(12), AxisOrdering::Default).unwrap();
        let counts = slicer.slice(&[0.25]).unwrap();
        assert_eq!(counts.dim(), (12, 12));
        assert!(counts.iter().all(|&n| n <= 6));
    }

    #[test]
    fn quaternion_default_slice_at_origin_is_complex_plane() {
        let spec = PlaneSpec::new(21);
        let q = Slicer::for_algebra(engine(Algebra::Quaternion), spec, AxisOrdering::Default).unwrap();
        let flat = engine(Algebra::Complex).plane(&spec).unwrap();
        assert_eq!(q.slice(&[0.0, 0.0]).unwrap(), flat);
    }

    #[test]
    fn square_rotation_default_slice_at_origin_is_split_complex_plane() {
        let spec = PlaneSpec::new(15);
        let s = Slicer::for_algebra(engine(Algebra::SquareRotation), spec, AxisOrdering::Default).unwrap();
        let flat = engine(Algebra::SplitComplex).plane(&spec).unwrap();
        assert_eq!(s.slice(&[0.0, 0.0]).unwrap(), flat);
    }

    #[test]
    fn wrong_parameter_count_is_a_configuration_error() {
        let slicer = Slicer::for_algebra(engine(Algebra::Quaternion), PlaneSpec::new(4), AxisOrdering::Vector).unwrap();
        assert!(matches!(
            slicer.slice(&[0.0]),
            Err(crate::error::EngineError::Configuration(ConfigurationError::ParameterCount { .. }))
        ));
        assert!(slicer.sequence(vec![0.0], vec![]).is_err());
    }

    #[test]
    fn embedding_must_match_algebra() {
        let err = Slicer::new(engine(Algebra::Quaternion), PlaneSpec::new(4), Embedding::Leading).unwrap_err();
        assert!(matches!(
            err,
            crate::error::EngineError::Shape(ShapeError::DimensionMismatch { expected: 4, found: 3 })
        ));
    }

    #[test]
    fn sequence_is_lazy_and_restartable() {
        let slicer = Slicer::for_algebra(engine(Algebra::SixthRoot), PlaneSpec::new(6), AxisOrdering::Default).unwrap();
        let seq = slicer.sequence(vec![-1.0, 0.0, 1.0], vec![]).unwrap();
        assert_eq!(seq.iter().len(), 3);

        let first: Vec<Frame> = seq.iter().collect::<Result<_>>().unwrap();
        let second: Vec<Frame> = (&seq).into_iter().collect::<Result<_>>().unwrap();
        assert_eq!(first, second);
        assert_eq!(first[1].value, 0.0);
        assert_eq!(first[1].counts, slicer.slice(&[0.0]).unwrap());
        assert_eq!(first[2].title, "$\\Re(z) = 1$");
    }

    #[test]
    fn sweep_takes_the_same_parameters_as_slice() {
        let slicer = Slicer::for_algebra(engine(Algebra::Quaternion), PlaneSpec::new(8), AxisOrdering::Vector).unwrap();
        let seq = slicer.sweep(vec![-0.5, 0.25], &[0.5, 0.3]).unwrap();
        let frames: Vec<Frame> = seq.iter().collect::<Result<_>>().unwrap();
        assert_eq!(frames[0].counts, slicer.slice(&[-0.5, 0.3]).unwrap());
        assert_eq!(frames[1].counts, slicer.slice(&[0.25, 0.3]).unwrap());

        assert!(slicer.sweep(vec![0.0], &[0.5]).is_err());
        let planar = Slicer::for_algebra(engine(Algebra::Complex), PlaneSpec::new(4), AxisOrdering::Default).unwrap();
        assert!(matches!(
            planar.sweep(vec![0.0], &[]),
            Err(ConfigurationError::ParameterCount { expected: 1, found: 0 })
        ));
    }

    #[test]
    fn catalog_sequences_label_each_ordering() {
        let seqs = catalog_sequences(engine(Algebra::Quaternion), PlaneSpec::new(4), &[0.0, 0.5]).unwrap();
        let labels: Vec<String> = seqs.iter().map(SliceSequence::label).collect();
        assert_eq!(
            labels,
            vec![
                "slices Quaternion 1",
                "slices Quaternion j",
                "slices Quaternion ijk",
                "slices Quaternion 1jk",
            ]
        );
        assert!(seqs.iter().all(|s| s.len() == 2));
    }

    #[test]
    fn catalog_sequences_need_a_4d_algebra() {
        assert!(catalog_sequences(engine(Algebra::SixthRoot), PlaneSpec::new(4), &[0.0]).is_err());
    }
}
