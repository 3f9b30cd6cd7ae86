pub mod math;
pub mod error;
pub mod algebra;
pub mod norm;
pub mod grid;
pub mod ordering;
pub mod escape;
pub mod slice;
pub mod properties;
pub mod config;

pub use math::{C, Vector, linspace};
pub use error::{ConfigurationError, EngineError, Result, ShapeError};
pub use algebra::{Algebra, Properties};
pub use norm::{Norm, escaped};
pub use grid::{Field, FieldShape, PlaneSpec, lattice, plane};
pub use ordering::{AxisOrdering, Embedding};
pub use escape::{EscapeEngine, Strategy, classical, classical_count, reshape};
pub use slice::{Frame, Frames, SliceSequence, Slicer, catalog_sequences};
pub use properties::{Audit, audit};
pub use config::{RunConfig, ValidatedRun};
