//! Property-based invariants of the escape engine.
//!
//! 1. Freezing a point at first escape gives the accumulated count whenever
//!    the escaped region is absorbing and no orbit overflows. Everywhere
//!    else the engine refuses to freeze.
//! 2. A 2D lattice and the plane over the same axis agree point for point.
//! 3. Counts never exceed the iteration budget.
//! 4. The all-zero 4D slice of the quaternions is the complex plane.

use genmandel::{
    Algebra, AxisOrdering, C, ConfigurationError, EngineError, EscapeEngine, Norm, PlaneSpec, Slicer,
    lattice,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn complex(iterations: u32, threshold: f64) -> EscapeEngine {
    EscapeEngine::new(Algebra::Complex, Norm::SumOfSquares)
        .with_iterations(iterations)
        .with_threshold(threshold)
}

fn quaternion(iterations: u32, threshold: f64) -> EscapeEngine {
    EscapeEngine::new(Algebra::Quaternion, Norm::SumOfSquares)
        .with_iterations(iterations)
        .with_threshold(threshold)
}

fn two_d_algebra() -> impl Strategy<Value = Algebra> {
    prop::sample::select(
        Algebra::ALL.iter().copied().filter(|a| a.dimension() == 2).collect::<Vec<_>>(),
    )
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Freeze-on-escape equivalence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn complex_freeze_matches_accumulate(
        resolution in 1usize..24,
        iterations in 0u32..=8,
        threshold in 8.0f64..40.0,
    ) {
        let spec = PlaneSpec::new(resolution);
        let accumulate = complex(iterations, threshold).plane(&spec).unwrap();
        let frozen = complex(iterations, threshold)
            .with_strategy(genmandel::Strategy::FreezeOnEscape)
            .plane(&spec)
            .unwrap();
        prop_assert_eq!(accumulate, frozen);
    }

    #[test]
    fn quaternion_freeze_matches_accumulate(
        resolution in 1usize..12,
        iterations in 0u32..=6,
        threshold in 16.0f64..64.0,
        a in -1.0f64..1.0,
        b in -1.0f64..1.0,
        ordering in prop::sample::select(AxisOrdering::ALL.to_vec()),
    ) {
        let spec = PlaneSpec::new(resolution);
        let accumulate = Slicer::for_algebra(quaternion(iterations, threshold), spec, ordering).unwrap();
        let frozen = Slicer::for_algebra(
            quaternion(iterations, threshold).with_strategy(genmandel::Strategy::FreezeOnEscape),
            spec,
            ordering,
        )
        .unwrap();
        prop_assert_eq!(accumulate.slice(&[a, b]).unwrap(), frozen.slice(&[a, b]).unwrap());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1b. Freeze is refused outside the regimes where it is exact
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn freeze_refused_for_low_complex_thresholds(
        resolution in 1usize..24,
        iterations in 1u32..=12,
        threshold in 0.5f64..5.0,
    ) {
        // below ~5.08 an escaped point on [-2, 2] can fall back under the threshold
        let frozen = complex(iterations, threshold).with_strategy(genmandel::Strategy::FreezeOnEscape);
        let err = frozen.plane(&PlaneSpec::new(resolution)).unwrap_err();
        prop_assert!(
            matches!(err, EngineError::Configuration(ConfigurationError::FreezeNotExact { .. })),
            "unexpected error: {}", err
        );
    }

    #[test]
    fn freeze_refused_for_unsupported_algebra_or_norm(
        algebra_index in 0usize..Algebra::ALL.len(),
        norm in prop::sample::select(Norm::ALL.to_vec()),
        threshold in 8.0f64..64.0,
    ) {
        let algebra = Algebra::ALL[algebra_index];
        prop_assume!(
            !(matches!(algebra, Algebra::Complex | Algebra::Quaternion) && norm == Norm::SumOfSquares)
        );
        let engine = EscapeEngine::new(algebra, norm)
            .with_threshold(threshold)
            .with_strategy(genmandel::Strategy::FreezeOnEscape);
        let refused = matches!(engine.validate(), Err(ConfigurationError::FreezeUnsupported { .. }));
        prop_assert!(refused);
        let slicer = Slicer::for_algebra(engine, PlaneSpec::new(4), AxisOrdering::Default);
        prop_assert!(slicer.is_err());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Lattice and plane agree
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn lattice_matches_unrotated_plane(
        algebra in two_d_algebra(),
        resolution in 1usize..16,
        iterations in 0u32..10,
    ) {
        let engine = EscapeEngine::new(algebra, Norm::SumOfSquares).with_iterations(iterations);
        let spec = PlaneSpec::new(resolution).with_rotation(C::I);
        let plane = engine.plane(&spec).unwrap();
        let field = lattice(resolution, spec.lower, spec.upper, 2).unwrap();
        let flat = engine.run_field(&field).unwrap();
        let mask = engine.bounded_mask(&field).unwrap();

        let n = resolution;
        for i in 0..n {
            for j in 0..n {
                // lattice point (axis[i], axis[j]) sits in column i, counted from the top
                prop_assert_eq!(flat[i * n + j], plane[[n - 1 - j, i]], "i={}, j={}", i, j);
                prop_assert_eq!(mask[i * n + j], plane[[n - 1 - j, i]] == 0);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Counts are bounded by the budget
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn counts_never_exceed_iterations(
        algebra_index in 0usize..Algebra::ALL.len(),
        norm in prop::sample::select(Norm::ALL.to_vec()),
        iterations in 0u32..12,
        threshold in 0.5f64..32.0,
    ) {
        let algebra = Algebra::ALL[algebra_index];
        let engine = EscapeEngine::new(algebra, norm)
            .with_iterations(iterations)
            .with_threshold(threshold);
        let slicer = Slicer::for_algebra(engine, PlaneSpec::new(6), AxisOrdering::Dihedral).unwrap();
        let params = vec![0.3; slicer.embedding.parameter_count()];
        let counts = slicer.slice(&params).unwrap();
        prop_assert_eq!(counts.dim(), (6, 6));
        prop_assert!(counts.iter().all(|&n| n <= iterations));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Reduction to the complex plane
// ═════════════════════════════════════════════════════════════════════════

#[test]
fn zero_quaternion_slice_is_complex_plane_for_default_ordering() {
    let spec = PlaneSpec::new(17);
    let flat = complex(10, 4.0).plane(&spec).unwrap();
    let slicer = Slicer::for_algebra(quaternion(10, 4.0), spec, AxisOrdering::Default).unwrap();
    assert_eq!(slicer.slice(&[0.0, 0.0]).unwrap(), flat);
}
