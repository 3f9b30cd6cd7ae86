//! Catalog-wide checks: every algebra's declared properties against random
//! samples, key round-trips, and the axis orderings' reductions.

use genmandel::{Algebra, AxisOrdering, C, Embedding, Vector, audit};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn declared_properties_match_samples() {
    let mut rng = StdRng::seed_from_u64(2024);
    for algebra in Algebra::ALL {
        let observed = audit(*algebra, 300, &mut rng).unwrap();
        assert!(
            observed.consistent_with(algebra.properties()),
            "{}: declared {:?}, observed {:?}",
            algebra.key(),
            algebra.properties(),
            observed
        );
    }
}

#[test]
fn generalized_complex_is_commutative_and_associative() {
    let mut rng = StdRng::seed_from_u64(5);
    for i_squared in [C::new(-1.0, 0.0), C::new(1.0, 0.0), C::new(0.0, 0.0), C::new(0.5, -1.5)] {
        let algebra = Algebra::Generalized { i_squared };
        let observed = audit(algebra, 100, &mut rng).unwrap();
        assert!(observed.commutative);
        assert!(observed.associative);
        assert!(observed.consistent_with(algebra.properties()));
    }
}

#[test]
fn catalog_keys_round_trip_and_are_unique() {
    let mut keys: Vec<&str> = Algebra::ALL.iter().map(|a| a.key()).collect();
    for algebra in Algebra::ALL {
        assert_eq!(Algebra::from_key(algebra.key()).unwrap(), *algebra);
        assert!((2..=4).contains(&algebra.dimension()));
        assert!(!algebra.label().is_empty());
    }
    let total = keys.len();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), total);
}

#[test]
fn multiplication_is_bilinear_under_doubling() {
    // doubling is exact in binary floating point, so this holds bit for bit
    let x = [0.75, -1.25, 0.5, 2.0];
    let y = [-0.3, 1.7, 1.1, -0.9];
    for algebra in Algebra::ALL {
        let dim = algebra.dimension();
        let vx = Vector::new(&x[..dim]).unwrap();
        let vy = Vector::new(&y[..dim]).unwrap();
        let doubled: Vec<f64> = x[..dim].iter().map(|c| 2.0 * c).collect();
        let vx2 = Vector::new(&doubled).unwrap();

        let double = |v: Vector| v.as_slice().iter().map(|c| 2.0 * c).collect::<Vec<f64>>();
        let left = algebra.multiply(&vx, &vy).unwrap();
        let right = algebra.multiply(&vy, &vx).unwrap();
        assert_eq!(algebra.multiply(&vx2, &vy).unwrap().as_slice(), double(left), "{}", algebra.key());
        assert_eq!(algebra.multiply(&vy, &vx2).unwrap().as_slice(), double(right), "{}", algebra.key());
    }
}

#[test]
fn orderings_reduce_to_the_plane_at_zero() {
    // with both parameters zero, (x, y) keeps its values in every layout
    for ordering in AxisOrdering::ALL {
        let v = Embedding::Ordered(*ordering).embed(1.5, -0.5, &[0.0, 0.0]).unwrap();
        let nonzero: Vec<f64> = v.as_slice().iter().copied().filter(|c| *c != 0.0).collect();
        assert_eq!(nonzero, vec![1.5, -0.5], "{}", ordering.key());
    }
}

#[test]
fn orderings_place_components_where_documented() {
    let (x, y, a, b) = (1.0, 2.0, 3.0, 4.0);
    assert_eq!(AxisOrdering::Default.apply(x, y, a, b), Vector::from([1.0, 2.0, 3.0, 4.0]));
    assert_eq!(AxisOrdering::PartialVector.apply(x, y, a, b), Vector::from([3.0, 1.0, 2.0, 4.0]));
    assert_eq!(AxisOrdering::Vector.apply(x, y, a, b), Vector::from([4.0, 3.0, 1.0, 2.0]));
    assert_eq!(AxisOrdering::Dihedral.apply(x, y, a, b), Vector::from([3.0, 4.0, 1.0, 2.0]));
}
