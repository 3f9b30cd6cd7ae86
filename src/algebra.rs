// Multiplication rules for the 2-, 3- and 4-component algebras the escape
// engine iterates over. Every rule is bilinear: each output component is a
// signed sum of pairwise products of the input components, and the signs
// are the whole content of the algebra.

use serde::Serialize;

use crate::error::{ConfigurationError, ShapeError};
use crate::math::{C, Vector};

/// Algebraic properties an entry claims for itself.
///
/// `anticommutative` means the imaginary units anticommute: for `x`, `y` with
/// a zero real component, every non-real component of `xy + yx` vanishes.
/// Non-associativity is `!associative`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Properties {
    pub commutative: bool,
    pub anticommutative: bool,
    pub associative: bool,
}

impl Properties {
    const fn new(commutative: bool, anticommutative: bool, associative: bool) -> Self {
        Properties { commutative, anticommutative, associative }
    }
}

const COMM_ASSOC: Properties = Properties::new(true, false, true);
const COMM_NONASSOC: Properties = Properties::new(true, false, false);
const ANTI_ASSOC: Properties = Properties::new(false, true, true);
const ANTI_NONASSOC: Properties = Properties::new(false, true, false);
const NONE: Properties = Properties::new(false, false, false);

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Algebra {
    // 2D
    Complex,
    SplitComplex,
    Indeterminate,
    NegIndeterminate,
    /// `i^2 = α` for an arbitrary complex α.
    Generalized { i_squared: C },

    // 3D
    SixthRoot,
    MutuallyComplex,
    MutuallySplit,
    DoublyComplex,
    AntiPartAssoc,
    AntiNonassociative,
    AntiPartAssocNeg,
    Shuffle,
    ShuffleNeg1,
    ShuffleNeg2,
    ShuffleNonassoc,
    ShuffleNonassocNeg,

    // 4D
    Quaternion,
    Dihedral,
    Eighth,
    SquareRotation,
    TripleSplitComplex,
    TripleComplex,
    SplitComplexDoubleComplex,
    ComplexDoubleSplitComplex,
    SplitDihedral,
    AntiEighth,
    NegiDihedral,
    NegiQuaternion,
    PartComplex,
    PartComplex2,
    PartComplexSame,
    PartComplexOpposite,
    PartComplexHalf,
    PartComplexSplitHalf,
    PartDoubleComplexHalf,
}

impl Algebra {
    /// Every fixed catalog entry. `Generalized` is parametric and not listed.
    pub const ALL: &'static [Algebra] = &[
        Algebra::Complex,
        Algebra::SplitComplex,
        Algebra::Indeterminate,
        Algebra::NegIndeterminate,
        Algebra::SixthRoot,
        Algebra::MutuallyComplex,
        Algebra::MutuallySplit,
        Algebra::DoublyComplex,
        Algebra::AntiPartAssoc,
        Algebra::AntiNonassociative,
        Algebra::AntiPartAssocNeg,
        Algebra::Shuffle,
        Algebra::ShuffleNeg1,
        Algebra::ShuffleNeg2,
        Algebra::ShuffleNonassoc,
        Algebra::ShuffleNonassocNeg,
        Algebra::Quaternion,
        Algebra::Dihedral,
        Algebra::Eighth,
        Algebra::SquareRotation,
        Algebra::TripleSplitComplex,
        Algebra::TripleComplex,
        Algebra::SplitComplexDoubleComplex,
        Algebra::ComplexDoubleSplitComplex,
        Algebra::SplitDihedral,
        Algebra::AntiEighth,
        Algebra::NegiDihedral,
        Algebra::NegiQuaternion,
        Algebra::PartComplex,
        Algebra::PartComplex2,
        Algebra::PartComplexSame,
        Algebra::PartComplexOpposite,
        Algebra::PartComplexHalf,
        Algebra::PartComplexSplitHalf,
        Algebra::PartDoubleComplexHalf,
    ];

    /// Looks an entry up by key. The parametric algebra is spelled
    /// `generalized:<re>:<im>`, e.g. `generalized:0.5:-1`.
    pub fn from_key(key: &str) -> Result<Algebra, ConfigurationError> {
        if let Some(rest) = key.strip_prefix("generalized:") {
            let unknown = || ConfigurationError::UnknownAlgebra(key.to_string());
            let (re, im) = rest.split_once(':').ok_or_else(unknown)?;
            let re: f64 = re.trim().parse().map_err(|_| unknown())?;
            let im: f64 = im.trim().parse().map_err(|_| unknown())?;
            return Ok(Algebra::Generalized { i_squared: C::new(re, im) });
        }
        Algebra::ALL
            .iter()
            .copied()
            .find(|a| a.key() == key)
            .ok_or_else(|| ConfigurationError::UnknownAlgebra(key.to_string()))
    }

    pub fn key(&self) -> &'static str {
        match self {
            Algebra::Complex => "complex",
            Algebra::SplitComplex => "split-complex",
            Algebra::Indeterminate => "indeterminate",
            Algebra::NegIndeterminate => "neg-indeterminate",
            Algebra::Generalized { .. } => "generalized",
            Algebra::SixthRoot => "sixth-root",
            Algebra::MutuallyComplex => "mutually-complex",
            Algebra::MutuallySplit => "mutually-split",
            Algebra::DoublyComplex => "doubly-complex",
            Algebra::AntiPartAssoc => "anti-part-assoc",
            Algebra::AntiNonassociative => "anti-nonassociative",
            Algebra::AntiPartAssocNeg => "anti-part-assoc-neg",
            Algebra::Shuffle => "shuffle",
            Algebra::ShuffleNeg1 => "shuffle-neg1",
            Algebra::ShuffleNeg2 => "shuffle-neg2",
            Algebra::ShuffleNonassoc => "shuffle-nonassoc",
            Algebra::ShuffleNonassocNeg => "shuffle-nonassoc-neg",
            Algebra::Quaternion => "quaternion",
            Algebra::Dihedral => "dihedral",
            Algebra::Eighth => "eighth",
            Algebra::SquareRotation => "square-rotation",
            Algebra::TripleSplitComplex => "triple-split-complex",
            Algebra::TripleComplex => "triple-complex",
            Algebra::SplitComplexDoubleComplex => "split-complex-double-complex",
            Algebra::ComplexDoubleSplitComplex => "complex-double-split-complex",
            Algebra::SplitDihedral => "split-dihedral",
            Algebra::AntiEighth => "anti-eighth",
            Algebra::NegiDihedral => "negi-dihedral",
            Algebra::NegiQuaternion => "negi-quaternion",
            Algebra::PartComplex => "part-complex",
            Algebra::PartComplex2 => "part-complex-2",
            Algebra::PartComplexSame => "part-complex-same",
            Algebra::PartComplexOpposite => "part-complex-opposite",
            Algebra::PartComplexHalf => "part-complex-half",
            Algebra::PartComplexSplitHalf => "part-complex-split-half",
            Algebra::PartDoubleComplexHalf => "part-double-complex-half",
        }
    }

    /// One-word name used in batch labels such as `slices Quaternion ijk`.
    pub fn short_name(&self) -> &'static str {
        match self {
            Algebra::Complex => "Complex",
            Algebra::SplitComplex => "Splitcomplex",
            Algebra::Indeterminate => "Indeterminate",
            Algebra::NegIndeterminate => "Neg-indeterminate",
            Algebra::Generalized { .. } => "Generalized",
            Algebra::SixthRoot => "6th",
            Algebra::MutuallyComplex => "Mutually-complex",
            Algebra::MutuallySplit => "Mutually-split",
            Algebra::DoublyComplex => "Doubly",
            Algebra::AntiPartAssoc => "Anti-part-assoc",
            Algebra::AntiNonassociative => "Anti-nonassociative",
            Algebra::AntiPartAssocNeg => "Anti-part-assoc-neg",
            Algebra::Shuffle => "Shuffling",
            Algebra::ShuffleNeg1 => "Shuffling-1",
            Algebra::ShuffleNeg2 => "Shuffling-2",
            Algebra::ShuffleNonassoc => "Nonassociative",
            Algebra::ShuffleNonassocNeg => "Nonassociative-2",
            Algebra::Quaternion => "Quaternion",
            Algebra::Dihedral => "Dihedral",
            Algebra::Eighth => "8th",
            Algebra::SquareRotation => "Square",
            Algebra::TripleSplitComplex => "Triply-split",
            Algebra::TripleComplex => "Triply",
            Algebra::SplitComplexDoubleComplex => "Complex-ij",
            Algebra::ComplexDoubleSplitComplex => "Complex-i",
            Algebra::SplitDihedral => "Split-dihedral",
            Algebra::AntiEighth => "Anti-8th",
            Algebra::NegiDihedral => "Negi-dihedral",
            Algebra::NegiQuaternion => "Negi-quaternion",
            Algebra::PartComplex => "Part",
            Algebra::PartComplex2 => "Part2",
            Algebra::PartComplexSame => "Matching",
            Algebra::PartComplexOpposite => "Opposite",
            Algebra::PartComplexHalf => "Half",
            Algebra::PartComplexSplitHalf => "Negi",
            Algebra::PartDoubleComplexHalf => "Negiopp",
        }
    }

    /// Defining identity of the basis units, for plot titles.
    pub fn label(&self) -> String {
        let s = match self {
            Algebra::Complex => "$i^2 = -1$",
            Algebra::SplitComplex => "$i^2 = 1$",
            Algebra::Indeterminate => "$i^2 = i$",
            Algebra::NegIndeterminate => "$i^2 = -i$",
            Algebra::Generalized { i_squared } => {
                return format!("$i^2 = {} + {}i$", i_squared.re, i_squared.im);
            }
            Algebra::SixthRoot => "$i^2 = -j, j^2 = -i, ij = 1$",
            Algebra::MutuallyComplex => "mutually complex",
            Algebra::MutuallySplit => "mutually split-complex",
            Algebra::DoublyComplex => "doubly complex",
            Algebra::AntiPartAssoc => "anti, partly associative",
            Algebra::AntiNonassociative => "anti, nonassociative",
            Algebra::AntiPartAssocNeg => "anti, partly associative, negated",
            Algebra::Shuffle => "shuffling pointwise",
            Algebra::ShuffleNeg1 => "shuffling pointwise, one negative",
            Algebra::ShuffleNeg2 => "shuffling pointwise, two negatives",
            Algebra::ShuffleNonassoc => "$ij = k, ik = j, jk = i$",
            Algebra::ShuffleNonassocNeg => "$ij = k, ik = j, jk = i$, opposite shuffle",
            Algebra::Quaternion => "$i^2 = j^2 = k^2 = ijk = -1$",
            Algebra::Dihedral => "$i^2 = -1, j^2 = k^2 = 1$",
            Algebra::Eighth => "$j = \\sqrt{i}, k = -\\sqrt{i}$",
            Algebra::SquareRotation => "$j^2 = k^2 = ijk = i, i^2 = 1$",
            Algebra::TripleSplitComplex => "$i^2 = j^2 = k^2 = ijk = 1$",
            Algebra::TripleComplex => "$i^2 = j^2 = k^2 = -1, ijk = 1$",
            Algebra::SplitComplexDoubleComplex => "$i^2 = j^2 = -1, k^2 = 1, ij = -k$",
            Algebra::ComplexDoubleSplitComplex => "$i^2 = -1, j^2 = k^2 = 1, jk = -i$",
            Algebra::SplitDihedral => "$i^2 = ijk = 1, j^2 = k^2 = -1$",
            Algebra::AntiEighth => "$i^2 = -1, j^2 = k^2 = i$",
            Algebra::NegiDihedral => "$i^2 = ijk = 1, j^2 = k^2 = 1$",
            Algebra::NegiQuaternion => "$i^2 = j^2 = k^2 = 1$, quaternion cross terms",
            Algebra::PartComplex => "part complex, part doubly complex",
            Algebra::PartComplex2 => "part complex, part doubly complex (2)",
            Algebra::PartComplexSame => "matching signs of $i^2, jk, kj$",
            Algebra::PartComplexOpposite => "opposite signs of $i^2$ and $jk, kj$",
            Algebra::PartComplexHalf => "half matching signs of $i^2, jk, kj$",
            Algebra::PartComplexSplitHalf => "$i^2, jk, kj$ opposite to $j^2, k^2$",
            Algebra::PartDoubleComplexHalf => "$i^2, j^2, jk, kj$ opposite to $k^2$",
        };
        s.to_string()
    }

    pub fn dimension(&self) -> usize {
        use Algebra::*;
        match self {
            Complex | SplitComplex | Indeterminate | NegIndeterminate | Generalized { .. } => 2,
            SixthRoot | MutuallyComplex | MutuallySplit | DoublyComplex | AntiPartAssoc
            | AntiNonassociative | AntiPartAssocNeg | Shuffle | ShuffleNeg1 | ShuffleNeg2
            | ShuffleNonassoc | ShuffleNonassocNeg => 3,
            _ => 4,
        }
    }

    pub fn properties(&self) -> Properties {
        use Algebra::*;
        match self {
            Complex | SplitComplex | Indeterminate | NegIndeterminate | Generalized { .. } => {
                COMM_ASSOC
            }
            SixthRoot => COMM_ASSOC,
            MutuallyComplex | MutuallySplit | DoublyComplex | AntiPartAssoc
            | AntiNonassociative | AntiPartAssocNeg => NONE,
            Shuffle | ShuffleNeg1 | ShuffleNeg2 | ShuffleNonassoc | ShuffleNonassocNeg => {
                COMM_NONASSOC
            }
            Quaternion | Dihedral => ANTI_ASSOC,
            NegiDihedral | NegiQuaternion => ANTI_NONASSOC,
            Eighth | SquareRotation | TripleSplitComplex | SplitComplexDoubleComplex
            | SplitDihedral => COMM_ASSOC,
            TripleComplex | ComplexDoubleSplitComplex => COMM_NONASSOC,
            AntiEighth => NONE,
            PartComplex | PartComplex2 | PartComplexSame | PartComplexOpposite
            | PartComplexHalf | PartComplexSplitHalf | PartDoubleComplexHalf => COMM_NONASSOC,
        }
    }

    /// `x * y` under this algebra. Both operands must have `dimension()`
    /// components.
    pub fn multiply(&self, x: &Vector, y: &Vector) -> Result<Vector, ShapeError> {
        let dim = self.dimension();
        x.expect_dim(dim)?;
        y.expect_dim(dim)?;
        let comps = match dim {
            2 => self.mul2(x.padded(), y.padded()),
            3 => self.mul3(x.padded(), y.padded()),
            _ => self.mul4(x.padded(), y.padded()),
        };
        Ok(Vector::from_padded(comps, dim))
    }

    /// Left-to-right power fold `((z·z)·z)…` with `power` factors.
    ///
    /// This is not exponentiation in any associative sense: for
    /// non-associative algebras `z·(z·z)` generally differs.
    pub fn power(&self, z: &Vector, power: u32) -> Result<Vector, ShapeError> {
        (1..power).try_fold(*z, |acc, _| self.multiply(&acc, z))
    }

    fn mul2(&self, x: [f64; 4], y: [f64; 4]) -> [f64; 4] {
        let [a, b, _, _] = x;
        let [c, d, _, _] = y;
        let (r0, r1) = match self {
            Algebra::Complex => (a * c - b * d, b * c + a * d),
            Algebra::SplitComplex => (a * c + b * d, b * c + a * d),
            Algebra::Indeterminate => (a * c, b * c + a * d + b * d),
            Algebra::NegIndeterminate => (a * c, b * c + a * d - b * d),
            Algebra::Generalized { i_squared } => (
                a * c + b * d * i_squared.re,
                a * d + b * c + b * d * i_squared.im,
            ),
            _ => unreachable!("{} is not two-dimensional", self.key()),
        };
        [r0, r1, 0.0, 0.0]
    }

    fn mul3(&self, x: [f64; 4], y: [f64; 4]) -> [f64; 4] {
        let [a, b, c, _] = x;
        let [d, e, f, _] = y;
        let (r0, r1, r2) = match self {
            Algebra::SixthRoot => (
                a * d + b * f + c * e,
                b * d + a * e - c * f,
                c * d + a * f - b * e,
            ),
            Algebra::MutuallyComplex => (
                a * d - b * f - c * e,
                b * e + a * e + c * f,
                c * f + a * f + b * e,
            ),
            Algebra::MutuallySplit => (
                a * d + b * f + c * e,
                b * e + a * e + c * f,
                c * f + a * f + b * e,
            ),
            Algebra::DoublyComplex => (
                a * d - b * f - c * e,
                b * e + a * e - c * f,
                c * f + a * f - b * e,
            ),
            Algebra::AntiPartAssoc => (
                a * d + b * f - c * e,
                b * e + a * e + c * f,
                c * f + a * f + b * e,
            ),
            Algebra::AntiNonassociative => (
                a * d + b * f - c * e,
                b * e + a * e - c * f,
                c * f + a * f - b * e,
            ),
            Algebra::AntiPartAssocNeg => (
                a * d + b * f - c * e,
                b * e + a * e + c * f,
                c * f + a * f - b * e,
            ),
            Algebra::Shuffle => (b * e, c * f, a * d),
            Algebra::ShuffleNeg1 => (-b * e, c * f, a * d),
            Algebra::ShuffleNeg2 => (b * e, -c * f, -a * d),
            Algebra::ShuffleNonassoc => (
                c * e + c * f + b * f,
                b * d + b * e + a * e,
                a * d + c * d + a * f,
            ),
            Algebra::ShuffleNonassocNeg => (
                c * e - c * f + b * f,
                b * d - b * e + a * e,
                -a * d + c * d + a * f,
            ),
            _ => unreachable!("{} is not three-dimensional", self.key()),
        };
        [r0, r1, r2, 0.0]
    }

    fn mul4(&self, x: [f64; 4], y: [f64; 4]) -> [f64; 4] {
        let [a, b, c, d] = x;
        let [e, f, g, h] = y;
        match self {
            Algebra::Quaternion => [
                a * e - b * f - c * g - d * h,
                a * f + b * e + c * h - d * g,
                a * g + c * e + d * f - b * h,
                a * h + d * e + b * g - c * f,
            ],
            Algebra::Dihedral => [
                a * e - b * f + c * g + d * h,
                a * f + b * e + c * h - d * g,
                a * g + c * e - d * f + b * h,
                a * h + d * e - b * g + c * f,
            ],
            Algebra::Eighth => [
                a * e - b * f + c * h + d * g,
                a * f + b * e + c * g - d * h,
                a * g + c * e + d * f + b * h,
                a * h + d * e - b * g - c * f,
            ],
            Algebra::SquareRotation => [
                a * e + b * f + c * h + d * g,
                a * f + b * e + c * g + d * h,
                a * g + c * e + d * f + b * h,
                a * h + d * e + b * g + c * f,
            ],
            Algebra::TripleSplitComplex => [
                a * e + b * f + c * g + d * h,
                a * f + b * e + d * g + c * h,
                a * g + c * e + d * f + b * h,
                a * h + d * e + b * g + c * f,
            ],
            Algebra::TripleComplex => [
                a * e - b * f - c * g - d * h,
                a * f + b * e + d * g + c * h,
                a * g + c * e + d * f + b * h,
                a * h + d * e + b * g + c * f,
            ],
            Algebra::SplitComplexDoubleComplex => [
                a * e - b * f - c * g + d * h,
                a * f + b * e + d * g + c * h,
                a * g + c * e + d * f + b * h,
                a * h + d * e - b * g - c * f,
            ],
            Algebra::ComplexDoubleSplitComplex => [
                a * e - b * f + c * g + d * h,
                a * f + b * e - d * g - c * h,
                a * g + c * e + d * f + b * h,
                a * h + d * e + b * g + c * f,
            ],
            Algebra::SplitDihedral => [
                a * e + b * f - d * h - c * g,
                a * f + b * e + d * g + c * h,
                a * g + c * e - d * f - b * h,
                a * h + d * e - b * g - c * f,
            ],
            Algebra::AntiEighth => [
                a * e - b * f + c * h - d * g,
                a * f + b * e + c * g + d * h,
                a * g + c * e + d * f - b * h,
                a * h + d * e + b * g - c * f,
            ],
            Algebra::NegiDihedral => [
                a * e + b * f - c * g - d * h,
                a * f + b * e - d * g + c * h,
                a * g + c * e - d * f + b * h,
                a * h + d * e + b * g - c * f,
            ],
            Algebra::NegiQuaternion => [
                a * e + b * f + c * g + d * h,
                a * f + b * e + c * h - d * g,
                a * g + c * e + d * f - b * h,
                a * h + d * e + b * g - c * f,
            ],
            Algebra::PartComplex => [
                a * e - b * f + c * g + d * h,
                a * f + b * e + d * g + c * h,
                a * g + c * e + d * f + b * h,
                a * h + d * e + b * g + c * f,
            ],
            Algebra::PartComplex2 => [
                a * e + b * f - c * g - d * h,
                a * f + b * e + d * g + c * h,
                a * g + c * e + d * f + b * h,
                a * h + d * e + b * g + c * f,
            ],
            Algebra::PartComplexSame => [
                a * e - b * f + c * g + d * h,
                a * f + b * e - d * g - c * h,
                a * g + c * e + d * f + b * h,
                a * h + d * e + b * g + c * f,
            ],
            Algebra::PartComplexOpposite => [
                a * e - b * f + c * g + d * h,
                a * f + b * e + d * g + c * h,
                a * g + c * e - d * f - b * h,
                a * h + d * e - b * g - c * f,
            ],
            Algebra::PartComplexHalf => [
                a * e - b * f + c * g + d * h,
                a * f + b * e - d * g - c * h,
                a * g + c * e - d * f - b * h,
                a * h + d * e + b * g + c * f,
            ],
            Algebra::PartComplexSplitHalf => [
                a * e - b * f + c * g + d * h,
                a * f + b * e - d * g - c * h,
                a * g + c * e - d * f - b * h,
                a * h + d * e - b * g - c * f,
            ],
            Algebra::PartDoubleComplexHalf => [
                a * e - b * f - c * g + d * h,
                a * f + b * e - d * g - c * h,
                a * g + c * e - d * f - b * h,
                a * h + d * e - b * g - c * f,
            ],
            _ => unreachable!("{} is not four-dimensional", self.key()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(xs: &[f64]) -> Vector {
        Vector::new(xs).unwrap()
    }

    #[test]
    fn complex_matches_textbook_product() {
        // (1 + 2i)(3 - i) = 5 + 5i
        let z = Algebra::Complex.multiply(&v(&[1.0, 2.0]), &v(&[3.0, -1.0])).unwrap();
        assert_eq!(z, v(&[5.0, 5.0]));
    }

    #[test]
    fn split_complex_unit_squares_to_one() {
        let i = v(&[0.0, 1.0]);
        assert_eq!(Algebra::SplitComplex.multiply(&i, &i).unwrap(), v(&[1.0, 0.0]));
    }

    #[test]
    fn generalized_reduces_to_complex_and_split() {
        let x = v(&[0.3, -1.2]);
        let y = v(&[1.7, 0.4]);
        let complex = Algebra::Generalized { i_squared: C::new(-1.0, 0.0) };
        let split = Algebra::Generalized { i_squared: C::new(1.0, 0.0) };
        let z = complex.multiply(&x, &y).unwrap();
        let expected = Algebra::Complex.multiply(&x, &y).unwrap();
        for (a, b) in z.as_slice().iter().zip(expected.as_slice()) {
            assert!((a - b).abs() < 1e-12);
        }
        let z = split.multiply(&x, &y).unwrap();
        let expected = Algebra::SplitComplex.multiply(&x, &y).unwrap();
        for (a, b) in z.as_slice().iter().zip(expected.as_slice()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn quaternion_units_follow_hamilton() {
        let q = Algebra::Quaternion;
        let one = v(&[1.0, 0.0, 0.0, 0.0]);
        let i = v(&[0.0, 1.0, 0.0, 0.0]);
        let j = v(&[0.0, 0.0, 1.0, 0.0]);
        let k = v(&[0.0, 0.0, 0.0, 1.0]);
        assert_eq!(q.multiply(&i, &i).unwrap(), one.neg());
        assert_eq!(q.multiply(&j, &j).unwrap(), one.neg());
        assert_eq!(q.multiply(&k, &k).unwrap(), one.neg());
        assert_eq!(q.multiply(&i, &j).unwrap(), k);
        assert_eq!(q.multiply(&j, &i).unwrap(), k.neg());
        assert_eq!(q.multiply(&j, &k).unwrap(), i);
        assert_eq!(q.multiply(&k, &i).unwrap(), j);
    }

    #[test]
    fn sixth_root_units() {
        // i^2 = -j, j^2 = -i, ij = 1
        let s = Algebra::SixthRoot;
        let i = v(&[0.0, 1.0, 0.0]);
        let j = v(&[0.0, 0.0, 1.0]);
        assert_eq!(s.multiply(&i, &i).unwrap(), v(&[0.0, 0.0, -1.0]));
        assert_eq!(s.multiply(&j, &j).unwrap(), v(&[0.0, -1.0, 0.0]));
        assert_eq!(s.multiply(&i, &j).unwrap(), v(&[1.0, 0.0, 0.0]));
    }

    #[test]
    fn shuffle_rotates_pointwise_products() {
        let z = Algebra::Shuffle
            .multiply(&v(&[1.0, 2.0, 3.0]), &v(&[4.0, 5.0, 6.0]))
            .unwrap();
        assert_eq!(z, v(&[10.0, 18.0, 4.0]));
        let z = Algebra::ShuffleNeg2
            .multiply(&v(&[1.0, 2.0, 3.0]), &v(&[4.0, 5.0, 6.0]))
            .unwrap();
        assert_eq!(z, v(&[10.0, -18.0, -4.0]));
    }

    #[test]
    fn wrong_dimension_is_a_shape_error() {
        let err = Algebra::SixthRoot
            .multiply(&v(&[1.0, 0.0, 0.0, 0.0]), &v(&[1.0, 0.0, 0.0, 0.0]))
            .unwrap_err();
        assert_eq!(err, ShapeError::DimensionMismatch { expected: 3, found: 4 });
    }

    #[test]
    fn power_folds_from_the_left() {
        let alg = Algebra::MutuallyComplex;
        let z = v(&[0.7, -1.1, 0.4]);
        let zz = alg.multiply(&z, &z).unwrap();
        let left = alg.multiply(&zz, &z).unwrap();
        let right = alg.multiply(&z, &zz).unwrap();
        assert_eq!(alg.power(&z, 3).unwrap(), left);
        assert_ne!(left, right);
        assert_eq!(alg.power(&z, 1).unwrap(), z);
    }

    #[test]
    fn every_entry_round_trips_through_its_key() {
        for alg in Algebra::ALL {
            assert_eq!(Algebra::from_key(alg.key()).unwrap(), *alg);
            let zero = Vector::zeros(alg.dimension()).unwrap();
            assert!(alg.multiply(&zero, &zero).is_ok());
        }
        assert_eq!(
            Algebra::from_key("generalized:0.5:-1").unwrap(),
            Algebra::Generalized { i_squared: C::new(0.5, -1.0) }
        );
        assert!(matches!(
            Algebra::from_key("octonion"),
            Err(ConfigurationError::UnknownAlgebra(_))
        ));
        assert!(Algebra::from_key("generalized:x").is_err());
    }
}
