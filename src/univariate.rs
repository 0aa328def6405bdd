//! Bounded-degree univariates used by sumcheck rounds and folding.

use p3_field::Field;

/// Evaluations of a univariate at the points `0..LENGTH`.
///
/// `SKIP_COUNT` marks points `1..=SKIP_COUNT` as optimistically skipped: the
/// constructors leave them at zero and a consumer that opts into skipping must
/// not read them. With the default of 0 every point is computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Univariate<F, const LENGTH: usize, const SKIP_COUNT: usize = 0> {
    evaluations: [F; LENGTH],
}

impl<F: Field, const LENGTH: usize, const SKIP_COUNT: usize> Default
    for Univariate<F, LENGTH, SKIP_COUNT>
{
    fn default() -> Self {
        Self::zero()
    }
}

impl<F: Field, const LENGTH: usize, const SKIP_COUNT: usize> Univariate<F, LENGTH, SKIP_COUNT> {
    pub const LENGTH: usize = LENGTH;

    pub fn new(evaluations: [F; LENGTH]) -> Self {
        Self { evaluations }
    }

    pub fn zero() -> Self {
        Self {
            evaluations: [F::ZERO; LENGTH],
        }
    }

    pub fn evaluations(&self) -> &[F; LENGTH] {
        &self.evaluations
    }

    pub fn value_at(&self, point: usize) -> F {
        self.evaluations[point]
    }

    pub fn skip_count(&self) -> usize {
        SKIP_COUNT
    }

    /// True when `point` is left uncomputed by optimistic skipping
    pub fn is_skipped(point: usize) -> bool {
        point >= 1 && point <= SKIP_COUNT
    }

    /// Extend the edge `(v0, v1)` linearly to all `LENGTH` points
    pub fn extend_linear(v0: F, v1: F) -> Self {
        let delta = v1 - v0;
        let mut evaluations = [F::ZERO; LENGTH];
        let mut value = v0;
        for (point, slot) in evaluations.iter_mut().enumerate() {
            if !Self::is_skipped(point) {
                *slot = value;
            }
            value += delta;
        }
        Self { evaluations }
    }

    /// Sum of evaluations at 0 and 1, the sumcheck round target
    pub fn boolean_sum(&self) -> F {
        assert!(LENGTH >= 2, "univariate needs two points");
        self.evaluations[0] + self.evaluations[1]
    }
}

#[cfg(test)]
mod tests {
    use p3_field::FieldAlgebra;

    use super::*;
    use crate::F;

    #[test]
    fn linear_extension_hits_every_point() {
        let u = Univariate::<F, 5>::extend_linear(F::from_canonical_u32(3), F::from_canonical_u32(7));
        let expected: Vec<F> = [3u32, 7, 11, 15, 19]
            .into_iter()
            .map(F::from_canonical_u32)
            .collect();
        assert_eq!(u.evaluations().to_vec(), expected);
        assert_eq!(u.boolean_sum(), F::from_canonical_u32(10));
    }

    #[test]
    fn skipped_points_stay_zero() {
        let u = Univariate::<F, 5, 2>::extend_linear(F::ONE, F::TWO);
        assert_eq!(u.value_at(0), F::ONE);
        assert_eq!(u.value_at(1), F::ZERO);
        assert_eq!(u.value_at(2), F::ZERO);
        assert_eq!(u.value_at(3), F::from_canonical_u32(4));
        assert_eq!(u.value_at(4), F::from_canonical_u32(5));
        assert_eq!(u.skip_count(), 2);
    }
}
