//! Dense polynomials in evaluation form with a virtual zero prefix/suffix.

use p3_field::Field;
use serde::{Deserialize, Serialize};

/// Evaluations of a polynomial over the trace rows.
///
/// Only `coefficients` is stored; it occupies rows
/// `start_index..start_index + coefficients.len()`. Every other row below
/// `virtual_size` reads as zero. A polynomial with `start_index >= 1` has an
/// implicit zero at row 0 and can therefore be shifted by one row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polynomial<F> {
    coefficients: Vec<F>,
    start_index: usize,
    virtual_size: usize,
}

impl<F: Field> Polynomial<F> {
    /// Fully stored polynomial of `size` zeros
    pub fn new(size: usize) -> Self {
        Self::with_offset(size, size, 0)
    }

    /// Polynomial that stores `size - 1` rows starting at row 1
    pub fn shiftable(size: usize) -> Self {
        assert!(size > 0, "shiftable polynomial needs at least one row");
        Self::with_offset(size - 1, size, 1)
    }

    /// Polynomial storing `memory_size` zeros from `start_index`, reporting `virtual_size` rows
    pub fn with_offset(memory_size: usize, virtual_size: usize, start_index: usize) -> Self {
        assert!(
            start_index + memory_size <= virtual_size,
            "stored window {}..{} exceeds virtual size {}",
            start_index,
            start_index + memory_size,
            virtual_size
        );
        Self {
            coefficients: vec![F::ZERO; memory_size],
            start_index,
            virtual_size,
        }
    }

    pub fn from_coefficients(coefficients: Vec<F>) -> Self {
        let virtual_size = coefficients.len();
        Self {
            coefficients,
            start_index: 0,
            virtual_size,
        }
    }

    /// Logical number of rows
    pub fn size(&self) -> usize {
        self.virtual_size
    }

    pub fn is_empty(&self) -> bool {
        self.virtual_size == 0
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// One past the last stored row
    pub fn end_index(&self) -> usize {
        self.start_index + self.coefficients.len()
    }

    /// Row 0 is implicitly zero, so a one-row shift is well defined
    pub fn is_shiftable(&self) -> bool {
        self.virtual_size > 0 && self.start_index >= 1
    }

    /// Value at row `index`; zero outside the stored window
    pub fn get(&self, index: usize) -> F {
        assert!(
            index < self.virtual_size,
            "row {index} out of range for polynomial of size {}",
            self.virtual_size
        );
        if index >= self.start_index && index < self.end_index() {
            self.coefficients[index - self.start_index]
        } else {
            F::ZERO
        }
    }

    /// Mutable access to a stored row
    pub fn at_mut(&mut self, index: usize) -> &mut F {
        assert!(
            index >= self.start_index && index < self.end_index(),
            "row {index} outside stored window {}..{}",
            self.start_index,
            self.end_index()
        );
        &mut self.coefficients[index - self.start_index]
    }

    pub fn set(&mut self, index: usize, value: F) {
        *self.at_mut(index) = value;
    }

    /// Stored coefficients only
    pub fn coefficients(&self) -> &[F] {
        &self.coefficients
    }

    /// All `size()` values, virtual zeros included
    pub fn iter(&self) -> impl Iterator<Item = F> + '_ {
        (0..self.virtual_size).map(move |i| self.get(i))
    }

    pub fn to_dense(&self) -> Vec<F> {
        self.iter().collect()
    }

    /// Copy `values` into consecutive rows starting at `start`
    pub fn copy_from(&mut self, start: usize, values: &[F]) {
        for (offset, value) in values.iter().enumerate() {
            let row = start + offset;
            if row < self.start_index {
                assert!(
                    *value == F::ZERO,
                    "non-zero value written to implicit zero row {row}"
                );
                continue;
            }
            self.set(row, *value);
        }
    }
}

/// Read-only view of `source` offset by `offset` rows.
///
/// `get(i) == source.get(i + offset)` while `i + offset` is inside the source,
/// zero afterwards, so the view reports the same size as its source.
#[derive(Clone, Copy, Debug)]
pub struct ShiftedPolynomial<'a, F> {
    source: &'a Polynomial<F>,
    offset: usize,
}

impl<'a, F: Field> ShiftedPolynomial<'a, F> {
    pub fn new(source: &'a Polynomial<F>, offset: usize) -> Self {
        assert!(
            source.start_index() >= offset,
            "source starting at row {} cannot be shifted by {offset}",
            source.start_index()
        );
        Self { source, offset }
    }

    pub fn size(&self) -> usize {
        self.source.size()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn get(&self, index: usize) -> F {
        let shifted = index + self.offset;
        if shifted < self.source.size() {
            self.source.get(shifted)
        } else {
            assert!(index < self.size(), "row {index} out of range for shifted view");
            F::ZERO
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = F> + '_ {
        (0..self.size()).map(move |i| self.get(i))
    }
}

#[cfg(test)]
mod tests {
    use p3_field::FieldAlgebra;

    use super::*;
    use crate::F;

    #[test]
    fn shiftable_reads_zero_at_row_zero() {
        let mut poly = Polynomial::<F>::shiftable(8);
        assert_eq!(poly.size(), 8);
        assert_eq!(poly.coefficients().len(), 7);
        assert!(poly.is_shiftable());

        poly.set(1, F::from_canonical_u32(5));
        poly.set(7, F::from_canonical_u32(9));
        assert_eq!(poly.get(0), F::ZERO);
        assert_eq!(poly.get(1), F::from_canonical_u32(5));
        assert_eq!(poly.get(7), F::from_canonical_u32(9));
    }

    #[test]
    #[should_panic(expected = "outside stored window")]
    fn writing_the_implicit_zero_row_is_fatal() {
        let mut poly = Polynomial::<F>::shiftable(4);
        poly.set(0, F::ONE);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn reading_past_virtual_size_is_fatal() {
        let poly = Polynomial::<F>::new(4);
        poly.get(4);
    }

    #[test]
    fn shifted_view_follows_source() {
        let mut poly = Polynomial::<F>::shiftable(4);
        for row in 1..4 {
            poly.set(row, F::from_canonical_usize(row * 10));
        }
        let view = ShiftedPolynomial::new(&poly, 1);
        let values: Vec<F> = view.iter().collect();
        assert_eq!(
            values,
            vec![
                F::from_canonical_u32(10),
                F::from_canonical_u32(20),
                F::from_canonical_u32(30),
                F::ZERO
            ]
        );
    }

    #[test]
    fn dense_representation_ignores_storage_layout() {
        let mut a = Polynomial::<F>::shiftable(4);
        a.set(2, F::TWO);
        let mut b = Polynomial::<F>::new(4);
        b.set(2, F::TWO);
        assert_eq!(a.to_dense(), b.to_dense());
    }
}
