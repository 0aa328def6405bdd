//! Prover polynomials: every unshifted column stored once, shifts as views.

use p3_field::Field;
use p3_matrix::dense::RowMajorMatrix;

use super::columns::{
    PrecomputedColumn, PrecomputedEntities, ShiftedColumn, ShiftedEntities, WitnessColumn,
    WitnessEntities,
};
use super::entities::{AllEntities, Column};
use super::{AllValues, ProverUnivariates, HAS_ZERO_ROW, NUM_ALL_ENTITIES};
use crate::polynomial::{Polynomial, ShiftedPolynomial};
use crate::univariate::Univariate;

/// Where a shifted column reads from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShiftedView {
    pub source: Column,
    pub offset: usize,
}

/// All prover polynomials of one circuit.
///
/// Shifted columns own no storage: each one is a `ShiftedView` onto its
/// source. Any mutable access to the stored polynomials marks the views
/// stale until `set_shifted` is called again, and reading a stale view
/// panics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProverPolynomials<F> {
    precomputed: PrecomputedEntities<Polynomial<F>>,
    witness: WitnessEntities<Polynomial<F>>,
    shifted: ShiftedEntities<ShiftedView>,
    circuit_size: usize,
    shifts_stale: bool,
}

impl<F: Field> ProverPolynomials<F> {
    /// Zero polynomials of `circuit_size` rows; with a zero row, shift
    /// sources start storing at row 1
    pub fn new(circuit_size: usize) -> Self {
        let allocate = |column: Column| {
            if HAS_ZERO_ROW && column.shifted().is_some() {
                Polynomial::shiftable(circuit_size)
            } else {
                Polynomial::new(circuit_size)
            }
        };
        let mut polynomials = Self {
            precomputed: PrecomputedEntities::from_fn(|c| allocate(c.into())),
            witness: WitnessEntities::from_fn(|c| allocate(c.into())),
            shifted: ShiftedEntities::from_fn(|c| ShiftedView {
                source: c.source(),
                offset: 1,
            }),
            circuit_size,
            shifts_stale: true,
        };
        polynomials.set_shifted();
        polynomials
    }

    pub fn circuit_size(&self) -> usize {
        self.circuit_size
    }

    pub fn precomputed(&self) -> &PrecomputedEntities<Polynomial<F>> {
        &self.precomputed
    }

    pub fn witness(&self) -> &WitnessEntities<Polynomial<F>> {
        &self.witness
    }

    pub fn shift_views(&self) -> &ShiftedEntities<ShiftedView> {
        &self.shifted
    }

    /// Mutable precomputed columns; invalidates the shift views
    pub fn precomputed_mut(&mut self) -> &mut PrecomputedEntities<Polynomial<F>> {
        self.shifts_stale = true;
        &mut self.precomputed
    }

    /// Mutable witness columns; invalidates the shift views
    pub fn witness_mut(&mut self) -> &mut WitnessEntities<Polynomial<F>> {
        self.shifts_stale = true;
        &mut self.witness
    }

    pub fn shifts_are_fresh(&self) -> bool {
        !self.shifts_stale
    }

    /// Stored polynomial behind an unshifted column
    pub fn polynomial(&self, column: Column) -> &Polynomial<F> {
        match column {
            Column::Precomputed(c) => &self.precomputed[c],
            Column::Witness(c) => &self.witness[c],
            Column::Shifted(c) => panic!("{} has no storage of its own", c.name()),
        }
    }

    pub fn polynomial_mut(&mut self, column: Column) -> &mut Polynomial<F> {
        match column {
            Column::Precomputed(c) => &mut self.precomputed_mut()[c],
            Column::Witness(c) => &mut self.witness_mut()[c],
            Column::Shifted(c) => panic!("{} has no storage of its own", c.name()),
        }
    }

    /// Replace a stored polynomial, keeping the circuit size
    pub fn replace(&mut self, column: Column, polynomial: Polynomial<F>) {
        assert_eq!(
            polynomial.size(),
            self.circuit_size,
            "{} must span {} rows",
            column.name(),
            self.circuit_size
        );
        *self.polynomial_mut(column) = polynomial;
    }

    /// Precomputed followed by witness polynomials
    pub fn get_unshifted(&self) -> impl Iterator<Item = &Polynomial<F>> {
        self.precomputed.get_all().chain(self.witness.get_all())
    }

    pub fn get_to_be_shifted(&self) -> impl Iterator<Item = &Polynomial<F>> {
        self.shifted.get_all().map(|view| self.polynomial(view.source))
    }

    /// Re-derive every shifted view from its source.
    ///
    /// Each source must still have the implicit zero at row 0 and span the
    /// full circuit.
    pub fn set_shifted(&mut self) {
        for view in self.shifted.get_all() {
            let source = match view.source {
                Column::Precomputed(c) => &self.precomputed[c],
                Column::Witness(c) => &self.witness[c],
                Column::Shifted(c) => panic!("{} cannot shift another shift", c.name()),
            };
            assert!(
                source.is_shiftable(),
                "{} is not shiftable: stored rows start at {}",
                view.source.name(),
                source.start_index()
            );
            assert_eq!(
                source.size(),
                self.circuit_size,
                "{} spans {} rows, circuit has {}",
                view.source.name(),
                source.size(),
                self.circuit_size
            );
        }
        self.shifts_stale = false;
    }

    /// View of a shifted column
    pub fn shifted(&self, column: ShiftedColumn) -> ShiftedPolynomial<'_, F> {
        assert!(
            !self.shifts_stale,
            "shifted views are stale; call set_shifted after mutating polynomials"
        );
        let view = self.shifted[column];
        ShiftedPolynomial::new(self.polynomial(view.source), view.offset)
    }

    /// Value of any column at `row`; a shift reads zero at the last row
    pub fn value(&self, column: Column, row: usize) -> F {
        match column {
            Column::Shifted(c) => self.shifted(c).get(row),
            unshifted => self.polynomial(unshifted).get(row),
        }
    }

    /// All 63 column values at `row`
    pub fn get_row(&self, row: usize) -> AllValues<F> {
        assert!(
            row < self.circuit_size,
            "row {row} out of range for circuit of size {}",
            self.circuit_size
        );
        AllEntities::from_fn(|column| self.value(column, row))
    }

    /// Linear extension of the edge `(row, row + 1)` of every column
    pub fn extend_edges<const LENGTH: usize>(&self, row: usize) -> ProverUnivariates<F, LENGTH> {
        assert!(
            row + 1 < self.circuit_size,
            "edge at row {row} out of range for circuit of size {}",
            self.circuit_size
        );
        let (lo, hi) = (self.get_row(row), self.get_row(row + 1));
        AllEntities::from_fn(|column| Univariate::extend_linear(lo[column], hi[column]))
    }

    /// Row-major matrix of all 63 columns, one trace row per matrix row
    pub fn to_row_major(&self) -> RowMajorMatrix<F> {
        let mut values = Vec::with_capacity(self.circuit_size * NUM_ALL_ENTITIES);
        for row in 0..self.circuit_size {
            values.extend_from_slice(self.get_row(row).as_array());
        }
        RowMajorMatrix::new(values, NUM_ALL_ENTITIES)
    }

    pub fn lagrange_first(&self) -> &Polynomial<F> {
        &self.precomputed[PrecomputedColumn::LagrangeFirst]
    }

    pub fn lagrange_last(&self) -> &Polynomial<F> {
        &self.precomputed[PrecomputedColumn::LagrangeLast]
    }

    pub fn z_perm(&self) -> &Polynomial<F> {
        &self.witness[WitnessColumn::ZPerm]
    }
}

/// Prover polynomials after the first sumcheck round: every unshifted and
/// shifted column folded to half the rows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartiallyEvaluatedMultivariates<F> {
    polynomials: AllEntities<Polynomial<F>>,
}

impl<F: Field> PartiallyEvaluatedMultivariates<F> {
    /// Zero polynomials of `circuit_size / 2` rows
    pub fn new(circuit_size: usize) -> Self {
        Self {
            polynomials: AllEntities::from_fn(|_| Polynomial::new(circuit_size / 2)),
        }
    }

    /// Fix the lowest variable of every column to `challenge`:
    /// `out[i] = p[2i] + challenge * (p[2i + 1] - p[2i])`
    pub fn partially_evaluate(full: &ProverPolynomials<F>, challenge: F) -> Self {
        let half = full.circuit_size() / 2;
        let mut result = Self::new(full.circuit_size());
        for column in Column::all() {
            let target = &mut result.polynomials[column];
            for i in 0..half {
                let lo = full.value(column, 2 * i);
                let hi = full.value(column, 2 * i + 1);
                target.set(i, lo + challenge * (hi - lo));
            }
        }
        result
    }

    pub fn polynomials(&self) -> &AllEntities<Polynomial<F>> {
        &self.polynomials
    }

    pub fn size(&self) -> usize {
        self.polynomials.precomputed.q_m.size()
    }
}
