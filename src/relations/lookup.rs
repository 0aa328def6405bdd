//! Log-derivative lookup into the four precomputed table columns.

use p3_field::Field;

use super::{LogDerivativeArgument, RelationParameters};
use crate::flavor::{AllValues, WitnessColumn};

/// Inverses for the lookup argument, written to `lookup_inverses`.
///
/// A row reads from the table when `q_lookup` is set and writes (contributes
/// a table entry) when its `lookup_read_tags` entry is set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LookupArgument;

impl LogDerivativeArgument for LookupArgument {
    fn inverse_column(&self) -> WitnessColumn {
        WitnessColumn::LookupInverses
    }

    fn inverse_exists_at_row<F: Field>(&self, row: &AllValues<F>) -> bool {
        let is_read_gate = row.precomputed.q_lookup;
        let read_tag = row.witness.lookup_read_tags;
        is_read_gate + read_tag - is_read_gate * read_tag != F::ZERO
    }

    /// Wire values compressed into one entry; a wire's step term multiplies
    /// the next row of the same wire.
    fn read_term<F: Field>(&self, row: &AllValues<F>, params: &RelationParameters<F>) -> F {
        let pre = &row.precomputed;
        let wit = &row.witness;
        let shifted = &row.shifted;

        let derived_entry_1 = wit.w_l + params.gamma + pre.q_r * shifted.w_l_shift;
        let derived_entry_2 = wit.w_r + pre.q_m * shifted.w_r_shift;
        let derived_entry_3 = wit.w_o + pre.q_c * shifted.w_o_shift;

        derived_entry_1
            + derived_entry_2 * params.eta
            + derived_entry_3 * params.eta_two
            + pre.q_o * params.eta_three
    }

    fn write_term<F: Field>(&self, row: &AllValues<F>, params: &RelationParameters<F>) -> F {
        let pre = &row.precomputed;
        pre.table_1
            + params.gamma
            + pre.table_2 * params.eta
            + pre.table_3 * params.eta_two
            + pre.table_4 * params.eta_three
    }
}
