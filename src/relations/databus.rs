//! Log-derivative lookups into the three data bus columns.

use p3_field::Field;

use super::{LogDerivativeArgument, RelationParameters};
use crate::flavor::{AllValues, BusKind, WitnessColumn};

/// Inverses for one bus channel.
///
/// A `q_busread` gate reads `(w_l, w_r)` as `(value, index)` from the bus
/// picked by its `q_l` / `q_r` / `q_o` selector; a bus row is written when
/// its read tag is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DatabusLookupArgument {
    pub bus: BusKind,
}

impl DatabusLookupArgument {
    pub const fn new(bus: BusKind) -> Self {
        Self { bus }
    }

    /// One argument per bus, in column order
    pub fn all() -> [Self; 3] {
        BusKind::ALL.map(Self::new)
    }

    fn is_read_gate<F: Field>(&self, row: &AllValues<F>) -> F {
        row.precomputed.q_busread * row.precomputed[self.bus.selector()]
    }
}

impl LogDerivativeArgument for DatabusLookupArgument {
    fn inverse_column(&self) -> WitnessColumn {
        self.bus.columns().inverses
    }

    fn inverse_exists_at_row<F: Field>(&self, row: &AllValues<F>) -> bool {
        let is_read_gate = self.is_read_gate(row);
        let read_tag = row.witness[self.bus.columns().read_tags];
        is_read_gate + read_tag - is_read_gate * read_tag != F::ZERO
    }

    fn read_term<F: Field>(&self, row: &AllValues<F>, params: &RelationParameters<F>) -> F {
        row.witness.w_l + params.gamma + row.witness.w_r * params.beta
    }

    fn write_term<F: Field>(&self, row: &AllValues<F>, params: &RelationParameters<F>) -> F {
        row.witness[self.bus.columns().value]
            + params.gamma
            + row.precomputed.databus_id * params.beta
    }
}
