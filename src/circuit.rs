//! Raw circuit output handed from the builder to the proving key

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::flavor::{PrecomputedEntities, WitnessEntities};
use crate::proving_key::{DatabusPropagationData, PAIRING_POINT_ACCUMULATOR_SIZE};
use crate::F;

/// Column contents and bookkeeping produced by the circuit builder.
///
/// Columns are indexed by trace row. Row 0 is the zero row and must stay
/// empty in every column that is shifted. Columns the proving key derives
/// itself (lagrange_first, lagrange_last, databus_id and every inverse or
/// accumulator column) are left empty here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitTrace {
    /// Selectors, permutation wiring and tables
    pub precomputed: PrecomputedEntities<Vec<F>>,
    /// Wires, op-queue wires, bus values and lookup/bus bookkeeping
    pub witness: WitnessEntities<Vec<F>>,
    pub public_inputs: Vec<F>,
    /// Row of the first public input
    pub pub_inputs_offset: usize,
    /// Rows of RAM/ROM reads whose record lives in w_4
    pub memory_read_records: Vec<u32>,
    /// Rows of RAM/ROM writes whose record lives in w_4
    pub memory_write_records: Vec<u32>,
    pub contains_recursive_proof: bool,
    pub recursive_proof_public_input_indices: [u32; PAIRING_POINT_ACCUMULATOR_SIZE],
    pub databus_propagation_data: DatabusPropagationData,
}

impl CircuitTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Longest column, in rows
    pub fn num_rows(&self) -> usize {
        self.precomputed
            .get_all()
            .chain(self.witness.get_all())
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }

    /// Trace size of the proving key: rows padded to a power of two, at least 2
    pub fn dyadic_size(&self) -> usize {
        self.num_rows().max(2).next_power_of_two()
    }

    pub fn num_public_inputs(&self) -> usize {
        self.public_inputs.len()
    }

    /// Load a trace from a file
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let trace = Self::from_bytes(&data)?;
        debug!(path = %path.display(), rows = trace.num_rows(), "loaded circuit trace");
        Ok(trace)
    }

    /// Save the trace to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use p3_field::FieldAlgebra;

    use super::*;

    #[test]
    fn dyadic_size_pads_to_power_of_two() {
        let mut trace = CircuitTrace::new();
        assert_eq!(trace.dyadic_size(), 2);
        trace.witness.w_l = vec![F::ZERO; 5];
        assert_eq!(trace.num_rows(), 5);
        assert_eq!(trace.dyadic_size(), 8);
        trace.precomputed.q_arith = vec![F::ONE; 8];
        assert_eq!(trace.dyadic_size(), 8);
    }

    #[test]
    fn bytes_round_trip() {
        let mut trace = CircuitTrace::new();
        trace.witness.w_r = vec![F::ZERO, F::TWO, F::ONE];
        trace.public_inputs = vec![F::from_canonical_u32(99)];
        trace.pub_inputs_offset = 1;
        trace.memory_write_records = vec![2];
        trace.databus_propagation_data.is_kernel = true;

        let bytes = trace.to_bytes().unwrap();
        assert_eq!(CircuitTrace::from_bytes(&bytes).unwrap(), trace);
    }
}
