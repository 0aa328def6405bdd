//! Proving key: circuit metadata plus every prover polynomial
//!
//! Key finalisation runs in three steps, each gated by the token the
//! previous one returns:
//! 1. `add_ram_rom_memory_records_to_wire_4` -> `MemoryRecordsFolded`
//! 2. `compute_logderivative_inverses` -> `InversesComputed`
//! 3. `compute_grand_product_polynomials`

use std::sync::Arc;

use p3_field::FieldAlgebra;
use p3_util::log2_strict_usize;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::circuit::CircuitTrace;
use crate::commitment::{Commitment, CommitmentKey};
use crate::error::{FlavorError, Result};
use crate::flavor::{
    PrecomputedColumn, PrecomputedEntities, ProverPolynomials, WitnessColumn, WitnessCommitments,
    WitnessEntities,
};
use crate::library::{
    compute_grand_product, compute_logderivative_inverse, compute_public_input_delta,
};
use crate::polynomial::Polynomial;
use crate::relations::{
    DatabusLookupArgument, LookupArgument, PermutationArgument, RelationParameters,
};
use crate::F;

/// Public inputs holding an aggregated pairing point of a recursively verified proof
pub const PAIRING_POINT_ACCUMULATOR_SIZE: usize = 16;

/// Where return-data commitments sit among the public inputs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatabusPropagationData {
    pub contains_app_return_data_commitment: bool,
    pub contains_kernel_return_data_commitment: bool,
    /// Index of the first public input of the app return data commitment
    pub app_return_data_public_input_idx: u32,
    /// Index of the first public input of the kernel return data commitment
    pub kernel_return_data_public_input_idx: u32,
    pub is_kernel: bool,
}

/// Circuit shape shared by the proving and verification keys
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CircuitMetadata {
    pub circuit_size: usize,
    pub log_circuit_size: usize,
    pub num_public_inputs: usize,
    pub pub_inputs_offset: usize,
    pub contains_recursive_proof: bool,
    pub recursive_proof_public_input_indices: [u32; PAIRING_POINT_ACCUMULATOR_SIZE],
    pub databus_propagation_data: DatabusPropagationData,
}

impl CircuitMetadata {
    pub fn new(circuit_size: usize, num_public_inputs: usize) -> Self {
        Self {
            circuit_size,
            log_circuit_size: log2_strict_usize(circuit_size),
            num_public_inputs,
            ..Default::default()
        }
    }

    /// Fallible counterpart of `new` for sizes read from external buffers
    pub fn try_new(circuit_size: usize, num_public_inputs: usize) -> Result<Self> {
        if circuit_size == 0 || !circuit_size.is_power_of_two() {
            return Err(FlavorError::InvalidCircuitSize(circuit_size));
        }
        Ok(Self::new(circuit_size, num_public_inputs))
    }
}

/// Memory records are folded into w_4
#[must_use]
#[derive(Debug)]
pub struct MemoryRecordsFolded(());

/// Lookup and data bus inverses are computed
#[must_use]
#[derive(Debug)]
pub struct InversesComputed(());

#[derive(Clone, Debug)]
pub struct ProvingKey {
    pub metadata: CircuitMetadata,
    pub public_inputs: Vec<F>,
    /// Rows of RAM/ROM reads; drained by memory-record folding
    pub memory_read_records: Vec<u32>,
    /// Rows of RAM/ROM writes; drained by memory-record folding
    pub memory_write_records: Vec<u32>,
    pub polynomials: ProverPolynomials<F>,
    pub commitment_key: Option<Arc<CommitmentKey>>,
}

impl ProvingKey {
    /// Zero polynomials for a trace of `circuit_size` rows
    #[instrument(skip(commitment_key))]
    pub fn new(
        circuit_size: usize,
        num_public_inputs: usize,
        commitment_key: Option<Arc<CommitmentKey>>,
    ) -> Self {
        Self {
            metadata: CircuitMetadata::new(circuit_size, num_public_inputs),
            public_inputs: Vec::with_capacity(num_public_inputs),
            memory_read_records: Vec::new(),
            memory_write_records: Vec::new(),
            polynomials: ProverPolynomials::new(circuit_size),
            commitment_key,
        }
    }

    /// Size the key from the trace, copy its columns and derive the indicator columns
    #[instrument(skip_all, fields(rows = trace.num_rows()))]
    pub fn from_trace(trace: &CircuitTrace, commitment_key: Option<Arc<CommitmentKey>>) -> Self {
        let circuit_size = trace.dyadic_size();
        let derived = [
            PrecomputedColumn::LagrangeFirst,
            PrecomputedColumn::LagrangeLast,
            PrecomputedColumn::DatabusId,
        ];
        for column in derived {
            assert!(
                trace.precomputed[column].is_empty(),
                "{} is derived by the proving key",
                column.name()
            );
        }
        for column in [WitnessColumn::ZPerm, WitnessColumn::LookupInverses] {
            assert!(
                trace.witness[column].is_empty(),
                "{} is derived by the proving key",
                column.name()
            );
        }
        for inverses in trace.witness.get_databus_inverses() {
            assert!(inverses.is_empty(), "data bus inverses are derived by the proving key");
        }
        assert!(
            trace.pub_inputs_offset + trace.num_public_inputs() <= circuit_size,
            "public inputs at {}..{} exceed circuit of size {circuit_size}",
            trace.pub_inputs_offset,
            trace.pub_inputs_offset + trace.num_public_inputs()
        );

        let mut key = Self::new(circuit_size, trace.num_public_inputs(), commitment_key);
        key.metadata.pub_inputs_offset = trace.pub_inputs_offset;
        key.metadata.contains_recursive_proof = trace.contains_recursive_proof;
        key.metadata.recursive_proof_public_input_indices =
            trace.recursive_proof_public_input_indices;
        key.metadata.databus_propagation_data = trace.databus_propagation_data;
        key.public_inputs = trace.public_inputs.clone();
        key.memory_read_records = trace.memory_read_records.clone();
        key.memory_write_records = trace.memory_write_records.clone();

        let precomputed = key.polynomials.precomputed_mut();
        for column in PrecomputedColumn::ALL {
            precomputed[column].copy_from(0, &trace.precomputed[column]);
        }
        precomputed.lagrange_first.set(0, F::ONE);
        precomputed.lagrange_last.set(circuit_size - 1, F::ONE);
        for row in 0..circuit_size {
            precomputed
                .databus_id
                .set(row, F::from_canonical_usize(row));
        }
        let witness = key.polynomials.witness_mut();
        for column in WitnessColumn::ALL {
            witness[column].copy_from(0, &trace.witness[column]);
        }
        key.polynomials.set_shifted();

        debug!(circuit_size, "proving key populated from trace");
        key
    }

    pub fn circuit_size(&self) -> usize {
        self.metadata.circuit_size
    }

    pub fn log_circuit_size(&self) -> usize {
        self.metadata.log_circuit_size
    }

    pub fn num_public_inputs(&self) -> usize {
        self.metadata.num_public_inputs
    }

    pub fn get_precomputed(&self) -> &PrecomputedEntities<Polynomial<F>> {
        self.polynomials.precomputed()
    }

    pub fn get_witness(&self) -> &WitnessEntities<Polynomial<F>> {
        self.polynomials.witness()
    }

    fn commitment_key(&self) -> Result<&CommitmentKey> {
        self.commitment_key
            .as_deref()
            .ok_or(FlavorError::MissingCommitmentKey)
    }

    /// Commitments to the 30 precomputed polynomials, in column order
    #[instrument(skip_all, fields(circuit_size = self.circuit_size()))]
    pub fn commit_precomputed(&self) -> Result<PrecomputedEntities<Commitment>> {
        Ok(self.commitment_key()?.commit_precomputed(self.get_precomputed()))
    }

    /// Commitments to the 24 witness polynomials, in column order
    #[instrument(skip_all, fields(circuit_size = self.circuit_size()))]
    pub fn commit_witness(&self) -> Result<WitnessCommitments> {
        let key = self.commitment_key()?;
        Ok(self.get_witness().map_ref(|polynomial| key.commit(polynomial)))
    }

    /// Fold each RAM/ROM record into w_4:
    /// `w_4[r] += w_3[r] * eta_three + w_2[r] * eta_two + w_1[r] * eta`,
    /// plus one on write rows.
    ///
    /// Must run after w_1..w_3 are committed, since the etas derive from
    /// those commitments. The record lists are drained, so a repeat is a no-op.
    #[instrument(skip_all, fields(
        reads = self.memory_read_records.len(),
        writes = self.memory_write_records.len()
    ))]
    pub fn add_ram_rom_memory_records_to_wire_4(
        &mut self,
        eta: F,
        eta_two: F,
        eta_three: F,
    ) -> MemoryRecordsFolded {
        let circuit_size = self.circuit_size();
        let reads = std::mem::take(&mut self.memory_read_records);
        let writes = std::mem::take(&mut self.memory_write_records);
        let records = reads
            .into_iter()
            .map(|row| (row, F::ZERO))
            .chain(writes.into_iter().map(|row| (row, F::ONE)));

        let wires = self.polynomials.witness_mut();
        for (row, flag) in records {
            let row = row as usize;
            assert!(
                row < circuit_size,
                "memory record row {row} out of range for circuit of size {circuit_size}"
            );
            let record = wires.w_o.get(row) * eta_three
                + wires.w_r.get(row) * eta_two
                + wires.w_l.get(row) * eta
                + flag;
            *wires.w_4.at_mut(row) += record;
        }
        self.polynomials.set_shifted();
        MemoryRecordsFolded(())
    }

    /// Inverses for the lookup argument and each of the three data bus channels
    #[instrument(skip_all, fields(circuit_size = self.circuit_size()))]
    pub fn compute_logderivative_inverses(
        &mut self,
        relation_parameters: &RelationParameters<F>,
        _folded: MemoryRecordsFolded,
    ) -> InversesComputed {
        compute_logderivative_inverse(&mut self.polynomials, relation_parameters, &LookupArgument);
        for bus in DatabusLookupArgument::all() {
            compute_logderivative_inverse(&mut self.polynomials, relation_parameters, &bus);
        }
        InversesComputed(())
    }

    /// Write `public_input_delta` into the parameters, then fill z_perm
    #[instrument(skip_all, fields(circuit_size = self.circuit_size()))]
    pub fn compute_grand_product_polynomials(
        &mut self,
        relation_parameters: &mut RelationParameters<F>,
        _inverses: InversesComputed,
    ) {
        relation_parameters.public_input_delta = compute_public_input_delta(
            &self.public_inputs,
            relation_parameters.beta,
            relation_parameters.gamma,
            self.circuit_size(),
            self.metadata.pub_inputs_offset,
        );
        compute_grand_product(
            &mut self.polynomials,
            relation_parameters,
            &PermutationArgument,
        );
    }
}
