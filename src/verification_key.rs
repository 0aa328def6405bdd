//! Verification key and the verifier's commitment set

use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::codec::{FieldCodec, FieldReader};
use crate::commitment::Commitment;
use crate::error::Result;
use crate::flavor::{
    zip_view, AllEntities, Column, PrecomputedEntities, WitnessCommitments,
    NUM_PRECOMPUTED_ENTITIES,
};
use crate::proving_key::{
    CircuitMetadata, DatabusPropagationData, ProvingKey, PAIRING_POINT_ACCUMULATOR_SIZE,
};
use crate::F;

impl FieldCodec for DatabusPropagationData {
    const NUM_FIELDS: usize = 5;

    fn write_fields(&self, out: &mut Vec<F>) {
        self.contains_app_return_data_commitment.write_fields(out);
        self.contains_kernel_return_data_commitment.write_fields(out);
        self.app_return_data_public_input_idx.write_fields(out);
        self.kernel_return_data_public_input_idx.write_fields(out);
        self.is_kernel.write_fields(out);
    }

    fn read_fields(fields: &[F]) -> Result<Self> {
        let mut reader = FieldReader::new(fields);
        let data = Self {
            contains_app_return_data_commitment: reader.read()?,
            contains_kernel_return_data_commitment: reader.read()?,
            app_return_data_public_input_idx: reader.read()?,
            kernel_return_data_public_input_idx: reader.read()?,
            is_kernel: reader.read()?,
        };
        reader.finish()?;
        Ok(data)
    }
}

/// Circuit metadata plus a commitment to every precomputed column.
///
/// A plain value: copies never alias the proving key it came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerificationKey {
    pub metadata: CircuitMetadata,
    pub commitments: PrecomputedEntities<Commitment>,
}

impl VerificationKey {
    /// Field elements in the canonical encoding
    pub const NUM_FIELDS: usize = <Self as FieldCodec>::NUM_FIELDS;

    pub fn new(circuit_size: usize, num_public_inputs: usize) -> Self {
        Self {
            metadata: CircuitMetadata::new(circuit_size, num_public_inputs),
            commitments: PrecomputedEntities::default(),
        }
    }

    /// Copy the size, public-input and data bus fields of `proving_key`
    pub fn set_metadata(&mut self, proving_key: &ProvingKey) {
        self.metadata = proving_key.metadata;
    }

    /// Metadata copy plus a commitment to each precomputed polynomial
    #[instrument(skip_all, fields(circuit_size = proving_key.circuit_size()))]
    pub fn from_proving_key(proving_key: &ProvingKey) -> Result<Self> {
        let mut key = Self::default();
        key.set_metadata(proving_key);
        key.commitments = proving_key.commit_precomputed()?;
        debug!("verification key committed");
        Ok(key)
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

    /// Canonical encoding consumed by recursive verifiers:
    /// circuit_size, num_public_inputs, pub_inputs_offset,
    /// contains_recursive_proof, recursive_proof_public_input_indices,
    /// the data bus propagation fields, then the 30 commitments.
    pub fn to_field_elements(&self) -> Vec<F> {
        let mut elements = Vec::with_capacity(Self::NUM_FIELDS);
        self.write_fields(&mut elements);
        elements
    }

    /// Inverse of `to_field_elements`; the buffer must hold exactly one key
    pub fn from_field_elements(elements: &[F]) -> Result<Self> {
        let mut reader = FieldReader::new(elements);
        let key = reader.read::<Self>()?;
        reader.finish()?;
        Ok(key)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl FieldCodec for VerificationKey {
    const NUM_FIELDS: usize = 4
        + <[u32; PAIRING_POINT_ACCUMULATOR_SIZE] as FieldCodec>::NUM_FIELDS
        + <DatabusPropagationData as FieldCodec>::NUM_FIELDS
        + NUM_PRECOMPUTED_ENTITIES * <Commitment as FieldCodec>::NUM_FIELDS;

    fn write_fields(&self, out: &mut Vec<F>) {
        let metadata = &self.metadata;
        metadata.circuit_size.write_fields(out);
        metadata.num_public_inputs.write_fields(out);
        metadata.pub_inputs_offset.write_fields(out);
        metadata.contains_recursive_proof.write_fields(out);
        metadata.recursive_proof_public_input_indices.write_fields(out);
        metadata.databus_propagation_data.write_fields(out);
        for commitment in self.commitments.get_all() {
            commitment.write_fields(out);
        }
    }

    fn read_fields(fields: &[F]) -> Result<Self> {
        let mut reader = FieldReader::new(fields);
        let circuit_size: usize = reader.read()?;
        let num_public_inputs: usize = reader.read()?;
        let mut metadata = CircuitMetadata::try_new(circuit_size, num_public_inputs)?;
        metadata.pub_inputs_offset = reader.read()?;
        metadata.contains_recursive_proof = reader.read()?;
        metadata.recursive_proof_public_input_indices = reader.read()?;
        metadata.databus_propagation_data = reader.read()?;
        let commitments = reader.read::<[Commitment; NUM_PRECOMPUTED_ENTITIES]>()?;
        reader.finish()?;
        Ok(Self {
            metadata,
            commitments: PrecomputedEntities::from_array(commitments),
        })
    }
}

/// Commitments the verifier holds, laid out like every other full container.
///
/// Precomputed slots come from the verification key, witness slots from the
/// proof. Shifted slots stay empty: the verifier works with shifted
/// evaluations, never shifted commitments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierCommitments(AllEntities<Option<Commitment>>);

impl VerifierCommitments {
    pub fn new(key: &VerificationKey, witness: Option<&WitnessCommitments>) -> Self {
        let mut commitments = AllEntities::<Option<Commitment>>::default();
        for (slot, commitment) in zip_view(
            commitments.get_precomputed_mut().iter_mut(),
            key.commitments.get_all(),
        ) {
            *slot = Some(*commitment);
        }
        if let Some(witness) = witness {
            for (slot, commitment) in zip_view(
                commitments.get_witness_mut().iter_mut(),
                witness.get_all(),
            ) {
                *slot = Some(*commitment);
            }
        }
        Self(commitments)
    }

    pub fn get(&self, column: Column) -> Option<Commitment> {
        self.0[column]
    }

    /// Commitments to the sources of the shifted columns, if all are present
    pub fn get_to_be_shifted(&self) -> Option<[Commitment; 9]> {
        let sources = self.0.get_to_be_shifted();
        let mut out = [Commitment::default(); 9];
        for (slot, source) in out.iter_mut().zip(sources) {
            *slot = (*source)?;
        }
        Some(out)
    }
}

impl Deref for VerifierCommitments {
    type Target = AllEntities<Option<Commitment>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for VerifierCommitments {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
