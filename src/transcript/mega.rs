//! Full proof layout of the flavor and its codec

use tracing::debug;

use super::{HonkProof, Transcript};
use crate::codec::{serialize_to_buffer, FieldCodec, FieldReader};
use crate::commitment::Commitment;
use crate::error::Result;
use crate::flavor::{
    AllValues, WitnessColumn, WitnessCommitments, BATCHED_RELATION_PARTIAL_LENGTH,
    NUM_ALL_ENTITIES, NUM_WITNESS_ENTITIES,
};
use crate::univariate::Univariate;
use crate::{CONST_PROOF_SIZE_LOG_N, F};

/// Round univariate sent in each sumcheck round
pub type SumcheckUnivariate = Univariate<F, BATCHED_RELATION_PARTIAL_LENGTH>;

/// Order in which the prover sends witness commitments.
///
/// Wires and bus columns first, each bus closed by its inverses; then the
/// lookup bookkeeping, w_4 once the memory challenges exist, the lookup
/// inverses and finally the grand product.
pub const WITNESS_COMMITMENT_ORDER: [WitnessColumn; NUM_WITNESS_ENTITIES] = [
    WitnessColumn::WL,
    WitnessColumn::WR,
    WitnessColumn::WO,
    WitnessColumn::EccOpWire1,
    WitnessColumn::EccOpWire2,
    WitnessColumn::EccOpWire3,
    WitnessColumn::EccOpWire4,
    WitnessColumn::Calldata,
    WitnessColumn::CalldataReadCounts,
    WitnessColumn::CalldataReadTags,
    WitnessColumn::CalldataInverses,
    WitnessColumn::SecondaryCalldata,
    WitnessColumn::SecondaryCalldataReadCounts,
    WitnessColumn::SecondaryCalldataReadTags,
    WitnessColumn::SecondaryCalldataInverses,
    WitnessColumn::ReturnData,
    WitnessColumn::ReturnDataReadCounts,
    WitnessColumn::ReturnDataReadTags,
    WitnessColumn::ReturnDataInverses,
    WitnessColumn::LookupReadCounts,
    WitnessColumn::LookupReadTags,
    WitnessColumn::W4,
    WitnessColumn::LookupInverses,
    WitnessColumn::ZPerm,
];

/// Every value a proof carries, in structured form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MegaTranscriptData {
    pub circuit_size: u32,
    pub public_input_size: u32,
    pub pub_inputs_offset: u32,
    pub public_inputs: Vec<F>,
    pub witness_commitments: WitnessCommitments,
    pub sumcheck_univariates: [SumcheckUnivariate; CONST_PROOF_SIZE_LOG_N],
    pub sumcheck_evaluations: AllValues<F>,
    pub gemini_fold_comms: [Commitment; CONST_PROOF_SIZE_LOG_N - 1],
    pub gemini_fold_evals: [F; CONST_PROOF_SIZE_LOG_N],
    pub shplonk_q_comm: Commitment,
    pub kzg_w_comm: Commitment,
}

impl MegaTranscriptData {
    /// Field elements in a proof with `num_public_inputs` public inputs
    pub fn proof_length(num_public_inputs: usize) -> usize {
        3 + num_public_inputs
            + NUM_WITNESS_ENTITIES * Commitment::NUM_FIELDS
            + CONST_PROOF_SIZE_LOG_N * SumcheckUnivariate::NUM_FIELDS
            + NUM_ALL_ENTITIES
            + (CONST_PROOF_SIZE_LOG_N - 1) * Commitment::NUM_FIELDS
            + CONST_PROOF_SIZE_LOG_N
            + 2 * Commitment::NUM_FIELDS
    }

    fn write(&self, out: &mut Vec<F>) {
        assert_eq!(
            self.public_inputs.len(),
            self.public_input_size as usize,
            "public_input_size disagrees with the public inputs"
        );
        serialize_to_buffer(&self.circuit_size, out);
        serialize_to_buffer(&self.public_input_size, out);
        serialize_to_buffer(&self.pub_inputs_offset, out);
        for input in &self.public_inputs {
            serialize_to_buffer(input, out);
        }
        for column in WITNESS_COMMITMENT_ORDER {
            serialize_to_buffer(&self.witness_commitments[column], out);
        }
        serialize_to_buffer(&self.sumcheck_univariates, out);
        for evaluation in self.sumcheck_evaluations.get_all() {
            serialize_to_buffer(evaluation, out);
        }
        serialize_to_buffer(&self.gemini_fold_comms, out);
        serialize_to_buffer(&self.gemini_fold_evals, out);
        serialize_to_buffer(&self.shplonk_q_comm, out);
        serialize_to_buffer(&self.kzg_w_comm, out);
    }

    fn read(buffer: &[F]) -> Result<Self> {
        let mut reader = FieldReader::new(buffer);
        let mut data = Self {
            circuit_size: reader.read()?,
            public_input_size: reader.read()?,
            pub_inputs_offset: reader.read()?,
            ..Default::default()
        };
        for _ in 0..data.public_input_size {
            data.public_inputs.push(reader.read()?);
        }
        for column in WITNESS_COMMITMENT_ORDER {
            data.witness_commitments[column] = reader.read()?;
        }
        data.sumcheck_univariates = reader.read()?;
        for evaluation in data.sumcheck_evaluations.get_all_mut() {
            *evaluation = reader.read()?;
        }
        data.gemini_fold_comms = reader.read()?;
        data.gemini_fold_evals = reader.read()?;
        data.shplonk_q_comm = reader.read()?;
        data.kzg_w_comm = reader.read()?;
        reader.finish()?;
        Ok(data)
    }
}

/// Transcript of one proof together with its structured values.
///
/// `deserialize_full_transcript` parses `base.proof_data` into `data`;
/// `serialize_full_transcript` writes `data` back, and the proof may not
/// change length in the process.
#[derive(Clone, Debug, Default)]
pub struct MegaTranscript {
    pub base: Transcript,
    pub data: MegaTranscriptData,
}

impl MegaTranscript {
    pub fn new(proof: HonkProof) -> Self {
        Self {
            base: Transcript::from_proof(proof),
            data: MegaTranscriptData::default(),
        }
    }

    /// Wrap a finished prover transcript
    pub fn from_transcript(base: Transcript) -> Self {
        Self {
            base,
            data: MegaTranscriptData::default(),
        }
    }

    /// Parse every proof value from `base.proof_data`, in send order
    pub fn deserialize_full_transcript(&mut self) -> Result<()> {
        self.data = MegaTranscriptData::read(&self.base.proof_data)?;
        debug!(
            proof_size = self.base.proof_data.len(),
            public_inputs = self.data.public_input_size,
            "deserialized full transcript"
        );
        Ok(())
    }

    /// Rewrite `base.proof_data` from `data`.
    ///
    /// Panics if the new proof differs in length from the one it replaces.
    pub fn serialize_full_transcript(&mut self) {
        let old_proof_length = self.base.proof_data.len();
        self.base.proof_data.clear();
        self.data.write(&mut self.base.proof_data);
        assert_eq!(
            self.base.proof_data.len(),
            old_proof_length,
            "re-serialized transcript changed length"
        );
        debug!(proof_size = old_proof_length, "serialized full transcript");
    }

    pub fn export_proof(&self) -> HonkProof {
        self.base.export_proof()
    }
}
