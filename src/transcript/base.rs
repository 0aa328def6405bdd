//! Fiat-Shamir transcript over a flat field-element proof buffer

use p3_challenger::{CanObserve, CanSample, HashChallenger, SerializingChallenger32};
use p3_keccak::Keccak256Hash;
use tracing::trace;

use super::HonkProof;
use crate::codec::{deserialize_from_buffer, FieldCodec};
use crate::error::Result;
use crate::F;

/// Keccak-256 challenger absorbing canonical u32 encodings of field elements
pub type Challenger = SerializingChallenger32<F, HashChallenger<u8, Keccak256Hash, 32>>;

/// Value sent by `prover_init_empty` so that an empty transcript still has content
pub const INIT_VALUE: u32 = 42;

/// One entry of the transcript manifest
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    pub round: usize,
    pub label: String,
    /// Elements sent, or 1 per challenge
    pub num_fields: usize,
    pub is_challenge: bool,
}

/// Shared prover/verifier transcript.
///
/// The prover appends to `proof_data`; the verifier reads it back through a
/// cursor. Every element passing either way is observed by the challenger,
/// so both sides derive identical challenges from identical data.
#[derive(Clone, Debug)]
pub struct Transcript {
    pub proof_data: Vec<F>,
    num_frs_read: usize,
    challenger: Challenger,
    manifest: Vec<ManifestEntry>,
    round: usize,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Transcript {
    pub fn new(proof_data: Vec<F>) -> Self {
        Self {
            proof_data,
            num_frs_read: 0,
            challenger: Challenger::from_hasher(vec![], Keccak256Hash {}),
            manifest: Vec::new(),
            round: 0,
        }
    }

    pub fn from_proof(proof: HonkProof) -> Self {
        Self::new(proof.into_inner())
    }

    /// Prover transcript carrying only the init value
    pub fn prover_init_empty() -> Self {
        let mut transcript = Self::default();
        transcript.send_to_verifier("Init", &INIT_VALUE);
        transcript
    }

    /// Verifier counterpart of `prover_init_empty`, reading the prover's proof data
    pub fn verifier_init_empty(prover: &Transcript) -> Result<Self> {
        let mut transcript = Self::new(prover.proof_data.clone());
        let _: u32 = transcript.receive_from_prover("Init")?;
        Ok(transcript)
    }

    fn record(&mut self, label: &str, num_fields: usize, is_challenge: bool) {
        self.manifest.push(ManifestEntry {
            round: self.round,
            label: label.to_string(),
            num_fields,
            is_challenge,
        });
    }

    /// Append `value` to the proof and absorb it
    pub fn send_to_verifier<T: FieldCodec>(&mut self, label: &str, value: &T) {
        let start = self.proof_data.len();
        value.write_fields(&mut self.proof_data);
        for element in &self.proof_data[start..] {
            self.challenger.observe(*element);
        }
        trace!(label, num_fields = T::NUM_FIELDS, "sent to verifier");
        self.record(label, T::NUM_FIELDS, false);
    }

    /// Read the next `T` from the proof and absorb it
    pub fn receive_from_prover<T: FieldCodec>(&mut self, label: &str) -> Result<T> {
        let start = self.num_frs_read;
        let value = deserialize_from_buffer(&self.proof_data, &mut self.num_frs_read)?;
        for element in &self.proof_data[start..self.num_frs_read] {
            self.challenger.observe(*element);
        }
        trace!(label, num_fields = T::NUM_FIELDS, "received from prover");
        self.record(label, T::NUM_FIELDS, false);
        Ok(value)
    }

    /// Squeeze one challenge; starts a new round
    pub fn get_challenge(&mut self, label: &str) -> F {
        self.round += 1;
        self.record(label, 1, true);
        CanSample::<F>::sample(&mut self.challenger)
    }

    /// Squeeze one challenge per label, all in the same new round
    pub fn get_challenges(&mut self, labels: &[&str]) -> Vec<F> {
        self.round += 1;
        labels
            .iter()
            .map(|label| {
                self.record(label, 1, true);
                CanSample::<F>::sample(&mut self.challenger)
            })
            .collect()
    }

    pub fn num_frs_read(&self) -> usize {
        self.num_frs_read
    }

    pub fn proof_size(&self) -> usize {
        self.proof_data.len()
    }

    pub fn manifest(&self) -> &[ManifestEntry] {
        &self.manifest
    }

    /// Proof data sent so far
    pub fn export_proof(&self) -> HonkProof {
        HonkProof::new(self.proof_data.clone())
    }
}
