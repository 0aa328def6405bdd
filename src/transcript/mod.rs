//! Proof transcript: Fiat-Shamir base and the full proof layout

mod base;
mod mega;

pub use base::{Challenger, ManifestEntry, Transcript, INIT_VALUE};
pub use mega::{MegaTranscript, MegaTranscriptData, SumcheckUnivariate, WITNESS_COMMITMENT_ORDER};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::F;

/// A serialized proof: the flat sequence of field elements sent to the verifier
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HonkProof(Vec<F>);

impl HonkProof {
    pub fn new(elements: Vec<F>) -> Self {
        Self(elements)
    }

    pub fn into_inner(self) -> Vec<F> {
        self.0
    }

    pub fn as_slice(&self) -> &[F] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
