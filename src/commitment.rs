//! Polynomial commitments used by the keys and the transcript.
//!
//! A commitment is a 32-byte Keccak-256 digest of the polynomial's dense
//! evaluations. It stands in for the curve points of a pairing-based scheme:
//! the keys and the transcript only need a fixed-size, comparable value with
//! a canonical field-element encoding.

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use p3_field::{FieldAlgebra, PrimeField32};
use p3_keccak::Keccak256Hash;
use p3_symmetric::CryptographicHasher;
use serde::{Deserialize, Serialize};

use crate::error::{FlavorError, Result};
use crate::flavor::PrecomputedEntities;
use crate::polynomial::Polynomial;
use crate::F;

/// Bytes per commitment
pub const COMMITMENT_BYTES: usize = 32;

/// Field elements per encoded commitment: one per 16-bit limb
pub const COMMITMENT_NUM_FIELDS: usize = COMMITMENT_BYTES / 2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Commitment(pub [u8; COMMITMENT_BYTES]);

impl Commitment {
    pub fn as_bytes(&self) -> &[u8; COMMITMENT_BYTES] {
        &self.0
    }

    /// Little-endian 16-bit limbs, one field element each
    pub fn to_field_limbs(&self) -> [F; COMMITMENT_NUM_FIELDS] {
        let mut limbs = [F::ZERO; COMMITMENT_NUM_FIELDS];
        for (limb, bytes) in limbs.iter_mut().zip(self.0.chunks_exact(2)) {
            *limb = F::from_canonical_u32(LittleEndian::read_u16(bytes) as u32);
        }
        limbs
    }

    /// Inverse of `to_field_limbs`; every limb must fit in 16 bits
    pub fn from_field_limbs(limbs: &[F]) -> Result<Self> {
        if limbs.len() < COMMITMENT_NUM_FIELDS {
            return Err(FlavorError::BufferExhausted {
                needed: COMMITMENT_NUM_FIELDS,
                offset: 0,
                available: limbs.len(),
            });
        }
        let mut bytes = [0u8; COMMITMENT_BYTES];
        for (chunk, limb) in bytes.chunks_exact_mut(2).zip(limbs) {
            let value = limb.as_canonical_u32();
            let value = u16::try_from(value).map_err(|_| FlavorError::InvalidCommitmentLimb(value))?;
            LittleEndian::write_u16(chunk, value);
        }
        Ok(Self(bytes))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

/// Commits to polynomials of at most `size` rows
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentKey {
    size: usize,
}

impl CommitmentKey {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Hash of the row count followed by every evaluation, virtual zeros included
    pub fn commit(&self, polynomial: &Polynomial<F>) -> Commitment {
        assert!(
            polynomial.size() <= self.size,
            "polynomial of size {} exceeds commitment key of size {}",
            polynomial.size(),
            self.size
        );
        let length = (polynomial.size() as u64).to_le_bytes();
        let values = polynomial
            .iter()
            .flat_map(|value| value.as_canonical_u32().to_le_bytes());
        Commitment(Keccak256Hash {}.hash_iter(length.into_iter().chain(values)))
    }

    pub fn commit_precomputed(
        &self,
        polynomials: &PrecomputedEntities<Polynomial<F>>,
    ) -> PrecomputedEntities<Commitment> {
        polynomials.map_ref(|polynomial| self.commit(polynomial))
    }
}
