//! IVC flavor v0.1
//!
//! Column schema, proving/verification keys and proof transcript layout for a
//! Honk-style polynomial IOP over Baby Bear, extended with an elliptic-curve
//! operation queue and a data bus for recursive composition.
//!
//! # Architecture
//!
//! - Flavor: the fixed catalogue of 63 columns (30 precomputed, 24 witness,
//!   9 shifted) and the generic containers that instantiate it
//! - Proving key: circuit metadata plus every prover polynomial, with the
//!   three finalisation steps (memory records, log-derivative inverses,
//!   permutation grand product)
//! - Verification key: circuit metadata plus commitments to the precomputed
//!   columns, with its canonical field-element encoding
//! - Transcript: the exact order of values sent from prover to verifier and
//!   its codec
//!
//! Relations, sumcheck, folding and the opening protocol live outside this
//! crate; they read the containers defined here positionally.

pub mod circuit;
pub mod codec;
pub mod commitment;
pub mod error;
pub mod flavor;
pub mod library;
pub mod logging;
pub mod polynomial;
pub mod proving_key;
pub mod relations;
pub mod transcript;
pub mod univariate;
pub mod verification_key;

pub use circuit::CircuitTrace;
pub use commitment::{Commitment, CommitmentKey};
pub use error::{FlavorError, Result};
pub use flavor::{AllEntities, AllValues, Column, ProverPolynomials};
pub use polynomial::Polynomial;
pub use proving_key::{CircuitMetadata, DatabusPropagationData, ProvingKey};
pub use relations::RelationParameters;
pub use transcript::{HonkProof, MegaTranscript, Transcript};
pub use univariate::Univariate;
pub use verification_key::{VerificationKey, VerifierCommitments};

use p3_baby_bear::BabyBear;

/// The field type used throughout the keys and transcript (Baby Bear: p = 2^31 - 2^27 + 1)
pub type F = BabyBear;

/// Baby Bear prime: 2^31 - 2^27 + 1 = 2013265921
pub const BABY_BEAR_PRIME: u32 = 2013265921;

/// Number of execution wires
pub const NUM_WIRES: usize = 4;

/// Upper bound on log2 of the circuit size; fixes the proof length
pub const CONST_PROOF_SIZE_LOG_N: usize = 28;
