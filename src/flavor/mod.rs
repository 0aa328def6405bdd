//! Column taxonomy and the containers that instantiate it
//!
//! The flavor fixes the set and order of every column the relations,
//! sumcheck, folding and commitment layers agree on:
//! - Precomputed: 30 circuit-shape columns
//! - Witness: 24 per-execution columns
//! - Shifted: 9 one-row-ahead views, never stored separately
//!
//! Containers are generic over the element kind; every instantiation below
//! shares the same ordering by construction.

mod columns;
mod entities;
mod prover_polynomials;

pub use columns::{
    BusColumns, BusKind, PrecomputedColumn, PrecomputedEntities, ShiftedColumn, ShiftedEntities,
    WitnessColumn, WitnessEntities,
};
pub use entities::{
    schema, zip_view, AllEntities, Column, ColumnCategory, ColumnDescriptor, TO_BE_SHIFTED,
};
pub use prover_polynomials::{PartiallyEvaluatedMultivariates, ProverPolynomials, ShiftedView};

use crate::commitment::Commitment;
use crate::relations;
use crate::univariate::Univariate;

/// Columns fixed by the circuit shape
pub const NUM_PRECOMPUTED_ENTITIES: usize = 30;
/// Columns filled per execution, shifts excluded
pub const NUM_WITNESS_ENTITIES: usize = 24;
/// One-row-shifted views
pub const NUM_SHIFTED_ENTITIES: usize = 9;
/// Columns folded by sumcheck and Protogalaxy: everything except shifts
pub const NUM_FOLDED_ENTITIES: usize = NUM_PRECOMPUTED_ENTITIES + NUM_WITNESS_ENTITIES;
/// Every column the sumcheck prover operates on, shifts included
pub const NUM_ALL_ENTITIES: usize = NUM_FOLDED_ENTITIES + NUM_SHIFTED_ENTITIES;
/// Witness columns plus shifted witnesses (`AllEntities::get_all_witnesses`)
pub const NUM_ALL_WITNESS_ENTITIES: usize = NUM_WITNESS_ENTITIES + 5;

/// Row 0 of every trace is reserved for zeros so that shifts are well
/// defined; shift sources then leave row 0 unstored
pub const HAS_ZERO_ROW: bool = true;

pub const MAX_PARTIAL_RELATION_LENGTH: usize = relations::MAX_PARTIAL_RELATION_LENGTH;
/// Longest relation when relation parameters are folded too
pub const MAX_TOTAL_RELATION_LENGTH: usize = relations::MAX_TOTAL_RELATION_LENGTH;
/// Relation length after multiplying by the pow-zeta polynomial
pub const BATCHED_RELATION_PARTIAL_LENGTH: usize = MAX_PARTIAL_RELATION_LENGTH + 1;
pub const NUM_RELATIONS: usize = relations::NUM_RELATIONS;
pub const NUM_SUBRELATIONS: usize = relations::NUM_SUBRELATIONS;

const _: () = {
    assert!(PrecomputedColumn::COUNT == NUM_PRECOMPUTED_ENTITIES);
    assert!(WitnessColumn::COUNT == NUM_WITNESS_ENTITIES);
    assert!(ShiftedColumn::COUNT == NUM_SHIFTED_ENTITIES);
    assert!(NUM_ALL_ENTITIES == 63);
    assert!(MAX_TOTAL_RELATION_LENGTH == 11);
    assert!(MAX_TOTAL_RELATION_LENGTH >= MAX_PARTIAL_RELATION_LENGTH);
};

/// One field element per column: the prover polynomials evaluated at a point
pub type AllValues<F> = AllEntities<F>;

/// Commitments to the witness columns, as sent by the prover
pub type WitnessCommitments = WitnessEntities<Commitment>;

/// Transcript label of every column
pub type CommitmentLabels = AllEntities<&'static str>;

/// Univariates over every column, used by sumcheck and folding
pub type ProverUnivariates<F, const LENGTH: usize> = AllEntities<Univariate<F, LENGTH>>;

/// Prover univariates whose first `SKIP_COUNT` non-zero points are left uncomputed
pub type ProverUnivariatesWithOptimisticSkipping<F, const LENGTH: usize, const SKIP_COUNT: usize> =
    AllEntities<Univariate<F, LENGTH, SKIP_COUNT>>;

/// Univariates produced in the sumcheck hot loop
pub type ExtendedEdges<F> = ProverUnivariates<F, MAX_PARTIAL_RELATION_LENGTH>;

/// Batching challenge per subrelation (one fewer: the first is implicit)
pub type RelationSeparator<F> = [F; NUM_SUBRELATIONS - 1];
