//! Relation interface consumed by the flavor
//!
//! The constraint relations themselves live outside this crate. The flavor
//! only needs:
//! - a static descriptor table, to size univariate and evaluation containers
//! - the row-level terms of the permutation, lookup and data bus arguments,
//!   to build the derived witness columns during key finalisation

mod databus;
mod lookup;
mod permutation;

pub use databus::DatabusLookupArgument;
pub use lookup::LookupArgument;
pub use permutation::PermutationArgument;

use p3_field::Field;
use serde::{Deserialize, Serialize};

use crate::flavor::{AllValues, WitnessColumn};

/// Challenges shared between the key finalisation steps and the relations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationParameters<F> {
    pub eta: F,
    pub eta_two: F,
    pub eta_three: F,
    pub beta: F,
    pub gamma: F,
    /// Written by the grand product step
    pub public_input_delta: F,
}

/// Static description of one relation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelationDescriptor {
    pub name: &'static str,
    /// Partial length (degree + 1) of each subrelation
    pub subrelation_partial_lengths: &'static [usize],
    /// Length once the relation parameters are also treated as variables,
    /// as they are when instances are folded
    pub subrelation_total_lengths: &'static [usize],
}

/// The relations evaluated over this flavor, in batching order
pub const RELATIONS: [RelationDescriptor; 10] = [
    RelationDescriptor {
        name: "ultra_arithmetic",
        subrelation_partial_lengths: &[6, 5],
        subrelation_total_lengths: &[6, 5],
    },
    RelationDescriptor {
        name: "ultra_permutation",
        subrelation_partial_lengths: &[6, 3],
        subrelation_total_lengths: &[11, 3],
    },
    RelationDescriptor {
        name: "logderiv_lookup",
        subrelation_partial_lengths: &[5, 5],
        subrelation_total_lengths: &[5, 5],
    },
    RelationDescriptor {
        name: "delta_range_constraint",
        subrelation_partial_lengths: &[6, 6, 6, 6],
        subrelation_total_lengths: &[6, 6, 6, 6],
    },
    RelationDescriptor {
        name: "elliptic",
        subrelation_partial_lengths: &[6, 6],
        subrelation_total_lengths: &[6, 6],
    },
    RelationDescriptor {
        name: "auxiliary",
        subrelation_partial_lengths: &[6, 6, 6, 6, 6, 6],
        subrelation_total_lengths: &[6, 6, 6, 6, 6, 6],
    },
    RelationDescriptor {
        name: "ecc_op_queue",
        subrelation_partial_lengths: &[3, 3, 3, 3, 3, 3, 3, 3],
        subrelation_total_lengths: &[3, 3, 3, 3, 3, 3, 3, 3],
    },
    RelationDescriptor {
        name: "databus_lookup",
        subrelation_partial_lengths: &[5, 5, 5, 5, 5, 5],
        subrelation_total_lengths: &[5, 5, 5, 5, 5, 5],
    },
    RelationDescriptor {
        name: "poseidon2_external",
        subrelation_partial_lengths: &[7, 7, 7, 7],
        subrelation_total_lengths: &[7, 7, 7, 7],
    },
    RelationDescriptor {
        name: "poseidon2_internal",
        subrelation_partial_lengths: &[7, 7, 7, 7],
        subrelation_total_lengths: &[7, 7, 7, 7],
    },
];

pub const NUM_RELATIONS: usize = RELATIONS.len();
pub const MAX_PARTIAL_RELATION_LENGTH: usize = max_partial_relation_length(&RELATIONS);
pub const MAX_TOTAL_RELATION_LENGTH: usize = max_total_relation_length(&RELATIONS);
pub const NUM_SUBRELATIONS: usize = number_of_subrelations(&RELATIONS);

const fn max_length(relations: &[RelationDescriptor], total: bool) -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < relations.len() {
        let lengths = if total {
            relations[i].subrelation_total_lengths
        } else {
            relations[i].subrelation_partial_lengths
        };
        let mut j = 0;
        while j < lengths.len() {
            if lengths[j] > max {
                max = lengths[j];
            }
            j += 1;
        }
        i += 1;
    }
    max
}

pub const fn max_partial_relation_length(relations: &[RelationDescriptor]) -> usize {
    max_length(relations, false)
}

/// Longest subrelation once relation parameters count towards the degree
pub const fn max_total_relation_length(relations: &[RelationDescriptor]) -> usize {
    max_length(relations, true)
}

pub const fn number_of_subrelations(relations: &[RelationDescriptor]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < relations.len() {
        total += relations[i].subrelation_partial_lengths.len();
        i += 1;
    }
    total
}

/// A log-derivative argument: per-row inverses of `read_term * write_term`
pub trait LogDerivativeArgument {
    /// Column receiving the inverses
    fn inverse_column(&self) -> WitnessColumn;

    /// Whether a read or a write happens at this row
    fn inverse_exists_at_row<F: Field>(&self, row: &AllValues<F>) -> bool;

    fn read_term<F: Field>(&self, row: &AllValues<F>, params: &RelationParameters<F>) -> F;

    fn write_term<F: Field>(&self, row: &AllValues<F>, params: &RelationParameters<F>) -> F;
}

/// A grand product argument: running product of `numerator / denominator`
pub trait GrandProductArgument {
    /// Column receiving the accumulator; must be shiftable
    fn accumulator_column(&self) -> WitnessColumn;

    fn numerator<F: Field>(&self, row: &AllValues<F>, params: &RelationParameters<F>) -> F;

    fn denominator<F: Field>(&self, row: &AllValues<F>, params: &RelationParameters<F>) -> F;
}
