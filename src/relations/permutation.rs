//! Copy-constraint permutation over the four wires.

use p3_field::Field;

use super::{GrandProductArgument, RelationParameters};
use crate::flavor::{AllValues, WitnessColumn};

/// Grand product `z_perm` of `prod (w_k + id_k * beta + gamma) / (w_k + sigma_k * beta + gamma)`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PermutationArgument;

impl GrandProductArgument for PermutationArgument {
    fn accumulator_column(&self) -> WitnessColumn {
        WitnessColumn::ZPerm
    }

    fn numerator<F: Field>(&self, row: &AllValues<F>, params: &RelationParameters<F>) -> F {
        row.get_wires()
            .into_iter()
            .zip(row.get_ids())
            .map(|(wire, id)| *wire + *id * params.beta + params.gamma)
            .product()
    }

    fn denominator<F: Field>(&self, row: &AllValues<F>, params: &RelationParameters<F>) -> F {
        row.get_wires()
            .into_iter()
            .zip(row.get_sigmas())
            .map(|(wire, sigma)| *wire + *sigma * params.beta + params.gamma)
            .product()
    }
}
