use p3_field::{batch_multiplicative_inverse, Field};
use tracing::debug;

use crate::flavor::ProverPolynomials;
use crate::relations::{GrandProductArgument, RelationParameters};

/// Fill the argument's accumulator with the running product
/// `z[i + 1] = prod_{j <= i} numerator_j / denominator_j`, leaving `z[0] = 0`.
///
/// The accumulator must be shiftable; the last row's own ratio is not
/// included. Shifted views are refreshed on exit.
pub fn compute_grand_product<F, A>(
    polynomials: &mut ProverPolynomials<F>,
    params: &RelationParameters<F>,
    argument: &A,
) where
    F: Field,
    A: GrandProductArgument,
{
    let circuit_size = polynomials.circuit_size();
    let active = circuit_size.saturating_sub(1);
    let mut numerators = Vec::with_capacity(active);
    let mut denominators = Vec::with_capacity(active);
    for row_index in 0..active {
        let row = polynomials.get_row(row_index);
        let denominator = argument.denominator(&row, params);
        assert!(
            denominator != F::ZERO,
            "grand product denominator vanishes at row {row_index}"
        );
        numerators.push(argument.numerator(&row, params));
        denominators.push(denominator);
    }

    let inverses = batch_multiplicative_inverse(&denominators);
    let accumulator = &mut polynomials.witness_mut()[argument.accumulator_column()];
    assert!(
        accumulator.is_shiftable(),
        "{} must leave row 0 implicit",
        argument.accumulator_column().name()
    );
    let mut running = F::ONE;
    for (row_index, (numerator, inverse)) in numerators.into_iter().zip(inverses).enumerate() {
        running *= numerator * inverse;
        accumulator.set(row_index + 1, running);
    }
    debug!(
        column = argument.accumulator_column().name(),
        rows = circuit_size,
        "computed grand product"
    );
    polynomials.set_shifted();
}

/// Correction for public inputs that are absent from the copy cycles:
/// `prod (gamma + beta * (n + offset + i) + x_i) / (gamma - beta * (1 + offset + i) + x_i)`
pub fn compute_public_input_delta<F: Field>(
    public_inputs: &[F],
    beta: F,
    gamma: F,
    domain_size: usize,
    offset: usize,
) -> F {
    let mut numerator = F::ONE;
    let mut denominator = F::ONE;

    let mut numerator_acc = gamma + beta * F::from_canonical_usize(domain_size + offset);
    let mut denominator_acc = gamma - beta * F::from_canonical_usize(1 + offset);

    for input in public_inputs {
        numerator *= numerator_acc + *input;
        denominator *= denominator_acc + *input;
        numerator_acc += beta;
        denominator_acc -= beta;
    }
    numerator / denominator
}
