use p3_field::{batch_multiplicative_inverse, Field};
use tracing::debug;

use crate::flavor::ProverPolynomials;
use crate::relations::{LogDerivativeArgument, RelationParameters};

/// Fill the argument's inverse column with `1 / (read_term * write_term)` on
/// active rows and zero elsewhere.
///
/// Shifted views must be fresh on entry; they are refreshed again on exit.
pub fn compute_logderivative_inverse<F, A>(
    polynomials: &mut ProverPolynomials<F>,
    params: &RelationParameters<F>,
    argument: &A,
) where
    F: Field,
    A: LogDerivativeArgument,
{
    let circuit_size = polynomials.circuit_size();
    let mut active_rows = Vec::new();
    let mut denominators = Vec::new();
    for row_index in 0..circuit_size {
        let row = polynomials.get_row(row_index);
        if !argument.inverse_exists_at_row(&row) {
            continue;
        }
        let denominator = argument.read_term(&row, params) * argument.write_term(&row, params);
        assert!(
            denominator != F::ZERO,
            "{} denominator vanishes at row {row_index}",
            argument.inverse_column().name()
        );
        active_rows.push(row_index);
        denominators.push(denominator);
    }

    let inverses = batch_multiplicative_inverse(&denominators);
    let column = &mut polynomials.witness_mut()[argument.inverse_column()];
    for row_index in column.start_index()..column.end_index() {
        column.set(row_index, F::ZERO);
    }
    for (row_index, inverse) in active_rows.into_iter().zip(inverses) {
        column.set(row_index, inverse);
    }
    debug!(
        column = argument.inverse_column().name(),
        active = denominators.len(),
        "computed log-derivative inverses"
    );
    polynomials.set_shifted();
}

#[cfg(test)]
mod tests {
    use p3_field::FieldAlgebra;

    use super::*;
    use crate::flavor::BusKind;
    use crate::relations::{DatabusLookupArgument, LookupArgument};
    use crate::F;

    fn params() -> RelationParameters<F> {
        RelationParameters {
            eta: F::from_canonical_u32(3),
            eta_two: F::from_canonical_u32(9),
            eta_three: F::from_canonical_u32(27),
            beta: F::from_canonical_u32(11),
            gamma: F::from_canonical_u32(13),
            public_input_delta: F::ZERO,
        }
    }

    #[test]
    fn inverses_only_on_active_rows() {
        let mut polys = ProverPolynomials::<F>::new(8);
        polys.precomputed_mut().q_lookup.set(2, F::ONE);
        polys.witness_mut().lookup_read_tags.set(5, F::ONE);
        polys.set_shifted();

        let params = params();
        compute_logderivative_inverse(&mut polys, &params, &LookupArgument);

        for row_index in 0..8 {
            let row = polys.get_row(row_index);
            let inverse = row.witness.lookup_inverses;
            if row_index == 2 || row_index == 5 {
                let product = LookupArgument.read_term(&row, &params)
                    * LookupArgument.write_term(&row, &params);
                assert_eq!(inverse * product, F::ONE);
            } else {
                assert_eq!(inverse, F::ZERO);
            }
        }
    }

    #[test]
    fn databus_inverse_lands_in_its_own_column() {
        let mut polys = ProverPolynomials::<F>::new(4);
        {
            let pre = polys.precomputed_mut();
            pre.q_busread.set(1, F::ONE);
            pre.q_o.set(1, F::ONE);
        }
        polys.set_shifted();

        let argument = DatabusLookupArgument::new(BusKind::ReturnData);
        compute_logderivative_inverse(&mut polys, &params(), &argument);

        assert_ne!(polys.witness().return_data_inverses.get(1), F::ZERO);
        assert_eq!(polys.witness().calldata_inverses.get(1), F::ZERO);
        assert!(polys.shifts_are_fresh());
    }
}
