#![allow(dead_code)]

use ivc_flavor::{CircuitTrace, F, BABY_BEAR_PRIME};
use p3_field::FieldAlgebra;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn init_logging() {
    ivc_flavor::logging::init_with_level(Some("warn"));
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn random_field(rng: &mut impl Rng) -> F {
    F::from_canonical_u32(rng.gen_range(0..BABY_BEAR_PRIME))
}

/// Random values for rows 1..rows, zero at row 0
pub fn random_column(rng: &mut impl Rng, rows: usize) -> Vec<F> {
    (0..rows)
        .map(|row| if row == 0 { F::ZERO } else { random_field(rng) })
        .collect()
}

/// Seven-row circuit with arithmetic rows, one lookup read, one calldata
/// read, a RAM read and a RAM write, and an identity copy permutation
pub fn small_trace(seed: u64) -> CircuitTrace {
    let mut rng = rng(seed);
    let rows = 7;
    let mut trace = CircuitTrace::new();

    trace.witness.w_l = random_column(&mut rng, rows);
    trace.witness.w_r = random_column(&mut rng, rows);
    trace.witness.w_o = random_column(&mut rng, rows);
    trace.witness.w_4 = random_column(&mut rng, rows);
    trace.precomputed.q_arith = vec![F::ZERO, F::ONE, F::ONE, F::ONE, F::ZERO, F::ZERO, F::ZERO];

    for (k, id) in trace.precomputed.get_ids_mut().into_iter().enumerate() {
        *id = (0..rows).map(|row| F::from_canonical_usize(k * 8 + row)).collect();
    }
    for (k, sigma) in trace.precomputed.get_sigmas_mut().into_iter().enumerate() {
        *sigma = (0..rows).map(|row| F::from_canonical_usize(k * 8 + row)).collect();
    }

    // table row 2 holds (1, 2, 3, 0); row 4 reads it
    trace.precomputed.table_1 = vec![F::ZERO, F::ZERO, F::ONE];
    trace.precomputed.table_2 = vec![F::ZERO, F::ZERO, F::TWO];
    trace.precomputed.table_3 = vec![F::ZERO, F::ZERO, F::from_canonical_u32(3)];
    trace.precomputed.q_lookup = vec![F::ZERO, F::ZERO, F::ZERO, F::ZERO, F::ONE];
    trace.witness.lookup_read_counts = vec![F::ZERO, F::ZERO, F::ONE];
    trace.witness.lookup_read_tags = vec![F::ZERO, F::ZERO, F::ONE];

    // calldata[1] = 42 is read at row 5
    trace.witness.calldata = vec![F::ZERO, F::from_canonical_u32(42)];
    trace.witness.calldata_read_counts = vec![F::ZERO, F::ONE];
    trace.witness.calldata_read_tags = vec![F::ZERO, F::ONE];
    trace.precomputed.q_busread = vec![F::ZERO; 5]
        .into_iter()
        .chain([F::ONE])
        .collect();
    trace.precomputed.q_l = trace.precomputed.q_busread.clone();

    trace.public_inputs = vec![random_field(&mut rng), random_field(&mut rng)];
    trace.pub_inputs_offset = 1;
    trace.memory_read_records = vec![2];
    trace.memory_write_records = vec![3];
    trace
}
