mod common;

use std::sync::Arc;

use ivc_flavor::flavor::{PrecomputedColumn, PrecomputedEntities, WitnessEntities};
use ivc_flavor::{Column, Commitment, CommitmentKey, ProvingKey, VerificationKey, VerifierCommitments};
use rand::Rng;

fn random_key(seed: u64) -> VerificationKey {
    let mut rng = common::rng(seed);
    let mut key = VerificationKey::new(1usize << rng.gen_range(1u32..20), rng.gen_range(0..64));
    key.metadata.pub_inputs_offset = rng.gen_range(0..1024);
    key.metadata.contains_recursive_proof = rng.gen();
    for index in key.metadata.recursive_proof_public_input_indices.iter_mut() {
        *index = rng.gen_range(0..1 << 20);
    }
    let databus = &mut key.metadata.databus_propagation_data;
    databus.contains_app_return_data_commitment = rng.gen();
    databus.contains_kernel_return_data_commitment = rng.gen();
    databus.app_return_data_public_input_idx = rng.gen_range(0..1 << 20);
    databus.kernel_return_data_public_input_idx = rng.gen_range(0..1 << 20);
    databus.is_kernel = rng.gen();
    key.commitments = PrecomputedEntities::from_fn(|_| Commitment(rng.gen()));
    key
}

#[test]
fn field_element_round_trip() {
    common::init_logging();
    for seed in 0..16 {
        let key = random_key(seed);
        let elements = key.to_field_elements();
        assert_eq!(elements.len(), VerificationKey::NUM_FIELDS);
        let decoded = VerificationKey::from_field_elements(&elements).expect("decode");
        assert_eq!(decoded, key);
    }
}

#[test]
fn byte_and_json_round_trip() {
    let key = random_key(99);
    let bytes = key.to_bytes().expect("encode");
    assert_eq!(VerificationKey::from_bytes(&bytes).expect("decode"), key);

    let json = serde_json::to_string(&key).expect("json");
    let decoded: VerificationKey = serde_json::from_str(&json).expect("json");
    assert_eq!(decoded, key);
}

#[test]
fn derived_key_matches_direct_commitments() {
    let trace = common::small_trace(7);
    let ck = Arc::new(CommitmentKey::new(1 << 4));
    let proving_key = ProvingKey::from_trace(&trace, Some(ck.clone()));
    let key = VerificationKey::from_proving_key(&proving_key).expect("commit");

    assert_eq!(key.metadata, proving_key.metadata);
    for column in PrecomputedColumn::ALL {
        assert_eq!(
            key.commitments[column],
            ck.commit(&proving_key.get_precomputed()[column]),
            "{}",
            column.name()
        );
    }

    let again = VerificationKey::from_proving_key(&proving_key).expect("commit");
    assert_eq!(again, key);
}

#[test]
fn set_metadata_copies_without_committing() {
    let trace = common::small_trace(8);
    let proving_key = ProvingKey::from_trace(&trace, None);
    let mut key = VerificationKey::default();
    key.set_metadata(&proving_key);
    assert_eq!(key.circuit_size(), 8);
    assert_eq!(key.log_circuit_size(), 3);
    assert_eq!(key.num_public_inputs(), 2);
    assert_eq!(key.metadata.pub_inputs_offset, 1);
    assert!(VerificationKey::from_proving_key(&proving_key).is_err());
}

#[test]
fn verifier_commitments_line_up_with_columns() {
    let key = random_key(11);
    let witness = WitnessEntities::from_fn(|c| Commitment([c.index() as u8; 32]));
    let commitments = VerifierCommitments::new(&key, Some(&witness));

    for column in Column::all() {
        let expected = match column {
            Column::Precomputed(c) => Some(key.commitments[c]),
            Column::Witness(c) => Some(witness[c]),
            Column::Shifted(_) => None,
        };
        assert_eq!(commitments.get(column), expected, "{}", column.name());
    }
    assert_eq!(commitments.get_all().filter(|c| c.is_some()).count(), 54);
}

#[test]
fn edited_commitment_changes_the_encoding() {
    let key = random_key(12);
    let mut edited = key;
    edited.commitments.table_3 = Commitment([0u8; 32]);
    assert_ne!(edited.to_field_elements(), key.to_field_elements());
    let mut other = key;
    other.metadata.databus_propagation_data.is_kernel =
        !key.metadata.databus_propagation_data.is_kernel;
    assert_ne!(other.to_field_elements()[24], key.to_field_elements()[24]);
}
