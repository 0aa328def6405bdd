mod common;

use ivc_flavor::flavor::{AllEntities, WitnessColumn, WitnessEntities};
use ivc_flavor::transcript::{MegaTranscriptData, SumcheckUnivariate, WITNESS_COMMITMENT_ORDER};
use ivc_flavor::{Commitment, HonkProof, MegaTranscript, Transcript, CONST_PROOF_SIZE_LOG_N, F};
use p3_field::FieldAlgebra;
use rand::Rng;

const NUM_PUBLIC_INPUTS: usize = 3;

/// Prover side of one proof, sent value by value with the challenges a real
/// prover would draw between rounds
fn prove(seed: u64) -> (Transcript, MegaTranscriptData, Vec<F>) {
    let mut rng = common::rng(seed);
    let mut data = MegaTranscriptData {
        circuit_size: 1 << 10,
        public_input_size: NUM_PUBLIC_INPUTS as u32,
        pub_inputs_offset: 1,
        public_inputs: (0..NUM_PUBLIC_INPUTS)
            .map(|_| common::random_field(&mut rng))
            .collect(),
        witness_commitments: WitnessEntities::from_fn(|_| Commitment(rng.gen())),
        sumcheck_evaluations: AllEntities::from_fn(|_| common::random_field(&mut rng)),
        shplonk_q_comm: Commitment(rng.gen()),
        kzg_w_comm: Commitment(rng.gen()),
        ..Default::default()
    };
    for univariate in data.sumcheck_univariates.iter_mut() {
        *univariate = SumcheckUnivariate::new(core::array::from_fn(|_| {
            common::random_field(&mut rng)
        }));
    }
    for commitment in data.gemini_fold_comms.iter_mut() {
        *commitment = Commitment(rng.gen());
    }
    for evaluation in data.gemini_fold_evals.iter_mut() {
        *evaluation = common::random_field(&mut rng);
    }

    let mut transcript = Transcript::default();
    let mut challenges = Vec::new();
    transcript.send_to_verifier("circuit_size", &data.circuit_size);
    transcript.send_to_verifier("public_input_size", &data.public_input_size);
    transcript.send_to_verifier("pub_inputs_offset", &data.pub_inputs_offset);
    for (i, input) in data.public_inputs.iter().enumerate() {
        transcript.send_to_verifier(&format!("public_input_{i}"), input);
    }
    for column in WITNESS_COMMITMENT_ORDER {
        transcript.send_to_verifier(column.label(), &data.witness_commitments[column]);
        match column {
            WitnessColumn::LookupReadTags => {
                challenges.extend(transcript.get_challenges(&["eta", "eta_two", "eta_three"]));
            }
            WitnessColumn::W4 => {
                challenges.extend(transcript.get_challenges(&["beta", "gamma"]));
            }
            _ => {}
        }
    }
    challenges.push(transcript.get_challenge("alpha"));
    for (round, univariate) in data.sumcheck_univariates.iter().enumerate() {
        transcript.send_to_verifier(&format!("Sumcheck:univariate_{round}"), univariate);
        challenges.push(transcript.get_challenge(&format!("Sumcheck:u_{round}")));
    }
    transcript.send_to_verifier("Sumcheck:evaluations", data.sumcheck_evaluations.as_array());
    for (i, commitment) in data.gemini_fold_comms.iter().enumerate() {
        transcript.send_to_verifier(&format!("Gemini:FOLD_{}", i + 1), commitment);
    }
    challenges.push(transcript.get_challenge("Gemini:r"));
    for (i, evaluation) in data.gemini_fold_evals.iter().enumerate() {
        transcript.send_to_verifier(&format!("Gemini:a_{i}"), evaluation);
    }
    challenges.push(transcript.get_challenge("Shplonk:nu"));
    transcript.send_to_verifier("Shplonk:Q", &data.shplonk_q_comm);
    challenges.push(transcript.get_challenge("Shplonk:z"));
    transcript.send_to_verifier("KZG:W", &data.kzg_w_comm);
    (transcript, data, challenges)
}

#[test]
fn prover_output_has_the_documented_length() {
    common::init_logging();
    let (transcript, _, _) = prove(1);
    assert_eq!(
        transcript.proof_size(),
        MegaTranscriptData::proof_length(NUM_PUBLIC_INPUTS)
    );
}

#[test]
fn full_deserialization_recovers_every_value() {
    let (transcript, data, _) = prove(2);
    let mut mega = MegaTranscript::new(transcript.export_proof());
    mega.deserialize_full_transcript().expect("well-formed proof");
    assert_eq!(mega.data, data);
    assert_eq!(mega.data.sumcheck_univariates.len(), CONST_PROOF_SIZE_LOG_N);
}

#[test]
fn edited_transcript_reserializes_in_place() {
    let (transcript, _, _) = prove(3);
    let original = transcript.export_proof();
    let mut mega = MegaTranscript::from_transcript(transcript);
    mega.deserialize_full_transcript().expect("well-formed proof");

    mega.data.kzg_w_comm = Commitment([7u8; 32]);
    mega.data.gemini_fold_evals[0] += F::ONE;
    mega.serialize_full_transcript();

    let edited = mega.export_proof();
    assert_eq!(edited.len(), original.len());
    let changed = original
        .as_slice()
        .iter()
        .zip(edited.as_slice())
        .filter(|(a, b)| a != b)
        .count();
    assert!(changed >= 1);
    assert!(changed <= 17);

    let mut reparsed = MegaTranscript::new(edited);
    reparsed.deserialize_full_transcript().expect("well-formed proof");
    assert_eq!(reparsed.data, mega.data);
}

#[test]
#[should_panic(expected = "re-serialized transcript changed length")]
fn growing_the_public_inputs_is_rejected() {
    let (transcript, _, _) = prove(4);
    let mut mega = MegaTranscript::from_transcript(transcript);
    mega.deserialize_full_transcript().expect("well-formed proof");
    mega.data.public_inputs.push(F::ONE);
    mega.data.public_input_size += 1;
    mega.serialize_full_transcript();
}

#[test]
fn truncated_proof_fails_to_parse() {
    let (transcript, _, _) = prove(5);
    let mut elements = transcript.export_proof().into_inner();
    elements.pop();
    let mut mega = MegaTranscript::new(HonkProof::new(elements));
    assert!(mega.deserialize_full_transcript().is_err());
}

#[test]
fn verifier_replays_the_prover_challenges() {
    let (prover, data, prover_challenges) = prove(6);
    let mut verifier = Transcript::new(prover.proof_data.clone());
    let mut challenges = Vec::new();

    let circuit_size: u32 = verifier.receive_from_prover("circuit_size").expect("read");
    let public_input_size: u32 = verifier.receive_from_prover("public_input_size").expect("read");
    let _: u32 = verifier.receive_from_prover("pub_inputs_offset").expect("read");
    assert_eq!(circuit_size, data.circuit_size);
    for i in 0..public_input_size {
        let _: F = verifier
            .receive_from_prover(&format!("public_input_{i}"))
            .expect("read");
    }
    for column in WITNESS_COMMITMENT_ORDER {
        let commitment: Commitment = verifier.receive_from_prover(column.label()).expect("read");
        assert_eq!(commitment, data.witness_commitments[column]);
        match column {
            WitnessColumn::LookupReadTags => {
                challenges.extend(verifier.get_challenges(&["eta", "eta_two", "eta_three"]));
            }
            WitnessColumn::W4 => {
                challenges.extend(verifier.get_challenges(&["beta", "gamma"]));
            }
            _ => {}
        }
    }
    challenges.push(verifier.get_challenge("alpha"));
    for round in 0..CONST_PROOF_SIZE_LOG_N {
        let _: SumcheckUnivariate = verifier
            .receive_from_prover(&format!("Sumcheck:univariate_{round}"))
            .expect("read");
        challenges.push(verifier.get_challenge(&format!("Sumcheck:u_{round}")));
    }
    assert_eq!(challenges[..], prover_challenges[..challenges.len()]);
    let read = verifier.manifest().len();
    assert_eq!(verifier.manifest(), &prover.manifest()[..read]);
}
