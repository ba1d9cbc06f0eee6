use proptest::prelude::*;
use zk13::{
    Blake3Wide, GridCell, KeyPair, LocationCommitter, ParameterGenerator, PedersenCommitter,
    ProofPair, Ristretto255, SecretHasher, SecureRng, Zk13,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn proof_verifies_for_any_secret(secret in "\\PC{1,64}") {
        let mut rng = SecureRng::new();
        let params = ParameterGenerator::default()
            .generate(128, &mut rng)
            .expect("Parameter generation should succeed");
        let zk = Zk13::with_parameters(params, Blake3Wide.hash_exponent(secret.as_bytes()));

        let proof = zk.prove(&mut rng).expect("Proof generation should succeed");
        prop_assert!(proof.in_range(zk.params()));
        prop_assert!(zk.verify(&proof), "Valid proof should verify successfully");
    }

    #[test]
    fn proof_text_parses_back(r in any::<u128>(), big_p in any::<u128>()) {
        let proof = ProofPair::new(r.into(), big_p.into());
        let parsed: ProofPair = proof.to_string().parse().expect("Proof text should parse");
        prop_assert_eq!(parsed, proof);
    }

    #[test]
    fn grid_cell_encoding_is_fixed_width(values in prop::collection::vec(any::<i64>(), 1..8)) {
        let cell = GridCell::new(values.clone());
        let bytes = cell.to_bytes();
        prop_assert_eq!(bytes.len(), values.len() * 8);

        let text = cell.to_string();
        prop_assert!(text.starts_with('[') && text.ends_with(']'));
        prop_assert_eq!(text.split_whitespace().count(), values.len());
    }

    #[test]
    fn commitment_points_decode(location in prop::collection::vec(any::<u8>(), 1..64)) {
        let mut rng = SecureRng::new();
        let keys = KeyPair::generate(&mut rng).expect("Key generation should succeed");
        let (randomness, point) = PedersenCommitter
            .commit(keys.secret(), &location, &mut rng)
            .expect("Commitment should succeed");

        let bytes = Ristretto255::element_to_bytes(&point);
        let decoded = Ristretto255::element_from_bytes(&bytes).expect("Point should decode");
        prop_assert_eq!(decoded, point);
        prop_assert!(PedersenCommitter.verify_opening(
            keys.secret(),
            &randomness,
            &location,
            &decoded
        ));
    }
}
