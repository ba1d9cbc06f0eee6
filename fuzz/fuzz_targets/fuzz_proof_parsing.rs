#![no_main]

use libfuzzer_sys::fuzz_target;
use zk13::ProofPair;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = core::str::from_utf8(data) {
        if let Ok(proof) = text.parse::<ProofPair>() {
            let reparsed: ProofPair = proof.to_string().parse().unwrap();
            assert_eq!(reparsed, proof);
        }
    }
});
