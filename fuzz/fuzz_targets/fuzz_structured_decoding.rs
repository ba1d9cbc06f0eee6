#![no_main]

use libfuzzer_sys::fuzz_target;
use zk13::{CompactAddress, Ristretto255, StructuredAddress};

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = core::str::from_utf8(data) {
        let _ = StructuredAddress::unmarshal(json);
        if let Ok(compact) = CompactAddress::from_json(json) {
            let _ = compact.public_key_point();
            let _ = compact.proof();
        }
    }

    if data.len() >= 32 {
        if let Ok(point) = Ristretto255::element_from_bytes(&data[..32]) {
            assert_eq!(Ristretto255::element_to_bytes(&point), data[..32]);
        }
    }
});
