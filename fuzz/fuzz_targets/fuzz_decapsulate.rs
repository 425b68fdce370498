#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mlwe_kem::{Ciphertext, Kem, ParameterSet};

#[derive(Arbitrary, Debug)]
struct DecapsulateFuzzInput {
    key_seed: [u8; 32],
    ciphertext: Vec<u8>,
}

fuzz_target!(|input: DecapsulateFuzzInput| {
    let params = ParameterSet::Lattice512.params();
    let kem = match Kem::new(params) {
        Ok(kem) => kem,
        Err(_) => return,
    };
    let (_, sk) = match kem.keygen_from_seed(input.key_seed) {
        Ok(keys) => keys,
        Err(_) => return,
    };

    // Arbitrary ciphertexts either fail to decode or decapsulate to some secret
    if let Ok(ct) = Ciphertext::from_bytes(&params, &input.ciphertext) {
        let secret = kem.decapsulate(&sk, &ct).expect("well-formed ciphertext");
        assert_eq!(secret.len(), kem.deriver().output_size());
    }
});
