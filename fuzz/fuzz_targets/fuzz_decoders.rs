#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mlwe_kem::{Ciphertext, Message, ParameterSet, PublicKey, RingParams, SecretKey};

#[derive(Arbitrary, Debug)]
struct DecoderFuzzInput {
    set_index: u8,
    raw_params: (u16, u32, u16, u8),
    data: Vec<u8>,
}

fuzz_target!(|input: DecoderFuzzInput| {
    let set = ParameterSet::ALL[input.set_index as usize % ParameterSet::ALL.len()];
    let params = set.params();

    // Any accepted encoding must re-encode to the same bytes
    if let Ok(pk) = PublicKey::from_bytes(&params, &input.data) {
        assert_eq!(pk.to_bytes(&params), input.data);
    }
    if let Ok(sk) = SecretKey::from_bytes(&params, &input.data) {
        assert_eq!(sk.to_bytes(&params), input.data);
    }
    if let Ok(ct) = Ciphertext::from_bytes(&params, &input.data) {
        assert_eq!(ct.to_bytes(&params), input.data);
    }
    let _ = Message::from_bytes(&params, &input.data);

    // Unvalidated parameters must be rejected, never panic
    let (n, q, k, eta) = input.raw_params;
    let raw = RingParams::new(n as usize, q, k as usize, eta as u32);
    let _ = PublicKey::from_bytes(&raw, &input.data);
    let _ = SecretKey::from_bytes(&raw, &input.data);
    let _ = Ciphertext::from_bytes(&raw, &input.data);
    let _ = Message::from_bytes(&raw, &input.data);
});
