#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mlwe_kem::{Kem, RingParams};

#[derive(Arbitrary, Debug)]
struct ParamsFuzzInput {
    log_n: u8,
    q: u32,
    k: u8,
    eta: u8,
    seed: [u8; 32],
    json: String,
}

fuzz_target!(|input: ParamsFuzzInput| {
    let _ = RingParams::from_json(&input.json);

    // Keep rings small so a full round stays cheap
    let n = 1usize << (input.log_n % 6);
    let params = RingParams::new(n, input.q, input.k as usize % 5, input.eta as u32 % 4);

    if let Ok(kem) = Kem::new(params) {
        let (pk, sk) = kem.keygen_from_seed(input.seed).expect("valid params");
        let mut rng = <rand_chacha::ChaCha20Rng as rand::SeedableRng>::from_seed(input.seed);
        let (ct, _) = kem.encapsulate(&pk, &mut rng).expect("valid params");
        kem.decapsulate(&sk, &ct).expect("matching dimensions");
    }
});
