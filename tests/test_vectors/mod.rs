// Deterministic test vectors for interoperability testing
//
// Each vector is generated from a fixed 32-byte seed: key generation runs on
// ChaCha20 seeded with it, encapsulation on ChaCha20 seeded with the seed's
// bitwise complement.

use mlwe_kem::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

/// Test vector for one KEM round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KemTestVector {
    pub parameter_set: ParameterSet,
    pub matrix_mode: MatrixMode,
    pub seed: [u8; 32],
    pub public_key: Vec<u8>,
    pub secret_key: Vec<u8>,
    pub ciphertext: Vec<u8>,
    pub shared_secret: Vec<u8>,
}

/// Generate the vector for `set` and `seed`
pub fn generate_test_vector(set: ParameterSet, matrix_mode: MatrixMode, seed: [u8; 32]) -> KemTestVector {
    let params = set.params();
    let kem = Kem::new(params)
        .expect("predefined parameters are valid")
        .with_matrix_mode(matrix_mode);
    let (pk, sk) = kem.keygen_from_seed(seed).expect("keygen from seed");

    let mut encap_seed = seed;
    encap_seed.iter_mut().for_each(|b| *b = !*b);
    let mut rng = ChaCha20Rng::from_seed(encap_seed);
    let (ct, ss) = kem.encapsulate(&pk, &mut rng).expect("encapsulate");

    KemTestVector {
        parameter_set: set,
        matrix_mode,
        seed,
        public_key: pk.to_bytes(&params),
        secret_key: sk.to_bytes(&params),
        ciphertext: ct.to_bytes(&params),
        shared_secret: ss.as_bytes().to_vec(),
    }
}

/// One vector per predefined set and matrix mode
pub fn standard_test_vectors() -> Vec<KemTestVector> {
    let mut vectors = Vec::new();
    for (i, set) in ParameterSet::ALL.iter().enumerate() {
        for mode in [MatrixMode::Expanded, MatrixMode::Seeded] {
            let seed: [u8; 32] = std::array::from_fn(|j| (i * 64 + j) as u8);
            vectors.push(generate_test_vector(*set, mode, seed));
        }
    }
    vectors
}

/// Check a vector by decoding its bytes and decapsulating
pub fn verify_test_vector(vector: &KemTestVector) -> KemResult<bool> {
    let params = vector.parameter_set.params();
    let kem = Kem::new(params)?;
    let pk = PublicKey::from_bytes(&params, &vector.public_key)?;
    let sk = SecretKey::from_bytes(&params, &vector.secret_key)?;
    let ct = Ciphertext::from_bytes(&params, &vector.ciphertext)?;

    let ss = kem.decapsulate(&sk, &ct)?;
    let regenerated = generate_test_vector(vector.parameter_set, vector.matrix_mode, vector.seed);
    Ok(pk.to_bytes(&params) == vector.public_key
        && ss.as_bytes() == vector.shared_secret.as_slice()
        && regenerated == *vector)
}
