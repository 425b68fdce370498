// End-to-end correctness, failure rate measurement and input rejection

use mlwe_kem::error::error_codes;
use mlwe_kem::kem::decrypt;
use mlwe_kem::prelude::*;
use mlwe_kem::{PolyVec, Polynomial};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Fraction of encapsulations whose secrets disagree after decapsulation
fn failure_rate(set: ParameterSet, trials: usize, seed: u8) -> f64 {
    let kem = Kem::new(set.params()).unwrap();
    let mut rng = ChaCha20Rng::from_seed([seed; 32]);
    let mut failures = 0;
    for _ in 0..trials {
        let (pk, sk) = kem.keygen(&mut rng).unwrap();
        let (ct, sender) = kem.encapsulate(&pk, &mut rng).unwrap();
        if kem.decapsulate(&sk, &ct).unwrap() != sender {
            failures += 1;
        }
    }
    failures as f64 / trials as f64
}

#[test]
fn test_toy_failure_rate_is_measurable() {
    // The toy ring decodes wrongly often; the rate is reported, not hidden
    let rate = failure_rate(ParameterSet::Toy, 500, 21);
    println!("Toy decoding failure rate: {:.3}", rate);
    assert!(rate > 0.0, "toy parameters should exhibit decoding failures");
    assert!(rate < 0.9, "toy failure rate {} is implausibly high", rate);
}

#[test]
fn test_lattice_sets_decode_reliably() {
    for set in [
        ParameterSet::Lattice512,
        ParameterSet::Lattice768,
        ParameterSet::Lattice1024,
    ] {
        let rate = failure_rate(set, 20, 22);
        assert_eq!(rate, 0.0, "{} failed to decode", set);
    }
}

#[test]
fn test_decrypted_message_matches_on_success() {
    let params = ParameterSet::Lattice768.params();
    let kem = Kem::new(params).unwrap();
    let mut rng = ChaCha20Rng::from_seed([23; 32]);
    let (pk, sk) = kem.keygen(&mut rng).unwrap();
    let mut bytes = vec![0u8; params.message_bytes()];
    rng.fill_bytes(&mut bytes);
    let message = Message::from_bytes(&params, &bytes).unwrap();

    let (ct, sender) = kem.encapsulate_with_message(&pk, &message, &mut rng).unwrap();
    assert_eq!(decrypt(&params, &sk, &ct).unwrap(), message);
    assert_eq!(
        kem.deriver().derive_bound(&message, &ct.to_bytes(&params)),
        sender
    );
}

#[test]
fn test_ciphertext_with_wrong_rank_is_rejected() {
    let params = ParameterSet::Toy.params();
    let kem = Kem::new(params).unwrap();
    let (_, sk) = kem.keygen_from_seed([1; 32]).unwrap();

    let rank1 = RingParams::new(4, 17, 1, 1);
    let ct = Ciphertext::new(&rank1, PolyVec::zero(&rank1), Polynomial::zero(4)).unwrap();
    let err = kem.decapsulate(&sk, &ct).unwrap_err();
    assert_eq!(err.error_type(), "StructuralInputError");
    assert_eq!(err.error_code(), error_codes::DIMENSION_MISMATCH);
}

#[test]
fn test_ciphertext_with_wrong_degree_is_rejected() {
    let params = ParameterSet::Toy.params();
    let kem = Kem::new(params).unwrap();
    let (_, sk) = kem.keygen_from_seed([2; 32]).unwrap();

    let wide = RingParams::new(8, 17, 2, 1);
    let ct = Ciphertext::new(&wide, PolyVec::zero(&wide), Polynomial::zero(8)).unwrap();
    assert_eq!(
        kem.decapsulate(&sk, &ct).unwrap_err().error_code(),
        error_codes::DIMENSION_MISMATCH
    );
}

#[test]
fn test_public_key_from_other_params_is_rejected() {
    let kem = Kem::new(ParameterSet::Lattice512.params()).unwrap();
    let other = Kem::new(ParameterSet::Lattice768.params()).unwrap();
    let (pk, _) = other.keygen_from_seed([3; 32]).unwrap();
    let mut rng = ChaCha20Rng::from_seed([4; 32]);
    let err = kem.encapsulate(&pk, &mut rng).unwrap_err();
    assert_eq!(err.error_type(), "StructuralInputError");
}

/// Yields a fixed number of bytes, then fails
struct LimitedRng {
    inner: ChaCha20Rng,
    remaining: usize,
}

impl RngCore for LimitedRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        if dest.len() > self.remaining {
            return Err(rand::Error::new(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "randomness budget exhausted",
            )));
        }
        self.remaining -= dest.len();
        self.inner.try_fill_bytes(dest)
    }
}

impl CryptoRng for LimitedRng {}

#[test]
fn test_randomness_failure_is_propagated() {
    let kem = Kem::new(ParameterSet::Lattice512.params()).unwrap();
    let mut rng = LimitedRng {
        inner: ChaCha20Rng::from_seed([5; 32]),
        remaining: 64,
    };
    let err = kem.keygen(&mut rng).unwrap_err();
    assert_eq!(err.error_type(), "RandomnessUnavailable");
    assert_eq!(err.error_code(), error_codes::RANDOMNESS_SOURCE_FAILED);

    let (pk, _) = kem.keygen_from_seed([6; 32]).unwrap();
    let mut rng = LimitedRng {
        inner: ChaCha20Rng::from_seed([7; 32]),
        remaining: 40,
    };
    let err = kem.encapsulate(&pk, &mut rng).unwrap_err();
    assert_eq!(err.error_type(), "RandomnessUnavailable");
}

#[test]
fn test_parameter_sets_coexist_across_threads() {
    let handles: Vec<_> = ParameterSet::ALL
        .iter()
        .enumerate()
        .filter(|(_, set)| **set != ParameterSet::Toy)
        .map(|(i, set)| {
            let kem = Kem::new(set.params()).unwrap();
            std::thread::spawn(move || {
                let mut rng = ChaCha20Rng::from_seed([i as u8; 32]);
                let (pk, sk) = kem.keygen(&mut rng).unwrap();
                let (ct, ss) = kem.encapsulate(&pk, &mut rng).unwrap();
                kem.decapsulate(&sk, &ct).unwrap() == ss
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

#[test]
fn test_ring_arithmetic_rejects_mixed_degrees() {
    // Release builds must not silently truncate to the shorter operand
    let wide = Polynomial::from_coeffs(&RingParams::new(4, 17, 2, 1), vec![1, 2, 3, 4]).unwrap();
    let narrow = Polynomial::from_coeffs(&RingParams::new(2, 17, 2, 1), vec![1, 2]).unwrap();
    for result in [wide.add(&narrow, 17), wide.sub(&narrow, 17), wide.mul(&narrow, 17)] {
        assert_eq!(result.unwrap_err().error_code(), error_codes::DIMENSION_MISMATCH);
    }

    let toy = ParameterSet::Toy.params();
    let kem = Kem::new(toy).unwrap();
    let (pk, _) = kem.keygen_from_seed([8; 32]).unwrap();
    let r = PolyVec::from_signed(&RingParams::new(4, 17, 3, 1), &[&[1, 0, 0, 0], &[0, 1, 0, 0], &[0, 0, 1, 0]]).unwrap();
    let err = pk.matrix().transpose_mul_vec(&r, toy.q).unwrap_err();
    assert_eq!(err.error_code(), error_codes::DIMENSION_MISMATCH);
}
