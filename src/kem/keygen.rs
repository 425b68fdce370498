use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use zeroize::Zeroize;

use super::{Kem, MatrixMode};
use crate::error::KemResult;
use crate::params::{RingParams, SEED_BYTES};
use crate::ring::{Matrix, PolyVec};
use crate::sampler::{expand_matrix, Sampler};
use crate::types::{PublicKey, SecretKey};

impl Kem {
    /// Generate a key pair satisfying `t = A*s + e`
    ///
    /// # Arguments
    ///
    /// * `rng` - Secure randomness source for `A` (or its seed), `s` and `e`
    ///
    /// # Returns
    ///
    /// The public and secret key, or `RandomnessUnavailable` if the source fails
    pub fn keygen<R: RngCore + CryptoRng>(&self, rng: &mut R) -> KemResult<(PublicKey, SecretKey)> {
        let params = &self.params;
        let mut sampler = Sampler::new(params, rng)?;

        let (matrix, seed) = match self.matrix_mode {
            MatrixMode::Expanded => (sampler.uniform_matrix()?, None),
            MatrixMode::Seeded => {
                let seed = sampler.seed()?;
                (expand_matrix(params, &seed)?, Some(seed))
            }
        };
        let s = sampler.noise_vec()?;
        let mut e = sampler.noise_vec()?;

        let t = lwe_sample(params, &matrix, &s, &e);
        e.zeroize();
        let t = t?;

        log::debug!("generated {:?} key pair ({})", self.matrix_mode, params);
        Ok((
            PublicKey::from_checked(matrix, t, seed),
            SecretKey::new(params, s)?,
        ))
    }

    /// Deterministic key generation from a 32-byte seed
    ///
    /// The seed drives a ChaCha20 stream, so equal seeds give equal key pairs
    /// under the same `Kem` configuration.
    pub fn keygen_from_seed(&self, seed: [u8; SEED_BYTES]) -> KemResult<(PublicKey, SecretKey)> {
        let mut rng = ChaCha20Rng::from_seed(seed);
        self.keygen(&mut rng)
    }
}

/// Build a key pair from explicit `A`, `s` and `e`
///
/// All inputs are checked against `params` before any arithmetic. The
/// resulting public key is in expanded form.
pub fn keygen_from_parts(
    params: &RingParams,
    matrix: Matrix,
    s: PolyVec,
    mut e: PolyVec,
) -> KemResult<(PublicKey, SecretKey)> {
    const OP: &str = "keygen_from_parts";
    params.validate()?;
    matrix.check(params, OP)?;
    s.check(params, OP)?;
    e.check(params, OP)?;

    let t = lwe_sample(params, &matrix, &s, &e);
    e.zeroize();
    let t = t?;
    Ok((PublicKey::new(params, matrix, t)?, SecretKey::new(params, s)?))
}

fn lwe_sample(params: &RingParams, matrix: &Matrix, s: &PolyVec, e: &PolyVec) -> KemResult<PolyVec> {
    matrix.mul_vec(s, params.q)?.add(e, params.q)
}
