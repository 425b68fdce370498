use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use super::Kem;
use crate::codec::{encode, Message};
use crate::derive::SharedSecret;
use crate::error::{KemError, KemResult};
use crate::params::RingParams;
use crate::ring::{PolyVec, Polynomial};
use crate::sampler::Sampler;
use crate::types::{Ciphertext, PublicKey};

impl Kem {
    /// Encapsulate a fresh random message to `pk`
    ///
    /// # Returns
    ///
    /// The ciphertext to send and the sender's shared secret
    pub fn encapsulate<R: RngCore + CryptoRng>(
        &self,
        pk: &PublicKey,
        rng: &mut R,
    ) -> KemResult<(Ciphertext, SharedSecret)> {
        pk.check(&self.params, "encapsulate")?;
        let message = Sampler::new(&self.params, rng)?.message()?;
        self.encapsulate_with_message(pk, &message, rng)
    }

    /// Encapsulate a caller-chosen message to `pk`
    ///
    /// Fresh `r`, `e1` and `e2` are still drawn from `rng`.
    pub fn encapsulate_with_message<R: RngCore + CryptoRng>(
        &self,
        pk: &PublicKey,
        message: &Message,
        rng: &mut R,
    ) -> KemResult<(Ciphertext, SharedSecret)> {
        const OP: &str = "encapsulate";
        let params = &self.params;
        pk.check(params, OP)?;
        check_message(params, message, OP)?;

        let mut sampler = Sampler::new(params, rng)?;
        let mut r = sampler.noise_vec()?;
        let mut e1 = sampler.noise_vec()?;
        let mut e2 = sampler.noise(params.eta)?;

        let ciphertext = lwe_encrypt(params, pk, message, &r, &e1, &e2);
        r.zeroize();
        e1.zeroize();
        e2.zeroize();
        let ciphertext = ciphertext?;

        let secret = self
            .deriver
            .derive_bound(message, &ciphertext.to_bytes(params));
        log::debug!("encapsulated {}-bit message ({})", message.len(), params);
        Ok((ciphertext, secret))
    }
}

/// Encrypt `message` under `pk` with explicit ephemeral noise
///
/// Computes `u = A^T*r + e1` and `v = t*r + e2 + encode(message)`.
pub fn encrypt(
    params: &RingParams,
    pk: &PublicKey,
    message: &Message,
    r: &PolyVec,
    e1: &PolyVec,
    e2: &Polynomial,
) -> KemResult<Ciphertext> {
    const OP: &str = "encrypt";
    params.validate()?;
    pk.check(params, OP)?;
    check_message(params, message, OP)?;
    r.check(params, OP)?;
    e1.check(params, OP)?;
    e2.check(params, OP)?;
    lwe_encrypt(params, pk, message, r, e1, e2)
}

fn lwe_encrypt(
    params: &RingParams,
    pk: &PublicKey,
    message: &Message,
    r: &PolyVec,
    e1: &PolyVec,
    e2: &Polynomial,
) -> KemResult<Ciphertext> {
    let q = params.q;
    let u = pk.matrix().transpose_mul_vec(r, q)?.add(e1, q)?;
    let v = pk
        .t()
        .dot(r, q)?
        .add(e2, q)?
        .add(&encode(params, message)?, q)?;
    Ok(Ciphertext::from_checked(u, v))
}

fn check_message(params: &RingParams, message: &Message, operation: &str) -> KemResult<()> {
    if message.len() != params.n {
        return Err(KemError::dimension_mismatch(operation, params.n, message.len()));
    }
    Ok(())
}
