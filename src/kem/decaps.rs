use zeroize::Zeroize;

use super::Kem;
use crate::codec::{decode, Message};
use crate::derive::SharedSecret;
use crate::error::KemResult;
use crate::params::RingParams;
use crate::types::{Ciphertext, SecretKey};

impl Kem {
    /// Recover the shared secret from a ciphertext
    ///
    /// Dimension mismatches are rejected before any arithmetic. A ciphertext
    /// whose residual noise exceeds the decoding threshold still yields a
    /// secret; it simply differs from the sender's.
    pub fn decapsulate(&self, sk: &SecretKey, ciphertext: &Ciphertext) -> KemResult<SharedSecret> {
        let message = decrypt(&self.params, sk, ciphertext)?;
        log::debug!("decapsulated ciphertext ({})", self.params);
        Ok(self
            .deriver
            .derive_bound(&message, &ciphertext.to_bytes(&self.params)))
    }
}

/// Decode `v - u*s` back to the message bits
pub fn decrypt(params: &RingParams, sk: &SecretKey, ciphertext: &Ciphertext) -> KemResult<Message> {
    const OP: &str = "decapsulate";
    params.validate()?;
    sk.check(params, OP)?;
    ciphertext.check(params, OP)?;

    let q = params.q;
    let mut noisy = ciphertext.v().sub(&ciphertext.u().dot(sk.s(), q)?, q)?;
    let message = decode(params, &noisy);
    noisy.zeroize();
    message
}
