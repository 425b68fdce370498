/*!
 * Module-LWE key encapsulation
 *
 * `Kem` binds a validated parameter set to a secret derivation policy and a
 * public matrix representation. Key generation, encapsulation and
 * decapsulation are methods on it; the explicit-noise primitives
 * (`keygen_from_parts`, `encrypt`, `decrypt`) are exposed for replaying
 * fixed vectors.
 */

mod decaps;
mod encaps;
mod keygen;

pub use decaps::decrypt;
pub use encaps::encrypt;
pub use keygen::keygen_from_parts;

use serde::{Deserialize, Serialize};

use crate::derive::SecretDeriver;
use crate::error::KemResult;
use crate::params::RingParams;

/// How freshly generated public keys carry the matrix `A`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatrixMode {
    /// `A` is sampled directly and transmitted in full
    #[default]
    Expanded,
    /// `A` is expanded from a 32-byte seed and only the seed is transmitted
    Seeded,
}

/// A configured KEM instance
///
/// # Example
///
/// ```
/// use mlwe_kem::{Kem, ParameterSet};
/// use rand::rngs::OsRng;
///
/// let kem = Kem::new(ParameterSet::Lattice768.params()).unwrap();
/// let (pk, sk) = kem.keygen(&mut OsRng).unwrap();
///
/// let (ciphertext, sender_secret) = kem.encapsulate(&pk, &mut OsRng).unwrap();
/// let receiver_secret = kem.decapsulate(&sk, &ciphertext).unwrap();
/// assert_eq!(sender_secret, receiver_secret);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kem {
    params: RingParams,
    deriver: SecretDeriver,
    matrix_mode: MatrixMode,
}

impl Kem {
    /// Create a KEM over validated parameters
    ///
    /// # Arguments
    ///
    /// * `params` - The ring and module parameters
    ///
    /// # Returns
    ///
    /// A KEM with the default deriver (SHA3-256, ciphertext bound) and
    /// expanded public keys, or a `ConfigurationError`
    pub fn new(params: RingParams) -> KemResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            deriver: SecretDeriver::default(),
            matrix_mode: MatrixMode::default(),
        })
    }

    /// Replace the secret derivation policy
    pub fn with_deriver(mut self, deriver: SecretDeriver) -> Self {
        self.deriver = deriver;
        self
    }

    /// Choose how new public keys carry `A`
    pub fn with_matrix_mode(mut self, matrix_mode: MatrixMode) -> Self {
        self.matrix_mode = matrix_mode;
        self
    }

    pub fn params(&self) -> &RingParams {
        &self.params
    }

    pub fn deriver(&self) -> &SecretDeriver {
        &self.deriver
    }

    pub fn matrix_mode(&self) -> MatrixMode {
        self.matrix_mode
    }
}
