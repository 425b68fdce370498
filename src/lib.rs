/*!
 * Module-LWE Key Encapsulation
 *
 * This crate implements a key-encapsulation mechanism over the polynomial
 * ring `Z_q[X]/(X^n+1)`, in the style of ML-KEM/Kyber:
 *
 * - Negacyclic polynomial arithmetic lifted to vectors and matrices
 * - Uniform and centered binomial sampling from an injected secure RNG
 * - A message codec with an exact, documented noise tolerance
 * - Key generation, encapsulation and decapsulation with shared secrets
 *   bound to the ciphertext by default
 *
 * Every operation receives its ring parameters explicitly, so several
 * parameter sets can be used side by side. The arithmetic is not hardened
 * against timing side channels.
 */

/// Ring parameters and predefined parameter sets
pub mod params;

/// Polynomial, vector and matrix arithmetic
pub mod ring;

/// Uniform and noise sampling, public matrix expansion
pub mod sampler;

/// Message encoding into ring elements
pub mod codec;

/// Shared secret derivation
pub mod derive;

/// Fixed-width coefficient packing
pub mod encoding;

/// Public key, secret key and ciphertext records
pub mod types;

/// Key generation, encapsulation and decapsulation
pub mod kem;

/// Common error types
pub mod error;

/// Secure memory handling utilities
pub mod secure_memory;

pub use codec::Message;
pub use derive::{HashFunction, KeyDerivation, SecretDeriver, SharedSecret};
pub use error::{KemError, KemResult};
pub use kem::{Kem, MatrixMode};
pub use params::{ParameterSet, RingParams};
pub use ring::{Matrix, PolyVec, Polynomial};
pub use types::{Ciphertext, KeyFormat, PublicKey, SecretKey};

/// The commonly used types in one import
pub mod prelude {
    pub use crate::codec::Message;
    pub use crate::derive::{HashFunction, KeyDerivation, SecretDeriver, SharedSecret};
    pub use crate::error::{KemError, KemResult};
    pub use crate::kem::{Kem, MatrixMode};
    pub use crate::params::{ParameterSet, RingParams};
    pub use crate::types::{Ciphertext, PublicKey, SecretKey};
}
