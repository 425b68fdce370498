//! Shared secret derivation
//!
//! Hashes the packed message bytes, optionally followed by the encoded
//! ciphertext, into a fixed-length shared secret.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::{Digest, Sha3_256, Sha3_512};

use crate::codec::Message;
use crate::secure_memory::SecureBytes;

/// Hash functions available for secret derivation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashFunction {
    /// SHA3-256 (32-byte secret)
    Sha3_256,
    /// SHA3-512 (64-byte secret)
    Sha3_512,
    /// SHA-256 (32-byte secret)
    Sha256,
}

impl HashFunction {
    /// Digest size in bytes
    pub fn output_size(&self) -> usize {
        match self {
            HashFunction::Sha3_256 | HashFunction::Sha256 => 32,
            HashFunction::Sha3_512 => 64,
        }
    }

    fn digest(&self, parts: &[&[u8]]) -> Vec<u8> {
        match self {
            HashFunction::Sha3_256 => digest_parts::<Sha3_256>(parts),
            HashFunction::Sha3_512 => digest_parts::<Sha3_512>(parts),
            HashFunction::Sha256 => digest_parts::<Sha256>(parts),
        }
    }
}

fn digest_parts<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().to_vec()
}

/// What the shared secret is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyDerivation {
    /// Hash of message and encoded ciphertext (Fujisaki-Okamoto style binding)
    CiphertextBound,
    /// Hash of the message alone; weaker, kept for compatibility
    MessageOnly,
}

/// Derives shared secrets with a fixed hash function and binding mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretDeriver {
    hash: HashFunction,
    mode: KeyDerivation,
}

impl SecretDeriver {
    pub fn new(hash: HashFunction, mode: KeyDerivation) -> Self {
        if mode == KeyDerivation::MessageOnly {
            log::warn!("shared secrets derived from the message only are not bound to the ciphertext");
        }
        Self { hash, mode }
    }

    pub fn hash_function(&self) -> HashFunction {
        self.hash
    }

    pub fn mode(&self) -> KeyDerivation {
        self.mode
    }

    /// Shared secret length in bytes
    pub fn output_size(&self) -> usize {
        self.hash.output_size()
    }

    /// Hash `message` and, when given, the encoded ciphertext
    ///
    /// Deterministic: identical input bytes always give the same secret.
    pub fn derive(&self, message: &Message, ciphertext: Option<&[u8]>) -> SharedSecret {
        let mut message_bytes = message.to_bytes();
        let digest = match ciphertext {
            Some(ct) => self.hash.digest(&[message_bytes.as_slice(), ct]),
            None => self.hash.digest(&[message_bytes.as_slice()]),
        };
        zeroize::Zeroize::zeroize(&mut message_bytes);
        SharedSecret(SecureBytes::from_vec(digest))
    }

    /// Derive according to the configured binding mode
    pub fn derive_bound(&self, message: &Message, ciphertext_bytes: &[u8]) -> SharedSecret {
        match self.mode {
            KeyDerivation::CiphertextBound => self.derive(message, Some(ciphertext_bytes)),
            KeyDerivation::MessageOnly => self.derive(message, None),
        }
    }
}

impl Default for SecretDeriver {
    fn default() -> Self {
        Self {
            hash: HashFunction::Sha3_256,
            mode: KeyDerivation::CiphertextBound,
        }
    }
}

/// The fixed-length secret both parties derive on success
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret(SecureBytes);

impl SharedSecret {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedSecret([REDACTED; {} bytes])", self.len())
    }
}
