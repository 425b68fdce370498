/*!
 * Key and ciphertext records
 *
 * Public keys, secret keys and ciphertexts are plain value records over the
 * ring types. Their byte encodings carry no parameter header: the caller
 * decodes with the same `RingParams` the record was produced under.
 */

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encoding::{expect_len, pack_poly, pack_polyvec, unpack_poly, unpack_polyvec};
use crate::error::{error_codes, KemError, KemResult};
use crate::params::{RingParams, SEED_BYTES};
use crate::ring::{Matrix, PolyVec, Polynomial};
use crate::sampler::expand_matrix;

/// How a public key carries its matrix `A`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KeyFormat {
    /// Every entry of `A` is transmitted
    Expanded = 0x00,
    /// Only the 32-byte seed `A` is expanded from is transmitted
    Seeded = 0x01,
}

impl KeyFormat {
    fn from_tag(tag: u8) -> KemResult<Self> {
        match tag {
            0x00 => Ok(KeyFormat::Expanded),
            0x01 => Ok(KeyFormat::Seeded),
            other => Err(KemError::structural_error(
                "public_key_from_bytes",
                "format tag 0x00 or 0x01",
                &format!("0x{:02x}", other),
                error_codes::UNKNOWN_KEY_FORMAT,
            )),
        }
    }
}

/// Public key `(A, t)` with `t = A*s + e`
///
/// # Example
///
/// ```
/// use mlwe_kem::{Kem, ParameterSet, PublicKey};
///
/// let params = ParameterSet::Lattice512.params();
/// let kem = Kem::new(params).unwrap();
/// let (pk, _sk) = kem.keygen_from_seed([7u8; 32]).unwrap();
///
/// let bytes = pk.to_bytes(&params);
/// assert_eq!(PublicKey::from_bytes(&params, &bytes).unwrap(), pk);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    matrix: Matrix,
    t: PolyVec,
    seed: Option<[u8; SEED_BYTES]>,
}

impl PublicKey {
    /// Public key carrying an explicit matrix
    pub fn new(params: &RingParams, matrix: Matrix, t: PolyVec) -> KemResult<Self> {
        params.validate()?;
        let pk = Self { matrix, t, seed: None };
        pk.check(params, "public_key_new")?;
        Ok(pk)
    }

    /// Public key whose matrix is expanded from `seed`
    pub fn from_seed(params: &RingParams, seed: [u8; SEED_BYTES], t: PolyVec) -> KemResult<Self> {
        params.validate()?;
        t.check(params, "public_key_from_seed")?;
        Ok(Self {
            matrix: expand_matrix(params, &seed)?,
            t,
            seed: Some(seed),
        })
    }

    pub(crate) fn from_checked(matrix: Matrix, t: PolyVec, seed: Option<[u8; SEED_BYTES]>) -> Self {
        Self { matrix, t, seed }
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn t(&self) -> &PolyVec {
        &self.t
    }

    /// The matrix seed, if the key is in seeded form
    pub fn seed(&self) -> Option<&[u8; SEED_BYTES]> {
        self.seed.as_ref()
    }

    pub fn format(&self) -> KeyFormat {
        match self.seed {
            Some(_) => KeyFormat::Seeded,
            None => KeyFormat::Expanded,
        }
    }

    /// Check both components against `params`
    pub fn check(&self, params: &RingParams, operation: &str) -> KemResult<()> {
        self.matrix.check(params, operation)?;
        self.t.check(params, operation)
    }

    /// Encode as a format tag followed by `A` (or its seed) and `t`
    pub fn to_bytes(&self, params: &RingParams) -> Vec<u8> {
        let size = match self.seed {
            Some(_) => params.seeded_public_key_bytes(),
            None => params.expanded_public_key_bytes(),
        };
        let mut out = Vec::with_capacity(size);
        out.push(self.format() as u8);
        match &self.seed {
            Some(seed) => out.extend_from_slice(seed),
            None => {
                for entry in self.matrix.rows().iter().flatten() {
                    pack_poly(params, entry, &mut out);
                }
            }
        }
        pack_polyvec(params, &self.t, &mut out);
        out
    }

    /// Decode a public key produced by [`PublicKey::to_bytes`]
    pub fn from_bytes(params: &RingParams, bytes: &[u8]) -> KemResult<Self> {
        const OP: &str = "public_key_from_bytes";
        params.validate()?;
        let (&tag, body) = bytes.split_first().ok_or_else(|| {
            KemError::structural_error(OP, "a format tag", "0 bytes", error_codes::INVALID_ENCODING_LENGTH)
        })?;

        match KeyFormat::from_tag(tag)? {
            KeyFormat::Expanded => {
                expect_len(bytes, params.expanded_public_key_bytes(), OP)?;
                let (a_bytes, t_bytes) = body.split_at(params.k * params.polyvec_bytes());
                let rows = a_bytes
                    .chunks_exact(params.polyvec_bytes())
                    .map(|row| Ok(unpack_polyvec(params, row, OP)?.polys().to_vec()))
                    .collect::<KemResult<Vec<_>>>()?;
                Ok(Self {
                    matrix: Matrix::from_checked(rows),
                    t: unpack_polyvec(params, t_bytes, OP)?,
                    seed: None,
                })
            }
            KeyFormat::Seeded => {
                expect_len(bytes, params.seeded_public_key_bytes(), OP)?;
                let (seed_bytes, t_bytes) = body.split_at(SEED_BYTES);
                let mut seed = [0u8; SEED_BYTES];
                seed.copy_from_slice(seed_bytes);
                let t = unpack_polyvec(params, t_bytes, OP)?;
                Self::from_seed(params, seed, t)
            }
        }
    }

    /// Drop the seed so the key encodes its full matrix
    pub fn into_expanded(mut self) -> Self {
        self.seed = None;
        self
    }
}

/// Secret key `s`, zeroed on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    s: PolyVec,
}

impl SecretKey {
    pub fn new(params: &RingParams, s: PolyVec) -> KemResult<Self> {
        params.validate()?;
        s.check(params, "secret_key_new")?;
        Ok(Self { s })
    }

    pub fn s(&self) -> &PolyVec {
        &self.s
    }

    pub fn check(&self, params: &RingParams, operation: &str) -> KemResult<()> {
        self.s.check(params, operation)
    }

    pub fn to_bytes(&self, params: &RingParams) -> Vec<u8> {
        let mut out = Vec::with_capacity(params.secret_key_bytes());
        pack_polyvec(params, &self.s, &mut out);
        out
    }

    pub fn from_bytes(params: &RingParams, bytes: &[u8]) -> KemResult<Self> {
        params.validate()?;
        Ok(Self {
            s: unpack_polyvec(params, bytes, "secret_key_from_bytes")?,
        })
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey([REDACTED; k={}])", self.s.len())
    }
}

/// Ciphertext `(u, v)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext {
    u: PolyVec,
    v: Polynomial,
}

impl Ciphertext {
    pub fn new(params: &RingParams, u: PolyVec, v: Polynomial) -> KemResult<Self> {
        params.validate()?;
        let ct = Self { u, v };
        ct.check(params, "ciphertext_new")?;
        Ok(ct)
    }

    pub(crate) fn from_checked(u: PolyVec, v: Polynomial) -> Self {
        Self { u, v }
    }

    pub fn u(&self) -> &PolyVec {
        &self.u
    }

    pub fn v(&self) -> &Polynomial {
        &self.v
    }

    pub fn check(&self, params: &RingParams, operation: &str) -> KemResult<()> {
        self.u.check(params, operation)?;
        self.v.check(params, operation)
    }

    /// `u` followed by `v`
    pub fn to_bytes(&self, params: &RingParams) -> Vec<u8> {
        let mut out = Vec::with_capacity(params.ciphertext_bytes());
        pack_polyvec(params, &self.u, &mut out);
        pack_poly(params, &self.v, &mut out);
        out
    }

    pub fn from_bytes(params: &RingParams, bytes: &[u8]) -> KemResult<Self> {
        const OP: &str = "ciphertext_from_bytes";
        params.validate()?;
        expect_len(bytes, params.ciphertext_bytes(), OP)?;
        let (u_bytes, v_bytes) = bytes.split_at(params.polyvec_bytes());
        Ok(Self {
            u: unpack_polyvec(params, u_bytes, OP)?,
            v: unpack_poly(params, v_bytes, OP)?,
        })
    }
}
