//! Ring parameter sets
//!
//! This module defines the explicit `(n, q, k, eta)` configuration that every
//! ring, sampler and KEM operation receives, together with predefined sets.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{error_codes, KemError, KemResult};

/// Length in bytes of the public seed used to expand the matrix `A`
pub const SEED_BYTES: usize = 32;

/// Moduli at or above this bound are rejected so products fit in `u64`
pub const MAX_MODULUS: u32 = 1 << 31;

/// Largest module rank; matrix indices are absorbed as single bytes
pub const MAX_MODULE_RANK: usize = 255;

/// Parameters of the ring `Z_q[X]/(X^n+1)` and of the module built over it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RingParams {
    /// Ring degree (number of coefficients per polynomial)
    pub n: usize,

    /// Prime coefficient modulus
    pub q: u32,

    /// Module rank (polynomials per vector)
    pub k: usize,

    /// Noise bound for secret and error coefficients
    pub eta: u32,
}

impl RingParams {
    /// Create a parameter set without validating it
    pub const fn new(n: usize, q: u32, k: usize, eta: u32) -> Self {
        Self { n, q, k, eta }
    }

    /// Check the parameters before any key material is produced
    ///
    /// # Returns
    ///
    /// `Ok(())` if the parameters describe a usable ring, or a
    /// `ConfigurationError` naming the first offending parameter
    pub fn validate(&self) -> KemResult<()> {
        if !self.n.is_power_of_two() {
            return Err(KemError::configuration_error(
                "n",
                "a power of two",
                &self.n.to_string(),
                error_codes::INVALID_RING_DEGREE,
            ));
        }

        if self.k == 0 || self.k > MAX_MODULE_RANK {
            return Err(KemError::configuration_error(
                "k",
                &format!("between 1 and {}", MAX_MODULE_RANK),
                &self.k.to_string(),
                error_codes::INVALID_MODULE_RANK,
            ));
        }

        if self.eta == 0 {
            return Err(KemError::configuration_error(
                "eta",
                "at least 1",
                "0",
                error_codes::INVALID_NOISE_PARAMETER,
            ));
        }

        if self.q >= MAX_MODULUS || !is_prime(self.q) {
            return Err(KemError::configuration_error(
                "q",
                "a prime below 2^31",
                &self.q.to_string(),
                error_codes::INVALID_MODULUS,
            ));
        }

        let headroom = (self.eta as u64)
            .saturating_mul(self.k as u64)
            .saturating_mul(self.n as u64);
        if (self.q as u64) <= headroom {
            return Err(KemError::configuration_error(
                "q",
                &format!("greater than eta * k * n = {}", headroom),
                &self.q.to_string(),
                error_codes::INSUFFICIENT_NOISE_HEADROOM,
            ));
        }

        Ok(())
    }

    /// `floor(q/2)`, the coefficient a 1-bit is encoded to
    pub fn half_q(&self) -> u32 {
        self.q / 2
    }

    /// Largest per-coefficient noise magnitude the codec always corrects
    pub fn noise_tolerance(&self) -> u32 {
        self.half_q().saturating_sub(1) / 2
    }

    /// Minimal bit width able to hold every value in `[0, q)`
    pub fn coefficient_bits(&self) -> usize {
        (u32::BITS - self.q.saturating_sub(1).leading_zeros()) as usize
    }

    /// Encoded size of one polynomial in bytes
    pub fn poly_bytes(&self) -> usize {
        (self.n * self.coefficient_bits() + 7) / 8
    }

    /// Encoded size of a vector of `k` polynomials in bytes
    pub fn polyvec_bytes(&self) -> usize {
        self.k * self.poly_bytes()
    }

    /// Packed message size in bytes
    pub fn message_bytes(&self) -> usize {
        (self.n + 7) / 8
    }

    /// Public key size when the full matrix is transmitted
    pub fn expanded_public_key_bytes(&self) -> usize {
        1 + self.k * self.polyvec_bytes() + self.polyvec_bytes()
    }

    /// Public key size when only the matrix seed is transmitted
    pub fn seeded_public_key_bytes(&self) -> usize {
        1 + SEED_BYTES + self.polyvec_bytes()
    }

    /// Secret key size in bytes
    pub fn secret_key_bytes(&self) -> usize {
        self.polyvec_bytes()
    }

    /// Ciphertext size in bytes
    pub fn ciphertext_bytes(&self) -> usize {
        self.polyvec_bytes() + self.poly_bytes()
    }

    /// Parse and validate parameters from JSON
    pub fn from_json(json: &str) -> KemResult<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Serialize the parameters to JSON
    pub fn to_json(&self) -> KemResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for RingParams {
    fn default() -> Self {
        ParameterSet::Lattice768.params()
    }
}

impl fmt::Display for RingParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={} q={} k={} eta={}", self.n, self.q, self.k, self.eta)
    }
}

/// Predefined parameter sets
///
/// The `Lattice*` sets reuse the ring shapes of ML-KEM (n = 256, q = 3329)
/// with this crate's noise sampler and encodings. `Toy` is the tiny ring
/// used in worked examples; it fails to decode at a measurable rate.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ParameterSet {
    /// n = 4, q = 17, k = 2, eta = 1
    Toy,
    /// n = 256, q = 3329, k = 2, eta = 3
    Lattice512,
    /// n = 256, q = 3329, k = 3, eta = 2 (recommended)
    Lattice768,
    /// n = 256, q = 3329, k = 4, eta = 2
    Lattice1024,
}

impl ParameterSet {
    /// All predefined sets
    pub const ALL: [ParameterSet; 4] = [
        ParameterSet::Toy,
        ParameterSet::Lattice512,
        ParameterSet::Lattice768,
        ParameterSet::Lattice1024,
    ];

    /// Get the ring parameters for this set
    pub fn params(&self) -> RingParams {
        match self {
            ParameterSet::Toy => RingParams::new(4, 17, 2, 1),
            ParameterSet::Lattice512 => RingParams::new(256, 3329, 2, 3),
            ParameterSet::Lattice768 => RingParams::new(256, 3329, 3, 2),
            ParameterSet::Lattice1024 => RingParams::new(256, 3329, 4, 2),
        }
    }
}

impl fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterSet::Toy => write!(f, "Toy"),
            ParameterSet::Lattice512 => write!(f, "Lattice512"),
            ParameterSet::Lattice768 => write!(f, "Lattice768"),
            ParameterSet::Lattice1024 => write!(f, "Lattice1024"),
        }
    }
}

fn is_prime(q: u32) -> bool {
    if q < 2 {
        return false;
    }
    if q % 2 == 0 {
        return q == 2;
    }
    let q = q as u64;
    let mut d = 3u64;
    while d * d <= q {
        if q % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
