//! Polynomial arithmetic in Z_q[X]/(X^n + 1)
//!
//! Coefficients are held canonically in `[0, q)`. Multiplication is the
//! negacyclic convolution: wrap-around terms are subtracted because
//! `X^n = -1` in this ring.

use std::fmt;

use zeroize::Zeroize;

use crate::error::{error_codes, KemError, KemResult};
use crate::params::RingParams;

/// Represents an element of Z_q[X]/(X^n + 1)
///
/// `Debug` prints only the degree bound: polynomials carry secret
/// coefficients as often as public ones.
#[derive(Clone, PartialEq, Eq, Hash, Zeroize)]
pub struct Polynomial {
    /// Coefficients, lowest degree first
    coeffs: Vec<u32>,
}

impl Polynomial {
    /// The all-zero polynomial of degree bound `n`
    pub fn zero(n: usize) -> Self {
        Self {
            coeffs: vec![0u32; n],
        }
    }

    /// Create a polynomial from canonical coefficients
    ///
    /// Fails unless `params` is valid and there are exactly `n`
    /// coefficients, all in `[0, q)`.
    pub fn from_coeffs(params: &RingParams, coeffs: Vec<u32>) -> KemResult<Self> {
        params.validate()?;
        let poly = Self { coeffs };
        poly.check(params, "polynomial_from_coeffs")?;
        Ok(poly)
    }

    /// Create a polynomial from signed coefficients, reducing each mod `q`
    pub fn from_signed(params: &RingParams, coeffs: &[i64]) -> KemResult<Self> {
        params.validate()?;
        if coeffs.len() != params.n {
            return Err(KemError::dimension_mismatch(
                "polynomial_from_signed",
                params.n,
                coeffs.len(),
            ));
        }
        let q = params.q as i64;
        Ok(Self {
            coeffs: coeffs.iter().map(|&c| c.rem_euclid(q) as u32).collect(),
        })
    }

    /// Wrap coefficients already known to be in `[0, q)`
    pub(crate) fn from_reduced(coeffs: Vec<u32>) -> Self {
        Self { coeffs }
    }

    /// Check length and coefficient range against the parameters
    pub fn check(&self, params: &RingParams, operation: &str) -> KemResult<()> {
        if self.coeffs.len() != params.n {
            return Err(KemError::dimension_mismatch(operation, params.n, self.coeffs.len()));
        }
        if let Some(&c) = self.coeffs.iter().find(|&&c| c >= params.q) {
            return Err(KemError::structural_error(
                operation,
                &format!("coefficients below {}", params.q),
                &c.to_string(),
                error_codes::COEFFICIENT_OUT_OF_RANGE,
            ));
        }
        Ok(())
    }

    /// Get the coefficients, lowest degree first
    pub fn coeffs(&self) -> &[u32] {
        &self.coeffs
    }

    /// Number of coefficients
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Whether every coefficient is zero
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0)
    }

    /// Coefficients as signed representatives in `(-q/2, q/2]`
    pub fn centered(&self, q: u32) -> Vec<i64> {
        self.coeffs
            .iter()
            .map(|&c| {
                let c = c % q.max(1);
                if c > q / 2 {
                    c as i64 - q as i64
                } else {
                    c as i64
                }
            })
            .collect()
    }

    /// Largest centered coefficient magnitude
    pub fn infinity_norm(&self, q: u32) -> u32 {
        self.centered(q)
            .into_iter()
            .map(|c| c.unsigned_abs() as u32)
            .max()
            .unwrap_or(0)
    }

    /// Coefficient-wise sum mod `q`
    pub fn add(&self, other: &Self, q: u32) -> KemResult<Self> {
        let q = self.operands(other, q, "polynomial_add")?;
        Ok(Self {
            coeffs: self
                .coeffs
                .iter()
                .zip(&other.coeffs)
                .map(|(&a, &b)| ((a as u64 + b as u64) % q) as u32)
                .collect(),
        })
    }

    /// Coefficient-wise difference mod `q`
    pub fn sub(&self, other: &Self, q: u32) -> KemResult<Self> {
        let q = self.operands(other, q, "polynomial_sub")?;
        Ok(Self {
            coeffs: self
                .coeffs
                .iter()
                .zip(&other.coeffs)
                .map(|(&a, &b)| ((a as u64 % q + q - b as u64 % q) % q) as u32)
                .collect(),
        })
    }

    /// Multiply two polynomials modulo X^n + 1 and q
    pub fn mul(&self, other: &Self, q: u32) -> KemResult<Self> {
        let q = self.operands(other, q, "polynomial_mul")?;
        let n = self.coeffs.len();
        let mut acc = vec![0u64; n];

        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == 0 {
                continue;
            }
            for (j, &b) in other.coeffs.iter().enumerate() {
                let prod = (a as u64 * b as u64) % q;
                let pos = i + j;
                if pos < n {
                    acc[pos] = (acc[pos] + prod) % q;
                } else {
                    // X^n = -1
                    acc[pos - n] = (acc[pos - n] + q - prod) % q;
                }
            }
        }

        Ok(Self {
            coeffs: acc.into_iter().map(|c| c as u32).collect(),
        })
    }

    /// Both operands must have the same length and the modulus must be non-zero
    fn operands(&self, other: &Self, q: u32, operation: &str) -> KemResult<u64> {
        if self.coeffs.len() != other.coeffs.len() {
            return Err(KemError::dimension_mismatch(
                operation,
                self.coeffs.len(),
                other.coeffs.len(),
            ));
        }
        if q == 0 {
            return Err(KemError::configuration_error(
                "q",
                "a non-zero modulus",
                "0",
                error_codes::INVALID_MODULUS,
            ));
        }
        Ok(q as u64)
    }
}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polynomial([REDACTED; {} coefficients])", self.coeffs.len())
    }
}
