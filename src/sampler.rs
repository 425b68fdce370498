//! Sampling of ring elements
//!
//! Two distributions over polynomials: uniform coefficients in `[0, q)` for
//! the public matrix, and centered binomial noise in `[-eta, eta]` for
//! secrets and errors. Randomness comes from an injected
//! `RngCore + CryptoRng`; a failing source is reported as
//! `RandomnessUnavailable` and never replaced.

use rand::{CryptoRng, RngCore};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake128;

use crate::codec::Message;
use crate::error::KemResult;
use crate::params::{RingParams, SEED_BYTES};
use crate::ring::{Matrix, PolyVec, Polynomial};

/// Draws ring elements from an injected randomness source
pub struct Sampler<'a, R: RngCore + CryptoRng> {
    params: &'a RingParams,
    rng: &'a mut R,
}

impl<'a, R: RngCore + CryptoRng> Sampler<'a, R> {
    /// Bind a randomness source to a validated parameter set
    pub fn new(params: &'a RingParams, rng: &'a mut R) -> KemResult<Self> {
        params.validate()?;
        Ok(Self { params, rng })
    }

    fn fill(&mut self, buf: &mut [u8]) -> KemResult<()> {
        self.rng.try_fill_bytes(buf)?;
        Ok(())
    }

    /// Polynomial with coefficients uniform in `[0, q)`
    pub fn uniform(&mut self) -> KemResult<Polynomial> {
        let params = *self.params;
        reject_uniform(&params, |buf| self.fill(buf))
    }

    /// Polynomial with centered binomial coefficients in `[-eta, eta]`, reduced mod `q`
    pub fn noise(&mut self, eta: u32) -> KemResult<Polynomial> {
        let n = self.params.n;
        let q = self.params.q as i64;
        let eta = eta as usize;
        let mut buf = vec![0u8; (2 * eta * n + 7) / 8];
        self.fill(&mut buf)?;

        let bit = |idx: usize| ((buf[idx / 8] >> (idx % 8)) & 1) as i64;
        let coeffs = (0..n)
            .map(|i| {
                let base = 2 * eta * i;
                let a: i64 = (0..eta).map(|b| bit(base + b)).sum();
                let b: i64 = (0..eta).map(|b| bit(base + eta + b)).sum();
                (a - b).rem_euclid(q) as u32
            })
            .collect();
        Ok(Polynomial::from_reduced(coeffs))
    }

    /// `k x k` matrix of uniform polynomials
    pub fn uniform_matrix(&mut self) -> KemResult<Matrix> {
        let k = self.params.k;
        let rows = (0..k)
            .map(|_| (0..k).map(|_| self.uniform()).collect::<KemResult<Vec<_>>>())
            .collect::<KemResult<Vec<_>>>()?;
        Ok(Matrix::from_checked(rows))
    }

    /// Vector of `k` noise polynomials at the configured `eta`
    pub fn noise_vec(&mut self) -> KemResult<PolyVec> {
        let eta = self.params.eta;
        let polys = (0..self.params.k)
            .map(|_| self.noise(eta))
            .collect::<KemResult<Vec<_>>>()?;
        Ok(PolyVec::from_checked(polys))
    }

    /// Uniformly random `n`-bit message
    pub fn message(&mut self) -> KemResult<Message> {
        let mut buf = vec![0u8; self.params.message_bytes()];
        self.fill(&mut buf)?;
        let message = Message::from_bytes(self.params, &buf);
        zeroize::Zeroize::zeroize(&mut buf);
        message
    }

    /// Fresh public seed for matrix expansion
    pub fn seed(&mut self) -> KemResult<[u8; SEED_BYTES]> {
        let mut seed = [0u8; SEED_BYTES];
        self.fill(&mut seed)?;
        Ok(seed)
    }
}

/// Deterministically expand a public seed into the matrix `A`
///
/// Entry `(i, j)` is rejection-sampled from SHAKE-128(`seed || j || i`),
/// so both parties derive the same matrix from the seed alone. Indices are
/// absorbed as single bytes, which `validate` guarantees by capping `k`.
pub fn expand_matrix(params: &RingParams, seed: &[u8; SEED_BYTES]) -> KemResult<Matrix> {
    params.validate()?;
    let rows = (0..params.k)
        .map(|i| {
            (0..params.k)
                .map(|j| {
                    let mut xof = Shake128::default();
                    xof.update(seed);
                    xof.update(&[j as u8, i as u8]);
                    let mut reader = xof.finalize_xof();
                    expand_uniform(params, &mut reader)
                })
                .collect()
        })
        .collect();
    Ok(Matrix::from_checked(rows))
}

fn expand_uniform(params: &RingParams, reader: &mut impl XofReader) -> Polynomial {
    let mut coeffs = Vec::with_capacity(params.n);
    let width = (params.coefficient_bits() + 7) / 8;
    let mask = coefficient_mask(params);
    let mut chunk = vec![0u8; width];
    while coeffs.len() < params.n {
        reader.read(&mut chunk);
        if let Some(c) = accept(&chunk, mask, params.q) {
            coeffs.push(c);
        }
    }
    Polynomial::from_reduced(coeffs)
}

fn reject_uniform<F>(params: &RingParams, mut fill: F) -> KemResult<Polynomial>
where
    F: FnMut(&mut [u8]) -> KemResult<()>,
{
    let width = (params.coefficient_bits() + 7) / 8;
    let mask = coefficient_mask(params);
    let mut coeffs = Vec::with_capacity(params.n);
    let mut block = vec![0u8; width * params.n];

    while coeffs.len() < params.n {
        fill(&mut block)?;
        for chunk in block.chunks_exact(width) {
            if coeffs.len() == params.n {
                break;
            }
            if let Some(c) = accept(chunk, mask, params.q) {
                coeffs.push(c);
            }
        }
    }
    Ok(Polynomial::from_reduced(coeffs))
}

fn coefficient_mask(params: &RingParams) -> u32 {
    ((1u64 << params.coefficient_bits()) - 1) as u32
}

/// Little-endian candidate, masked to the coefficient width; rejected if `>= q`
fn accept(chunk: &[u8], mask: u32, q: u32) -> Option<u32> {
    let value = chunk
        .iter()
        .rev()
        .fold(0u32, |acc, &b| (acc << 8) | b as u32)
        & mask;
    (value < q).then_some(value)
}
