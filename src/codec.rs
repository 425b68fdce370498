//! Message encoding into ring elements
//!
//! A bit `b` is encoded to the coefficient `b * floor(q/2)`, the point of
//! maximal separation from zero. Decoding maps a coefficient to 1 iff its
//! circular distance to `floor(q/2)` is strictly smaller than its distance to
//! zero; ties decode to 0. Any per-coefficient noise with
//! `2 * |noise| < floor(q/2)` is removed exactly (see
//! [`RingParams::noise_tolerance`]).

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{error_codes, KemError, KemResult};
use crate::params::RingParams;
use crate::ring::Polynomial;

/// A message of exactly `n` bits
///
/// The message is the sole source of entropy for the shared secret and is
/// zeroed when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Message {
    /// One entry per coefficient, each 0 or 1
    bits: Vec<u8>,
}

impl Message {
    /// Create a message from one 0/1 entry per coefficient
    pub fn from_bits(params: &RingParams, bits: Vec<u8>) -> KemResult<Self> {
        params.validate()?;
        if bits.len() != params.n {
            return Err(KemError::dimension_mismatch("message_from_bits", params.n, bits.len()));
        }
        if let Some(&b) = bits.iter().find(|&&b| b > 1) {
            return Err(KemError::structural_error(
                "message_from_bits",
                "bits equal to 0 or 1",
                &b.to_string(),
                error_codes::INVALID_MESSAGE_BIT,
            ));
        }
        Ok(Self { bits })
    }

    /// Unpack a message from `ceil(n/8)` bytes, least significant bit first
    ///
    /// Padding bits past `n` in the final byte are ignored.
    pub fn from_bytes(params: &RingParams, bytes: &[u8]) -> KemResult<Self> {
        params.validate()?;
        if bytes.len() != params.message_bytes() {
            return Err(KemError::structural_error(
                "message_from_bytes",
                &format!("{} bytes", params.message_bytes()),
                &format!("{} bytes", bytes.len()),
                error_codes::INVALID_ENCODING_LENGTH,
            ));
        }
        let bits = (0..params.n)
            .map(|i| (bytes[i / 8] >> (i % 8)) & 1)
            .collect();
        Ok(Self { bits })
    }

    /// Pack the message into `ceil(n/8)` bytes, least significant bit first
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; (self.bits.len() + 7) / 8];
        for (i, &b) in self.bits.iter().enumerate() {
            out[i / 8] |= b << (i % 8);
        }
        out
    }

    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Message([REDACTED; {} bits])", self.bits.len())
    }
}

/// Map each bit to `b * floor(q/2)`
pub fn encode(params: &RingParams, message: &Message) -> KemResult<Polynomial> {
    params.validate()?;
    if message.len() != params.n {
        return Err(KemError::dimension_mismatch("encode", params.n, message.len()));
    }
    let half = params.half_q();
    Ok(Polynomial::from_reduced(
        message.bits.iter().map(|&b| b as u32 * half).collect(),
    ))
}

/// Recover bits from a noisy encoding
///
/// Only malformed input fails: a coefficient pushed past the threshold by
/// excessive noise silently decodes to the wrong bit.
pub fn decode(params: &RingParams, poly: &Polynomial) -> KemResult<Message> {
    params.validate()?;
    poly.check(params, "decode")?;
    let q = params.q;
    let half = params.half_q();
    let circular = |a: u32, b: u32| {
        let d = a.abs_diff(b);
        d.min(q - d)
    };
    Ok(Message {
        bits: poly
            .coeffs()
            .iter()
            .map(|&c| (circular(c, half) < circular(c, 0)) as u8)
            .collect(),
    })
}
