//! Fixed-width coefficient packing
//!
//! Each coefficient takes `coefficient_bits` bits, packed contiguously
//! least significant bit first. Unused bits in the final byte are zero;
//! decoding rejects anything else so every value has one encoding.

use crate::error::{error_codes, KemError, KemResult};
use crate::params::RingParams;
use crate::ring::{PolyVec, Polynomial};

/// Append the packed encoding of `poly` to `out`
pub fn pack_poly(params: &RingParams, poly: &Polynomial, out: &mut Vec<u8>) {
    let bits = params.coefficient_bits();
    let start = out.len();
    out.resize(start + params.poly_bytes(), 0);

    for (i, &c) in poly.coeffs().iter().enumerate() {
        let base = i * bits;
        for b in 0..bits {
            if (c >> b) & 1 == 1 {
                let pos = base + b;
                out[start + pos / 8] |= 1 << (pos % 8);
            }
        }
    }
}

/// Decode one polynomial from exactly `poly_bytes` bytes
pub fn unpack_poly(params: &RingParams, bytes: &[u8], operation: &str) -> KemResult<Polynomial> {
    params.validate()?;
    expect_len(bytes, params.poly_bytes(), operation)?;
    let bits = params.coefficient_bits();
    let bit = |pos: usize| ((bytes[pos / 8] >> (pos % 8)) & 1) as u32;

    let mut coeffs = Vec::with_capacity(params.n);
    for i in 0..params.n {
        let base = i * bits;
        let c = (0..bits).fold(0u32, |acc, b| acc | (bit(base + b) << b));
        if c >= params.q {
            return Err(KemError::structural_error(
                operation,
                &format!("coefficients below {}", params.q),
                &c.to_string(),
                error_codes::COEFFICIENT_OUT_OF_RANGE,
            ));
        }
        coeffs.push(c);
    }

    if (params.n * bits..bytes.len() * 8).any(|pos| bit(pos) != 0) {
        return Err(KemError::structural_error(
            operation,
            "zero padding bits",
            "non-zero padding",
            error_codes::NON_CANONICAL_ENCODING,
        ));
    }

    Ok(Polynomial::from_reduced(coeffs))
}

/// Append the packed encodings of all `k` polynomials
pub fn pack_polyvec(params: &RingParams, vec: &PolyVec, out: &mut Vec<u8>) {
    for poly in vec.iter() {
        pack_poly(params, poly, out);
    }
}

/// Decode `k` polynomials from exactly `polyvec_bytes` bytes
pub fn unpack_polyvec(params: &RingParams, bytes: &[u8], operation: &str) -> KemResult<PolyVec> {
    params.validate()?;
    expect_len(bytes, params.polyvec_bytes(), operation)?;
    let polys = bytes
        .chunks_exact(params.poly_bytes())
        .map(|chunk| unpack_poly(params, chunk, operation))
        .collect::<KemResult<Vec<_>>>()?;
    Ok(PolyVec::from_checked(polys))
}

pub(crate) fn expect_len(bytes: &[u8], expected: usize, operation: &str) -> KemResult<()> {
    if bytes.len() != expected {
        return Err(KemError::structural_error(
            operation,
            &format!("{} bytes", expected),
            &format!("{} bytes", bytes.len()),
            error_codes::INVALID_ENCODING_LENGTH,
        ));
    }
    Ok(())
}
