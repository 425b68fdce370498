//! Ring arithmetic over Z_q[X]/(X^n + 1)
//!
//! Polynomials, vectors of `k` polynomials and `k x k` matrices, with the
//! modulus passed explicitly to every operation.

mod polynomial;
mod polyvec;

pub use polynomial::Polynomial;
pub use polyvec::{Matrix, PolyVec};
