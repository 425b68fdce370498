//! Module-level arithmetic: vectors of `k` polynomials and `k x k` matrices.
//!
//! Every output row of a Matrix-Vector product depends only on that row's
//! inputs, so rows are computed independently (in parallel with the
//! `parallel` feature) and collected at the end.

use zeroize::Zeroize;

use crate::error::{KemError, KemResult};
use crate::params::RingParams;
use crate::ring::Polynomial;

/// A vector of `k` polynomials
#[derive(Clone, Debug, PartialEq, Eq, Hash, Zeroize)]
pub struct PolyVec {
    polys: Vec<Polynomial>,
}

impl PolyVec {
    /// The zero vector for the given parameters
    pub fn zero(params: &RingParams) -> Self {
        Self {
            polys: vec![Polynomial::zero(params.n); params.k],
        }
    }

    /// Build a vector, checking its length and every entry against `params`
    pub fn from_polys(params: &RingParams, polys: Vec<Polynomial>) -> KemResult<Self> {
        params.validate()?;
        let vec = Self { polys };
        vec.check(params, "polyvec_from_polys")?;
        Ok(vec)
    }

    /// Build a vector from signed coefficient rows, reducing mod `q`
    pub fn from_signed(params: &RingParams, rows: &[&[i64]]) -> KemResult<Self> {
        let polys = rows
            .iter()
            .map(|row| Polynomial::from_signed(params, row))
            .collect::<KemResult<Vec<_>>>()?;
        Self::from_polys(params, polys)
    }

    pub(crate) fn from_checked(polys: Vec<Polynomial>) -> Self {
        Self { polys }
    }

    /// Check that there are exactly `k` well-formed polynomials
    pub fn check(&self, params: &RingParams, operation: &str) -> KemResult<()> {
        if self.polys.len() != params.k {
            return Err(KemError::dimension_mismatch(operation, params.k, self.polys.len()));
        }
        self.polys
            .iter()
            .try_for_each(|p| p.check(params, operation))
    }

    pub fn len(&self) -> usize {
        self.polys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polys.is_empty()
    }

    pub fn polys(&self) -> &[Polynomial] {
        &self.polys
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Polynomial> {
        self.polys.iter()
    }

    /// Entry-wise sum mod `q`
    pub fn add(&self, other: &Self, q: u32) -> KemResult<Self> {
        same_rank("polyvec_add", self.polys.len(), other.polys.len())?;
        let polys = self
            .polys
            .iter()
            .zip(&other.polys)
            .map(|(a, b)| a.add(b, q))
            .collect::<KemResult<Vec<_>>>()?;
        Ok(Self { polys })
    }

    /// Inner product `sum_i a[i] * b[i]`
    pub fn dot(&self, other: &Self, q: u32) -> KemResult<Polynomial> {
        same_rank("polyvec_dot", self.polys.len(), other.polys.len())?;
        let n = self.polys.first().map_or(0, Polynomial::len);
        self.polys
            .iter()
            .zip(&other.polys)
            .try_fold(Polynomial::zero(n), |acc, (a, b)| acc.add(&a.mul(b, q)?, q))
    }

    /// Largest centered coefficient magnitude across all entries
    pub fn infinity_norm(&self, q: u32) -> u32 {
        self.polys
            .iter()
            .map(|p| p.infinity_norm(q))
            .max()
            .unwrap_or(0)
    }
}

/// A `k x k` matrix of polynomials, row-major
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: Vec<Vec<Polynomial>>,
}

impl Matrix {
    /// Build a matrix, checking its shape and every entry against `params`
    pub fn from_rows(params: &RingParams, rows: Vec<Vec<Polynomial>>) -> KemResult<Self> {
        params.validate()?;
        let matrix = Self { rows };
        matrix.check(params, "matrix_from_rows")?;
        Ok(matrix)
    }

    pub(crate) fn from_checked(rows: Vec<Vec<Polynomial>>) -> Self {
        Self { rows }
    }

    /// Check that the matrix is `k x k` with well-formed entries
    pub fn check(&self, params: &RingParams, operation: &str) -> KemResult<()> {
        if self.rows.len() != params.k {
            return Err(KemError::dimension_mismatch(operation, params.k, self.rows.len()));
        }
        for row in &self.rows {
            if row.len() != params.k {
                return Err(KemError::dimension_mismatch(operation, params.k, row.len()));
            }
            row.iter().try_for_each(|p| p.check(params, operation))?;
        }
        Ok(())
    }

    /// Matrix dimension `k`
    pub fn dim(&self) -> usize {
        self.rows.len()
    }

    /// Entry at row `i`, column `j`
    pub fn get(&self, i: usize, j: usize) -> &Polynomial {
        &self.rows[i][j]
    }

    pub fn rows(&self) -> &[Vec<Polynomial>] {
        &self.rows
    }

    /// `A * v`: row `i` is `sum_j A[i][j] * v[j]`
    pub fn mul_vec(&self, v: &PolyVec, q: u32) -> KemResult<PolyVec> {
        self.square_with(v, "matrix_mul_vec")?;
        let n = v.polys.first().map_or(0, Polynomial::len);
        let rows = map_rows(self.rows.len(), |i| {
            (0..v.len()).try_fold(Polynomial::zero(n), |acc, j| {
                acc.add(&self.rows[i][j].mul(&v.polys[j], q)?, q)
            })
        })?;
        Ok(PolyVec::from_checked(rows))
    }

    /// `A^T * v`: row `i` is `sum_j A[j][i] * v[j]`
    pub fn transpose_mul_vec(&self, v: &PolyVec, q: u32) -> KemResult<PolyVec> {
        self.square_with(v, "matrix_transpose_mul_vec")?;
        let n = v.polys.first().map_or(0, Polynomial::len);
        let rows = map_rows(self.rows.len(), |i| {
            (0..v.len()).try_fold(Polynomial::zero(n), |acc, j| {
                acc.add(&self.rows[j][i].mul(&v.polys[j], q)?, q)
            })
        })?;
        Ok(PolyVec::from_checked(rows))
    }

    /// The matrix must be square with the same rank as `v`
    fn square_with(&self, v: &PolyVec, operation: &str) -> KemResult<()> {
        same_rank(operation, self.rows.len(), v.len())?;
        self.rows
            .iter()
            .try_for_each(|row| same_rank(operation, v.len(), row.len()))
    }
}

fn same_rank(operation: &str, expected: usize, actual: usize) -> KemResult<()> {
    if expected != actual {
        return Err(KemError::dimension_mismatch(operation, expected, actual));
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn map_rows<F>(k: usize, row: F) -> KemResult<Vec<Polynomial>>
where
    F: Fn(usize) -> KemResult<Polynomial> + Sync + Send,
{
    use rayon::prelude::*;
    (0..k).into_par_iter().map(row).collect()
}

#[cfg(not(feature = "parallel"))]
fn map_rows<F>(k: usize, row: F) -> KemResult<Vec<Polynomial>>
where
    F: Fn(usize) -> KemResult<Polynomial>,
{
    (0..k).map(row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::error_codes;
    use crate::params::ParameterSet;

    fn toy() -> RingParams {
        ParameterSet::Toy.params()
    }

    fn sample_matrix(params: &RingParams) -> Matrix {
        let rows: Vec<Vec<Polynomial>> = vec![
            vec![
                Polynomial::from_coeffs(params, vec![1, 0, 0, 0]).unwrap(),
                Polynomial::from_coeffs(params, vec![2, 1, 3, 0]).unwrap(),
            ],
            vec![
                Polynomial::from_coeffs(params, vec![0, 1, 2, 0]).unwrap(),
                Polynomial::from_coeffs(params, vec![1, 1, 1, 1]).unwrap(),
            ],
        ];
        Matrix::from_rows(params, rows).unwrap()
    }

    #[test]
    fn test_polyvec_dimension_checks() {
        let params = toy();
        let one = Polynomial::from_coeffs(&params, vec![1, 0, 0, 0]).unwrap();
        let err = PolyVec::from_polys(&params, vec![one.clone()]).unwrap_err();
        assert_eq!(err.error_type(), "StructuralInputError");
        assert!(PolyVec::from_polys(&params, vec![one.clone(), one]).is_ok());
    }

    #[test]
    fn test_matrix_rejects_ragged_rows() {
        let params = toy();
        let z = Polynomial::zero(params.n);
        let rows = vec![vec![z.clone(), z.clone()], vec![z]];
        assert!(Matrix::from_rows(&params, rows).is_err());
    }

    #[test]
    fn test_mul_vec_matches_rowwise_dot() {
        let params = toy();
        let a = sample_matrix(&params);
        let s = PolyVec::from_signed(&params, &[&[1, -1, 0, 1], &[0, 1, -1, 0]]).unwrap();

        let product = a.mul_vec(&s, params.q).unwrap();
        for i in 0..params.k {
            let row = PolyVec::from_polys(&params, a.rows()[i].clone()).unwrap();
            assert_eq!(product.polys()[i], row.dot(&s, params.q).unwrap());
        }
    }

    #[test]
    fn test_transpose_mul_vec() {
        let params = toy();
        let a = sample_matrix(&params);
        let r = PolyVec::from_signed(&params, &[&[1, -1, 0, 0], &[0, 1, -1, 0]]).unwrap();

        let transposed_rows = (0..params.k)
            .map(|i| (0..params.k).map(|j| a.get(j, i).clone()).collect())
            .collect();
        let at = Matrix::from_rows(&params, transposed_rows).unwrap();
        assert_eq!(
            a.transpose_mul_vec(&r, params.q).unwrap(),
            at.mul_vec(&r, params.q).unwrap()
        );
    }

    #[test]
    fn test_dot_is_symmetric() {
        let params = toy();
        let a = PolyVec::from_signed(&params, &[&[3, 0, 5, 1], &[2, 2, 0, 9]]).unwrap();
        let b = PolyVec::from_signed(&params, &[&[1, -1, 0, 1], &[0, 1, -1, 0]]).unwrap();
        assert_eq!(a.dot(&b, params.q).unwrap(), b.dot(&a, params.q).unwrap());
    }

    #[test]
    fn test_zero_vector_is_additive_identity() {
        let params = toy();
        let a = PolyVec::from_signed(&params, &[&[3, 0, 5, 1], &[2, 2, 0, 9]]).unwrap();
        assert_eq!(a.add(&PolyVec::zero(&params), params.q).unwrap(), a);
    }

    #[test]
    fn test_mismatched_ranks_are_rejected() {
        let params = toy();
        let a = sample_matrix(&params);
        let two = PolyVec::from_signed(&params, &[&[1, 0, 0, 0], &[0, 1, 0, 0]]).unwrap();
        let one = PolyVec::from_checked(vec![two.polys()[0].clone()]);

        let results = [
            two.add(&one, params.q).map(|_| ()),
            two.dot(&one, params.q).map(|_| ()),
            a.mul_vec(&one, params.q).map(|_| ()),
            a.transpose_mul_vec(&one, params.q).map(|_| ()),
        ];
        for result in results {
            assert_eq!(result.unwrap_err().error_code(), error_codes::DIMENSION_MISMATCH);
        }
    }

    #[test]
    fn test_short_entries_are_rejected() {
        let params = toy();
        let a = sample_matrix(&params);
        let short = Polynomial::from_reduced(vec![1, 2]);
        let v = PolyVec::from_checked(vec![short.clone(), short]);
        let err = a.mul_vec(&v, params.q).unwrap_err();
        assert_eq!(err.error_code(), error_codes::DIMENSION_MISMATCH);
    }

    #[test]
    fn test_constructors_validate_params() {
        let params = RingParams::new(4, 0, 2, 1);
        let err = PolyVec::from_polys(&params, vec![]).unwrap_err();
        assert_eq!(err.error_type(), "ConfigurationError");
        let err = Matrix::from_rows(&params, vec![]).unwrap_err();
        assert_eq!(err.error_type(), "ConfigurationError");
    }
}
