//! Cyclic convolution and circulant products through the NTT.

use crate::dft::DFT;
use crate::dft::ntt::{self, Ntt};
use crate::error::FieldError;
use crate::field::PrimeField;
use crate::modulus::VectorOperations;

/// result <- a ⊛ b, the cyclic convolution of length n = a.len().
///
/// `root` must be a primitive n-th root of unity. `a` and `b` are left untouched.
pub fn ntt_convolution(field: &PrimeField, a: &[u32], b: &[u32], result: &mut [u32], root: u32) -> Result<(), FieldError> {
    assert_eq!(a.len(), b.len());
    assert_eq!(a.len(), result.len());
    let mut b_hat: Vec<u32> = Vec::new();
    b_hat.try_reserve_exact(b.len())?;
    b_hat.extend_from_slice(b);
    result.copy_from_slice(a);
    ntt::forward(field, result, root)?;
    ntt::forward(field, &mut b_hat, root)?;
    field.va_mul_vb_into_vb(&b_hat, result);
    ntt::inverse(field, result, root)
}

/// result <- C v, where C is the circulant matrix with first column `column`,
/// i.e. C[i][j] = column[(i - j) mod n].
pub fn circulant_vector_mul(
    field: &PrimeField,
    column: &[u32],
    v: &[u32],
    result: &mut [u32],
    root: u32,
) -> Result<(), FieldError> {
    ntt_convolution(field, column, v, result, root)
}

/// Circulant matrix stored as the forward transform of its first column.
pub struct CirculantMatrix {
    ntt: Ntt,
    column_hat: Vec<u32>,
}

impl CirculantMatrix {
    pub fn new(field: PrimeField, column: &[u32], root: u32) -> Result<Self, FieldError> {
        let ntt: Ntt = Ntt::new(field, column.len(), root);
        let mut column_hat: Vec<u32> = Vec::new();
        column_hat.try_reserve_exact(column.len())?;
        column_hat.extend_from_slice(column);
        ntt.forward_inplace(&mut column_hat)?;
        Ok(Self { ntt, column_hat })
    }

    /// As [`Self::new`], after checking the root and that `column` is reduced.
    pub fn try_new(field: PrimeField, column: &[u32], root: u32) -> Result<Self, FieldError> {
        let ntt: Ntt = Ntt::try_new(field, column.len(), root)?;
        crate::validate::check_reduced(column, field.q())?;
        Self::new(*ntt.field(), column, root)
    }

    pub fn n(&self) -> usize {
        self.ntt.n()
    }

    /// result <- C v.
    pub fn mul_vector(&self, v: &[u32], result: &mut [u32]) -> Result<(), FieldError> {
        result.copy_from_slice(v);
        self.ntt.forward_inplace(result)?;
        self.ntt.field().va_mul_vb_into_vb(&self.column_hat, result);
        self.ntt.backward_inplace(result)
    }

    /// result <- C M for a row-major n x cols matrix M.
    pub fn mul_matrix(&self, m: &[u32], cols: usize, result: &mut [u32]) -> Result<(), FieldError> {
        let n: usize = self.n();
        assert_eq!(m.len(), n * cols);
        assert_eq!(result.len(), n * cols);
        let mut column: Vec<u32> = Vec::new();
        column.try_reserve_exact(n)?;
        column.resize(n, 0);
        for j in 0..cols {
            column.iter_mut().enumerate().for_each(|(i, x)| *x = m[i * cols + j]);
            self.ntt.forward_inplace(&mut column)?;
            self.ntt.field().va_mul_vb_into_vb(&self.column_hat, &mut column);
            self.ntt.backward_inplace(&mut column)?;
            column.iter().enumerate().for_each(|(i, &x)| result[i * cols + j] = x);
        }
        Ok(())
    }
}
