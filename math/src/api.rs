//! Canonical entry points over plain `u32` buffers.
//!
//! The unchecked functions trust their numeric preconditions: elements reduced,
//! roots primitive. Breaking them yields wrong values, never undefined
//! behavior. A modulus below 2 panics (division by zero) rather than producing
//! values. Slice lengths are always asserted. The `try_*` functions validate
//! every precondition first and report a [`FieldError`], for instance
//! [`FieldError::InvalidModulus`] for a modulus below 2.
//!
//! Sub-ranges of a larger buffer are passed as sub-slices, e.g.
//! `field_neg_vector(&mut buf[off..off + len], q)`.

use pir_sampling::Source;

use crate::config::DEFAULT_MAX_ROOT_ATTEMPTS;
use crate::convolution;
use crate::dft::ntt;
use crate::error::FieldError;
use crate::field::PrimeField;
use crate::modulus::VectorOperations;
use crate::root;
use crate::validate::{check_len, check_modulus, check_reduced, check_transform};

/// dst <- a + b mod q.
pub fn field_add_vectors(dst: &mut [u32], a: &[u32], b: &[u32], modulus: u32) {
    PrimeField::new(modulus).va_add_vb_into_vc(a, b, dst)
}

/// dst <- a - b mod q.
pub fn field_sub_vectors(dst: &mut [u32], a: &[u32], b: &[u32], modulus: u32) {
    PrimeField::new(modulus).va_sub_vb_into_vc(a, b, dst)
}

/// dst <- a * b mod q, element-wise.
pub fn field_mul_vectors(dst: &mut [u32], a: &[u32], b: &[u32], modulus: u32) {
    PrimeField::new(modulus).va_mul_vb_into_vc(a, b, dst)
}

/// dst <- scalar * a mod q.
pub fn field_mul_vector(dst: &mut [u32], a: &[u32], scalar: u32, modulus: u32) {
    PrimeField::new(modulus).sa_mul_vb_into_vc(&scalar, a, dst)
}

/// dst <- -dst mod q.
pub fn field_neg_vector(dst: &mut [u32], modulus: u32) {
    PrimeField::new(modulus).va_neg_into_va(dst)
}

/// dst <- dst mod q, for arbitrary 32-bit values.
pub fn field_mod_vector(dst: &mut [u32], modulus: u32) {
    PrimeField::new(modulus).va_reduce_into_va(dst)
}

/// Forward NTT of `buffer` in place. Fails on a length that is not a power of
/// two or on allocation failure.
pub fn ntt(buffer: &mut [u32], root: u32, modulus: u32) -> Result<(), FieldError> {
    ntt::forward(&PrimeField::new(modulus), buffer, root)
}

/// Inverse of [`ntt`] for the same root.
pub fn intt(buffer: &mut [u32], root: u32, modulus: u32) -> Result<(), FieldError> {
    ntt::inverse(&PrimeField::new(modulus), buffer, root)
}

/// result <- a ⊛ b, cyclic convolution modulo x^n - 1 with n = a.len().
pub fn ntt_convolution(a: &[u32], b: &[u32], result: &mut [u32], root: u32, modulus: u32) -> Result<(), FieldError> {
    convolution::ntt_convolution(&PrimeField::new(modulus), a, b, result, root)
}

/// Primitive n-th root of unity modulo q, drawn from an OS-seeded source.
pub fn primitive_root_of_unity(modulus: u32, n: u32) -> Result<u32, FieldError> {
    let field: PrimeField = PrimeField::try_new(modulus)?;
    root::primitive_root_of_unity(&field, n, &mut Source::from_entropy(), DEFAULT_MAX_ROOT_ATTEMPTS)
}

fn check_binary(dst: &[u32], a: &[u32], b: &[u32], modulus: u32) -> Result<(), FieldError> {
    check_modulus(modulus)?;
    check_len(a.len(), b.len())?;
    check_len(a.len(), dst.len())?;
    check_reduced(a, modulus)?;
    check_reduced(b, modulus)
}

pub fn try_field_add_vectors(dst: &mut [u32], a: &[u32], b: &[u32], modulus: u32) -> Result<(), FieldError> {
    check_binary(dst, a, b, modulus)?;
    field_add_vectors(dst, a, b, modulus);
    Ok(())
}

pub fn try_field_sub_vectors(dst: &mut [u32], a: &[u32], b: &[u32], modulus: u32) -> Result<(), FieldError> {
    check_binary(dst, a, b, modulus)?;
    field_sub_vectors(dst, a, b, modulus);
    Ok(())
}

pub fn try_field_mul_vectors(dst: &mut [u32], a: &[u32], b: &[u32], modulus: u32) -> Result<(), FieldError> {
    check_binary(dst, a, b, modulus)?;
    field_mul_vectors(dst, a, b, modulus);
    Ok(())
}

pub fn try_field_mul_vector(dst: &mut [u32], a: &[u32], scalar: u32, modulus: u32) -> Result<(), FieldError> {
    check_modulus(modulus)?;
    check_len(a.len(), dst.len())?;
    check_reduced(a, modulus)?;
    check_reduced(&[scalar], modulus)?;
    field_mul_vector(dst, a, scalar, modulus);
    Ok(())
}

pub fn try_field_neg_vector(dst: &mut [u32], modulus: u32) -> Result<(), FieldError> {
    check_modulus(modulus)?;
    check_reduced(dst, modulus)?;
    field_neg_vector(dst, modulus);
    Ok(())
}

pub fn try_field_mod_vector(dst: &mut [u32], modulus: u32) -> Result<(), FieldError> {
    check_modulus(modulus)?;
    field_mod_vector(dst, modulus);
    Ok(())
}

pub fn try_ntt(buffer: &mut [u32], root: u32, modulus: u32) -> Result<(), FieldError> {
    check_transform(modulus, buffer.len(), root)?;
    check_reduced(buffer, modulus)?;
    ntt(buffer, root, modulus)
}

pub fn try_intt(buffer: &mut [u32], root: u32, modulus: u32) -> Result<(), FieldError> {
    check_transform(modulus, buffer.len(), root)?;
    check_reduced(buffer, modulus)?;
    intt(buffer, root, modulus)
}

pub fn try_ntt_convolution(a: &[u32], b: &[u32], result: &mut [u32], root: u32, modulus: u32) -> Result<(), FieldError> {
    check_transform(modulus, a.len(), root)?;
    check_len(a.len(), b.len())?;
    check_len(a.len(), result.len())?;
    check_reduced(a, modulus)?;
    check_reduced(b, modulus)?;
    ntt_convolution(a, b, result, root, modulus)
}
