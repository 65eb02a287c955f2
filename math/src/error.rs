use std::collections::TryReserveError;

use crate::backend::Backend;

/// Failures reported by the checked entry points and by the transforms.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("invalid modulus {q}: must be at least 2")]
    InvalidModulus { q: u32 },
    #[error("length {len} is not a non-zero power of two")]
    NotPowerOfTwo { len: usize },
    #[error("length {len} exceeds the largest supported transform length {max}")]
    TooLong { len: usize, max: usize },
    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },
    #[error("element {value} at index {index} is not reduced modulo {q}")]
    Unreduced { index: usize, value: u32, q: u32 },
    #[error("order {n} does not divide q - 1 for q = {q}")]
    OrderNotDividing { n: usize, q: u32 },
    #[error("{root} is not a primitive {n}-th root of unity modulo {q}")]
    NotPrimitiveRoot { root: u32, n: usize, q: u32 },
    #[error("{value} has no inverse modulo {q}")]
    NotInvertible { value: u32, q: u32 },
    #[error("no primitive {n}-th root of unity modulo {q} found after {attempts} attempts")]
    RootSearchExhausted { n: u32, q: u32, attempts: usize },
    #[error("backend {0:?} is not supported on this cpu")]
    BackendUnavailable(Backend),
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}
