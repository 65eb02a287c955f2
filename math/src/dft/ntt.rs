//! Iterative radix-2 number-theoretic transform over Z/qZ.
//!
//! The forward transform maps `a` to `A[k] = sum_j a[j] * root^(j*k)` in natural
//! order: bit-reversal permutation, then log2(n) butterfly stages. The inverse
//! runs the forward transform with root^(q-2) and scales by n^(q-2).
//!
//! Twiddle tables are rebuilt on every call. Only the bit-reversal tables are
//! cached, see [`crate::permutation`].

use itertools::izip;
use tracing::trace;

use crate::dft::DFT;
use crate::error::FieldError;
use crate::field::PrimeField;
use crate::modulus::{VectorOperations, WordOps};
use crate::permutation::bit_reversal_cache;
use crate::validate;

/// Half-block size from which butterflies use the vector kernels.
const VECTOR_HALF: usize = 8;

/// Transform of a fixed length and root over a [`PrimeField`].
#[derive(Clone, Copy, Debug)]
pub struct Ntt {
    field: PrimeField,
    n: usize,
    root: u32,
    root_inv: u32,
    n_inv: u32,
}

impl Ntt {
    /// No validation: a root that is not a primitive n-th root of unity yields
    /// meaningless output. `root` is reduced modulo q first.
    pub fn new(field: PrimeField, n: usize, root: u32) -> Self {
        let q: u32 = field.q();
        let root: u32 = field.modulus().reduce(root as u64);
        Self {
            field,
            n,
            root,
            root_inv: field.inv(root),
            n_inv: field.inv((n as u64 % q as u64) as u32),
        }
    }

    pub fn try_new(field: PrimeField, n: usize, root: u32) -> Result<Self, FieldError> {
        validate::check_transform(field.q(), n, root)?;
        Ok(Self::new(field, n, root))
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn root(&self) -> u32 {
        self.root
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }
}

impl DFT<u32> for Ntt {
    fn forward_inplace(&self, a: &mut [u32]) -> Result<(), FieldError> {
        assert_eq!(a.len(), self.n, "invalid length: {} != {}", a.len(), self.n);
        transform(&self.field, a, self.root)
    }

    fn backward_inplace(&self, a: &mut [u32]) -> Result<(), FieldError> {
        assert_eq!(a.len(), self.n, "invalid length: {} != {}", a.len(), self.n);
        transform(&self.field, a, self.root_inv)?;
        self.field.sa_mul_vb_into_vb(&self.n_inv, a);
        Ok(())
    }
}

/// Forward transform of `a` in place.
pub fn forward(field: &PrimeField, a: &mut [u32], root: u32) -> Result<(), FieldError> {
    transform(field, a, field.modulus().reduce(root as u64))
}

/// Inverse of [`forward`] for the same root.
pub fn inverse(field: &PrimeField, a: &mut [u32], root: u32) -> Result<(), FieldError> {
    Ntt::new(*field, a.len(), root).backward_inplace(a)
}

fn transform(field: &PrimeField, a: &mut [u32], root: u32) -> Result<(), FieldError> {
    let n: usize = a.len();
    trace!(n, q = field.q(), backend = ?field.backend(), "ntt");

    bit_reversal_cache().apply(a)?;

    let log_n: usize = n.log2();
    let generators: Vec<u32> = stage_generators(field, root, log_n);

    let mut twiddles: Vec<u32> = Vec::new();
    twiddles.try_reserve_exact(n / 2)?;
    let mut scratch: Vec<u32> = Vec::new();
    scratch.try_reserve_exact(n / 2)?;

    for (s, &w_len) in generators.iter().enumerate() {
        let half: usize = 1 << s;

        twiddles.clear();
        let mut w: u32 = 1;
        for _ in 0..half {
            twiddles.push(w);
            w = field.mul(w, w_len);
        }
        scratch.resize(half, 0);

        a.chunks_exact_mut(2 * half).for_each(|block| {
            let (lo, hi) = block.split_at_mut(half);
            butterflies(field, lo, hi, &twiddles, &mut scratch);
        });
    }
    Ok(())
}

/// Generator of the stage with blocks of length 2^(s+1), for s in [0, log_n):
/// the top stage uses `root`, each lower one squares the generator above it.
fn stage_generators(field: &PrimeField, root: u32, log_n: usize) -> Vec<u32> {
    let mut generators: Vec<u32> = vec![0; log_n];
    if let Some(top) = generators.last_mut() {
        *top = root;
    }
    for s in (0..log_n.saturating_sub(1)).rev() {
        generators[s] = field.mul(generators[s + 1], generators[s + 1]);
    }
    generators
}

/// (lo, hi) <- (lo + w * hi, lo - w * hi).
#[inline(always)]
fn butterflies(field: &PrimeField, lo: &mut [u32], hi: &mut [u32], twiddles: &[u32], t: &mut [u32]) {
    if lo.len() < VECTOR_HALF {
        izip!(lo.iter_mut(), hi.iter_mut(), twiddles.iter()).for_each(|(u, v, w)| {
            let t: u32 = field.mul(*v, *w);
            *v = field.sub(*u, t);
            *u = field.add(*u, t);
        });
    } else {
        field.va_mul_vb_into_vc(hi, twiddles, t);
        field.va_sub_vb_into_vc(lo, t, hi);
        field.va_add_vb_into_vb(t, lo);
    }
}
