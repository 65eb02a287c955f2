use pir_sampling::Source;
use tracing::trace;

use crate::backend::{Backend, Kernels};
use crate::config::Config;
use crate::error::FieldError;
use crate::modulus::{Modulus, VectorOperations, WordOps};
use crate::validate;

/// Arithmetic context over Z/qZ bound to a kernel backend.
///
/// Vector operations run on the configured backend when q <= 2^31 and on the
/// scalar core otherwise. Operands must be reduced; lengths are asserted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrimeField {
    modulus: Modulus,
    backend: Backend,
    max_root_attempts: usize,
}

impl PrimeField {
    /// Field with the default [`Config`]. q >= 2 and primality are caller obligations.
    pub fn new(q: u32) -> Self {
        let config: Config = Config::default();
        Self {
            modulus: Modulus::with_reduction(q, config.fermat_reduction),
            backend: Backend::detect(),
            max_root_attempts: config.max_root_attempts,
        }
    }

    pub fn try_new(q: u32) -> Result<Self, FieldError> {
        Self::with_config(q, &Config::default())
    }

    pub fn with_config(q: u32, config: &Config) -> Result<Self, FieldError> {
        validate::check_modulus(q)?;
        let backend: Backend = config.resolve_backend()?;
        trace!(q, ?backend, "field context");
        Ok(Self {
            modulus: Modulus::with_reduction(q, config.fermat_reduction),
            backend,
            max_root_attempts: config.max_root_attempts,
        })
    }

    #[inline(always)]
    pub fn q(&self) -> u32 {
        self.modulus.q()
    }

    #[inline(always)]
    pub fn modulus(&self) -> &Modulus {
        &self.modulus
    }

    #[inline(always)]
    pub fn backend(&self) -> Backend {
        self.backend
    }

    #[inline(always)]
    pub fn max_root_attempts(&self) -> usize {
        self.max_root_attempts
    }

    #[inline(always)]
    fn kernels(&self) -> &'static Kernels {
        if self.modulus.is_lane_safe() {
            self.backend.kernels()
        } else {
            Backend::Scalar.kernels()
        }
    }

    #[inline(always)]
    pub fn add(&self, a: u32, b: u32) -> u32 {
        self.modulus.add(a, b)
    }

    #[inline(always)]
    pub fn sub(&self, a: u32, b: u32) -> u32 {
        self.modulus.sub(a, b)
    }

    #[inline(always)]
    pub fn mul(&self, a: u32, b: u32) -> u32 {
        self.modulus.mul(a, b)
    }

    #[inline(always)]
    pub fn neg(&self, a: u32) -> u32 {
        self.modulus.neg(a)
    }

    #[inline(always)]
    pub fn pow(&self, x: u32, exponent: u64) -> u32 {
        self.modulus.pow(x, exponent)
    }

    /// Inverse by Fermat's little theorem. Zero maps to zero.
    #[inline(always)]
    pub fn inv(&self, x: u32) -> u32 {
        self.modulus.inv(x)
    }

    pub fn try_inv(&self, x: u32) -> Result<u32, FieldError> {
        if x % self.q() == 0 {
            return Err(FieldError::NotInvertible { value: x, q: self.q() });
        }
        Ok(self.inv(x % self.q()))
    }

    /// Element-wise inverses. Fails on the first zero element.
    pub fn invert_vector(&self, a: &[u32]) -> Result<Vec<u32>, FieldError> {
        a.iter().map(|&x| self.try_inv(x)).collect()
    }

    /// Fills `a` with independent uniform elements of [0, q).
    pub fn fill_uniform(&self, source: &mut Source, a: &mut [u32]) {
        let q: u32 = self.q();
        let mask: u32 = q.mask();
        a.iter_mut().for_each(|x| *x = source.next_u32n(q, mask));
    }

    pub fn sample_vector(&self, source: &mut Source, n: usize) -> Vec<u32> {
        let mut a: Vec<u32> = vec![0; n];
        self.fill_uniform(source, &mut a);
        a
    }

    /// Uniform elements of [1, q).
    pub fn sample_invertible_vector(&self, source: &mut Source, n: usize) -> Vec<u32> {
        let max: u32 = self.q() - 1;
        let mask: u32 = max.mask();
        (0..n).map(|_| 1 + source.next_u32n(max, mask)).collect()
    }

    /// Draws a primitive n-th root of unity with the configured attempt bound.
    pub fn primitive_root_of_unity(&self, n: u32, source: &mut Source) -> Result<u32, FieldError> {
        crate::root::primitive_root_of_unity(self, n, source, self.max_root_attempts)
    }
}

impl VectorOperations<u32> for PrimeField {
    fn va_reduce_into_va(&self, a: &mut [u32]) {
        unsafe { (self.kernels().reduce)(a.len(), a.as_mut_ptr(), &self.modulus) }
    }

    fn va_add_vb_into_vc(&self, a: &[u32], b: &[u32], c: &mut [u32]) {
        assert_eq!(a.len(), b.len());
        assert_eq!(a.len(), c.len());
        unsafe { (self.kernels().add)(c.len(), c.as_mut_ptr(), a.as_ptr(), b.as_ptr(), &self.modulus) }
    }

    fn va_add_vb_into_vb(&self, a: &[u32], b: &mut [u32]) {
        assert_eq!(a.len(), b.len());
        let bb: *mut u32 = b.as_mut_ptr();
        unsafe { (self.kernels().add)(b.len(), bb, a.as_ptr(), bb, &self.modulus) }
    }

    fn va_sub_vb_into_vc(&self, a: &[u32], b: &[u32], c: &mut [u32]) {
        assert_eq!(a.len(), b.len());
        assert_eq!(a.len(), c.len());
        unsafe { (self.kernels().sub)(c.len(), c.as_mut_ptr(), a.as_ptr(), b.as_ptr(), &self.modulus) }
    }

    fn va_sub_vb_into_vb(&self, a: &[u32], b: &mut [u32]) {
        assert_eq!(a.len(), b.len());
        let bb: *mut u32 = b.as_mut_ptr();
        unsafe { (self.kernels().sub)(b.len(), bb, a.as_ptr(), bb, &self.modulus) }
    }

    fn va_mul_vb_into_vc(&self, a: &[u32], b: &[u32], c: &mut [u32]) {
        assert_eq!(a.len(), b.len());
        assert_eq!(a.len(), c.len());
        unsafe { (self.kernels().mul)(c.len(), c.as_mut_ptr(), a.as_ptr(), b.as_ptr(), &self.modulus) }
    }

    fn va_mul_vb_into_vb(&self, a: &[u32], b: &mut [u32]) {
        assert_eq!(a.len(), b.len());
        let bb: *mut u32 = b.as_mut_ptr();
        unsafe { (self.kernels().mul)(b.len(), bb, a.as_ptr(), bb, &self.modulus) }
    }

    fn sa_mul_vb_into_vc(&self, a: &u32, b: &[u32], c: &mut [u32]) {
        assert_eq!(b.len(), c.len());
        unsafe { (self.kernels().mul_scalar)(c.len(), c.as_mut_ptr(), b.as_ptr(), *a, &self.modulus) }
    }

    fn sa_mul_vb_into_vb(&self, a: &u32, b: &mut [u32]) {
        let bb: *mut u32 = b.as_mut_ptr();
        unsafe { (self.kernels().mul_scalar)(b.len(), bb, bb, *a, &self.modulus) }
    }

    fn va_neg_into_va(&self, a: &mut [u32]) {
        unsafe { (self.kernels().neg)(a.len(), a.as_mut_ptr(), &self.modulus) }
    }

    fn va_neg_into_vb(&self, a: &[u32], b: &mut [u32]) {
        b.copy_from_slice(a);
        self.va_neg_into_va(b)
    }
}
