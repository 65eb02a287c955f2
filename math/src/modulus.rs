pub mod fermat;
pub mod impl_u32;

pub use fermat::{FermatReducer, FermatReduction};

/// Largest modulus for which the lane kernels are used: raw sums of two
/// reduced operands must fit in 32 bits.
pub const MAX_LANE_MODULUS: u32 = 1 << 31;

/// Structure of a prime modulus as seen by the reduction cores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModulusKind {
    /// q = 2^k + 1 with k in {1, 2, 4, 8, 16}.
    Fermat { k: u32 },
    Generic,
}

/// Returns the structure of `q`.
///
/// Exactly the Fermat primes 3, 5, 17, 257 and 65537 are recognized, every other
/// value is [`ModulusKind::Generic`]. `q` is never tested for primality.
pub const fn classify(q: u32) -> ModulusKind {
    match q {
        3 => ModulusKind::Fermat { k: 1 },
        5 => ModulusKind::Fermat { k: 2 },
        17 => ModulusKind::Fermat { k: 4 },
        257 => ModulusKind::Fermat { k: 8 },
        65537 => ModulusKind::Fermat { k: 16 },
        _ => ModulusKind::Generic,
    }
}

/// A 32-bit prime modulus together with its classification.
///
/// Primality of `q` is a caller obligation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Modulus {
    q: u32,
    kind: ModulusKind,
    fermat: Option<FermatReducer>,
}

impl Modulus {
    pub const fn new(q: u32) -> Self {
        Self::with_reduction(q, FermatReduction::Fast)
    }

    pub const fn with_reduction(q: u32, reduction: FermatReduction) -> Self {
        let kind: ModulusKind = classify(q);
        let fermat: Option<FermatReducer> = match kind {
            ModulusKind::Fermat { k } => Some(FermatReducer::new(k, reduction)),
            ModulusKind::Generic => None,
        };
        Self { q, kind, fermat }
    }

    #[inline(always)]
    pub const fn q(&self) -> u32 {
        self.q
    }

    #[inline(always)]
    pub const fn kind(&self) -> ModulusKind {
        self.kind
    }

    #[inline(always)]
    pub const fn fermat(&self) -> Option<&FermatReducer> {
        self.fermat.as_ref()
    }

    /// Whether raw lane-wise sums and differences of reduced operands fit in 32 bits.
    #[inline(always)]
    pub const fn is_lane_safe(&self) -> bool {
        self.q <= MAX_LANE_MODULUS
    }
}

pub trait WordOps<O> {
    fn log2(self) -> O;
    fn reverse_bits_msb(self, n: u32) -> O;
    fn mask(self) -> O;
}

pub trait ReduceOnce<O> {
    /// Assigns self-q to self if self >= q.
    /// User must ensure that self < 2q.
    fn reduce_once_assign(&mut self, q: O);
    /// Returns self-q if self >= q else self.
    /// User must ensure that self < 2q.
    fn reduce_once(&self, q: O) -> O;
}

/// Scalar arithmetic over [0, q). Operands must already be reduced.
pub trait ScalarOperations<O> {
    // Assigns a mod q to a, for any a.
    fn sa_reduce_into_sa(&self, a: &mut O);

    // Assigns a + b to c.
    fn sa_add_sb_into_sc(&self, a: &O, b: &O, c: &mut O);

    // Assigns a + b to b.
    fn sa_add_sb_into_sb(&self, a: &O, b: &mut O);

    // Assigns a - b to c.
    fn sa_sub_sb_into_sc(&self, a: &O, b: &O, c: &mut O);

    // Assigns a - b to b.
    fn sa_sub_sb_into_sb(&self, a: &O, b: &mut O);

    // Assigns a * b to c.
    fn sa_mul_sb_into_sc(&self, a: &O, b: &O, c: &mut O);

    // Assigns a * b to b.
    fn sa_mul_sb_into_sb(&self, a: &O, b: &mut O);

    // Assigns -a to a.
    fn sa_neg_into_sa(&self, a: &mut O);

    // Assigns -a to b.
    fn sa_neg_into_sb(&self, a: &O, b: &mut O);
}

/// Element-wise arithmetic over vectors of [0, q).
///
/// All slices of one call must have the same length (asserted).
pub trait VectorOperations<O> {
    // vec(a) <- vec(a) mod q, for arbitrary inputs.
    fn va_reduce_into_va(&self, a: &mut [O]);

    // vec(c) <- vec(a) + vec(b).
    fn va_add_vb_into_vc(&self, a: &[O], b: &[O], c: &mut [O]);

    // vec(b) <- vec(a) + vec(b).
    fn va_add_vb_into_vb(&self, a: &[O], b: &mut [O]);

    // vec(c) <- vec(a) - vec(b).
    fn va_sub_vb_into_vc(&self, a: &[O], b: &[O], c: &mut [O]);

    // vec(b) <- vec(a) - vec(b).
    fn va_sub_vb_into_vb(&self, a: &[O], b: &mut [O]);

    // vec(c) <- vec(a) * vec(b).
    fn va_mul_vb_into_vc(&self, a: &[O], b: &[O], c: &mut [O]);

    // vec(b) <- vec(a) * vec(b).
    fn va_mul_vb_into_vb(&self, a: &[O], b: &mut [O]);

    // vec(c) <- scalar(a) * vec(b).
    fn sa_mul_vb_into_vc(&self, a: &O, b: &[O], c: &mut [O]);

    // vec(b) <- scalar(a) * vec(b).
    fn sa_mul_vb_into_vb(&self, a: &O, b: &mut [O]);

    // vec(a) <- -vec(a).
    fn va_neg_into_va(&self, a: &mut [O]);

    // vec(b) <- -vec(a).
    fn va_neg_into_vb(&self, a: &[O], b: &mut [O]);
}
