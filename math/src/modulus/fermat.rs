//! Reduction modulo the Fermat primes q = 2^k + 1.
//!
//! Since 2^k = -1 mod q, any n = T * 2^k + U is congruent to U - T. The fast
//! mode splits at bit k and applies a single correction. The safe mode splits
//! at bit k + 1, where 2^(k+1) = -2 mod q, and corrects twice.

/// Fermat fold variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FermatReduction {
    /// n = U - T with T = n >> k, single conditional add of q.
    #[default]
    Fast,
    /// n = U - 2T with T = n >> (k + 1), two corrections and a final conditional subtraction.
    Safe,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FermatReducer {
    q: u32,
    k: u32,
    shift: u32,
    mask: u32,
    mode: FermatReduction,
}

impl FermatReducer {
    /// # Panics
    /// Debug builds panic if k is outside [1, 16].
    pub const fn new(k: u32, mode: FermatReduction) -> Self {
        debug_assert!(k >= 1 && k <= 16);
        let shift: u32 = match mode {
            FermatReduction::Fast => k,
            FermatReduction::Safe => k + 1,
        };
        Self {
            q: (1 << k) + 1,
            k,
            shift,
            mask: (1 << shift) - 1,
            mode,
        }
    }

    #[inline(always)]
    pub const fn q(&self) -> u32 {
        self.q
    }

    #[inline(always)]
    pub const fn k(&self) -> u32 {
        self.k
    }

    /// Bit position at which values are split into high part T and low part U.
    #[inline(always)]
    pub const fn shift(&self) -> u32 {
        self.shift
    }

    #[inline(always)]
    pub const fn mask(&self) -> u32 {
        self.mask
    }

    #[inline(always)]
    pub const fn mode(&self) -> FermatReduction {
        self.mode
    }

    /// Whether [`Self::reduce`] is exact for every 32-bit input, not only for
    /// sums and products of reduced operands. Holds for k = 16 only.
    #[inline(always)]
    pub const fn folds_any_word(&self) -> bool {
        self.k == 16
    }

    /// Combines the high part `t` and low part `u` of a value into its residue in [0, q).
    ///
    /// Mirrors the signed 32-bit lane arithmetic of the vector kernels.
    #[inline(always)]
    pub fn fold(&self, t: u32, u: u32) -> u32 {
        let q: i64 = self.q as i64;
        let mut r: i64 = u as i64 - t as i64;
        if r < 0 {
            r += q;
        }
        if self.mode == FermatReduction::Safe {
            r -= t as i64;
            if r < 0 {
                r += q;
            }
            if r > q - 1 {
                r -= q;
            }
        }
        r as u32
    }

    /// Returns n mod q for any n that is a sum, difference (offset by q) or
    /// product of two operands in [0, q).
    #[inline(always)]
    pub fn reduce(&self, n: u64) -> u32 {
        debug_assert!(n <= (self.q as u64 - 1) * (self.q as u64 - 1) + 2 * self.q as u64 || self.folds_any_word() && n <= u32::MAX as u64);
        self.fold((n >> self.shift) as u32, (n as u32) & self.mask)
    }
}
