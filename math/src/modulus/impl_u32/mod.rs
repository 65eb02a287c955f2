pub mod operations;

use crate::modulus::{ReduceOnce, WordOps};

impl WordOps<u32> for u32 {
    #[inline(always)]
    fn log2(self) -> u32 {
        (u32::BITS - (self - 1).leading_zeros()) as _
    }
    #[inline(always)]
    fn reverse_bits_msb(self, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        self.reverse_bits() >> (u32::BITS - n)
    }
    #[inline(always)]
    fn mask(self) -> u32 {
        if self <= 1 {
            return 0;
        }
        u32::MAX >> (self - 1).leading_zeros()
    }
}

impl WordOps<usize> for usize {
    #[inline(always)]
    fn log2(self) -> usize {
        (usize::BITS - (self - 1).leading_zeros()) as _
    }
    #[inline(always)]
    fn reverse_bits_msb(self, n: u32) -> usize {
        if n == 0 {
            return 0;
        }
        self.reverse_bits() >> (usize::BITS - n)
    }
    #[inline(always)]
    fn mask(self) -> usize {
        if self <= 1 {
            return 0;
        }
        usize::MAX >> (self - 1).leading_zeros()
    }
}

impl ReduceOnce<u32> for u32 {
    #[inline(always)]
    fn reduce_once_assign(&mut self, q: u32) {
        *self = (*self).min(self.wrapping_sub(q))
    }

    #[inline(always)]
    fn reduce_once(&self, q: u32) -> u32 {
        (*self).min(self.wrapping_sub(q))
    }
}
