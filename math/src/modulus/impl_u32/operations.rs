use crate::modulus::{Modulus, ReduceOnce, ScalarOperations};

/// Widened scalar arithmetic. Every operand must be in [0, q).
impl Modulus {
    #[inline(always)]
    pub fn reduce(&self, a: u64) -> u32 {
        (a % self.q as u64) as u32
    }

    #[inline(always)]
    pub fn add(&self, a: u32, b: u32) -> u32 {
        self.reduce(a as u64 + b as u64)
    }

    #[inline(always)]
    pub fn sub(&self, a: u32, b: u32) -> u32 {
        self.reduce(a as u64 + self.q as u64 - b as u64)
    }

    #[inline(always)]
    pub fn neg(&self, a: u32) -> u32 {
        self.q.wrapping_sub(a).reduce_once(self.q)
    }

    #[inline(always)]
    pub fn mul(&self, a: u32, b: u32) -> u32 {
        match self.fermat() {
            Some(f) => f.reduce(a as u64 * b as u64),
            None => self.reduce(a as u64 * b as u64),
        }
    }

    /// Returns x^exponent mod q by square-and-multiply. x^0 = 1 mod q.
    pub fn pow(&self, x: u32, exponent: u64) -> u32 {
        let mut base: u32 = self.reduce(x as u64);
        let mut e: u64 = exponent;
        let mut acc: u32 = self.reduce(1);
        while e > 0 {
            if e & 1 == 1 {
                acc = self.mul(acc, base);
            }
            base = self.mul(base, base);
            e >>= 1;
        }
        acc
    }

    /// Returns x^(q-2) mod q, the inverse of x when q is prime and x != 0.
    /// Zero maps to zero.
    #[inline(always)]
    pub fn inv(&self, x: u32) -> u32 {
        self.pow(x, self.q as u64 - 2)
    }
}

impl ScalarOperations<u32> for Modulus {
    #[inline(always)]
    fn sa_reduce_into_sa(&self, a: &mut u32) {
        *a %= self.q
    }

    #[inline(always)]
    fn sa_add_sb_into_sc(&self, a: &u32, b: &u32, c: &mut u32) {
        *c = self.add(*a, *b)
    }

    #[inline(always)]
    fn sa_add_sb_into_sb(&self, a: &u32, b: &mut u32) {
        *b = self.add(*a, *b)
    }

    #[inline(always)]
    fn sa_sub_sb_into_sc(&self, a: &u32, b: &u32, c: &mut u32) {
        *c = self.sub(*a, *b)
    }

    #[inline(always)]
    fn sa_sub_sb_into_sb(&self, a: &u32, b: &mut u32) {
        *b = self.sub(*a, *b)
    }

    #[inline(always)]
    fn sa_mul_sb_into_sc(&self, a: &u32, b: &u32, c: &mut u32) {
        *c = self.mul(*a, *b)
    }

    #[inline(always)]
    fn sa_mul_sb_into_sb(&self, a: &u32, b: &mut u32) {
        *b = self.mul(*a, *b)
    }

    #[inline(always)]
    fn sa_neg_into_sa(&self, a: &mut u32) {
        *a = self.neg(*a)
    }

    #[inline(always)]
    fn sa_neg_into_sb(&self, a: &u32, b: &mut u32) {
        *b = self.neg(*a)
    }
}

#[cfg(test)]
mod tests {
    use crate::modulus::{FermatReduction, Modulus, ModulusKind, ScalarOperations, classify};

    #[test]
    fn classification() {
        for (q, k) in [(3, 1), (5, 2), (17, 4), (257, 8), (65537, 16)] {
            assert_eq!(classify(q), ModulusKind::Fermat { k });
        }
        for q in [2, 7, 13, 65536, 65539, 12289, 998244353, 4294967291] {
            assert_eq!(classify(q), ModulusKind::Generic);
        }
    }

    #[test]
    fn scalar_ops() {
        let m: Modulus = Modulus::new(17);
        assert_eq!(m.add(16, 16), 15);
        assert_eq!(m.sub(3, 5), 15);
        assert_eq!(m.neg(0), 0);
        assert_eq!(m.neg(1), 16);
        assert_eq!(m.mul(16, 16), 1);
        assert_eq!(m.pow(3, 16), 1);
        assert_eq!(m.pow(3, 8), 16);
        assert_eq!(m.pow(5, 0), 1);
        assert_eq!(m.mul(m.inv(5), 5), 1);
        assert_eq!(m.inv(0), 0);
    }

    #[test]
    fn pow_zero_exponent_modulus_two() {
        let m: Modulus = Modulus::new(2);
        assert_eq!(m.pow(1, 0), 1);
        assert_eq!(m.pow(0, 0), 1);
        assert_eq!(m.mul(1, 1), 1);
    }

    #[test]
    fn large_generic_modulus() {
        let q: u32 = 4294967291;
        let m: Modulus = Modulus::new(q);
        assert_eq!(m.add(q - 1, q - 1), q - 2);
        assert_eq!(m.sub(0, q - 1), 1);
        assert_eq!(m.mul(q - 1, q - 1), 1);
        let x: u32 = 123456789;
        assert_eq!(m.mul(x, m.inv(x)), 1);
    }

    #[test]
    fn fermat_and_generic_multiply_agree() {
        for mode in [FermatReduction::Fast, FermatReduction::Safe] {
            let m: Modulus = Modulus::with_reduction(65537, mode);
            for (a, b) in [(0, 0), (65536, 65536), (65536, 2), (12345, 54321), (1, 65536)] {
                let mut c: u32 = 0;
                m.sa_mul_sb_into_sc(&a, &b, &mut c);
                assert_eq!(c as u64, (a as u64 * b as u64) % 65537);
            }
        }
    }

    #[test]
    fn inplace_variants() {
        let m: Modulus = Modulus::new(257);
        let mut b: u32 = 200;
        m.sa_add_sb_into_sb(&100, &mut b);
        assert_eq!(b, 43);
        m.sa_sub_sb_into_sb(&0, &mut b);
        assert_eq!(b, 214);
        m.sa_neg_into_sa(&mut b);
        assert_eq!(b, 43);
        let mut x: u32 = u32::MAX;
        m.sa_reduce_into_sa(&mut x);
        assert_eq!(x, u32::MAX % 257);
    }
}
