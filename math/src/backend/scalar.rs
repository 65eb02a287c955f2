//! Widened-integer kernels. Always available and the reference for the lane kernels.

use crate::modulus::Modulus;

/// # Safety
/// `res`, `a` and `b` must be valid for `n` elements. `res` may alias `a` or `b`.
pub(crate) unsafe fn add_ref(n: usize, res: *mut u32, a: *const u32, b: *const u32, m: &Modulus) {
    for i in 0..n {
        unsafe { *res.add(i) = m.add(*a.add(i), *b.add(i)) }
    }
}

/// # Safety
/// See [`add_ref`].
pub(crate) unsafe fn sub_ref(n: usize, res: *mut u32, a: *const u32, b: *const u32, m: &Modulus) {
    for i in 0..n {
        unsafe { *res.add(i) = m.sub(*a.add(i), *b.add(i)) }
    }
}

/// # Safety
/// See [`add_ref`].
pub(crate) unsafe fn mul_ref(n: usize, res: *mut u32, a: *const u32, b: *const u32, m: &Modulus) {
    for i in 0..n {
        unsafe { *res.add(i) = m.reduce(*a.add(i) as u64 * *b.add(i) as u64) }
    }
}

/// # Safety
/// `res` and `a` must be valid for `n` elements. `res` may alias `a`.
pub(crate) unsafe fn mul_scalar_ref(n: usize, res: *mut u32, a: *const u32, s: u32, m: &Modulus) {
    for i in 0..n {
        unsafe { *res.add(i) = m.reduce(*a.add(i) as u64 * s as u64) }
    }
}

/// # Safety
/// `res` must be valid for `n` elements.
pub(crate) unsafe fn neg_ref(n: usize, res: *mut u32, m: &Modulus) {
    for i in 0..n {
        unsafe { *res.add(i) = m.neg(*res.add(i)) }
    }
}

/// Divides every element by q and keeps the remainder.
///
/// # Safety
/// `res` must be valid for `n` elements.
pub(crate) unsafe fn reduce_ref(n: usize, res: *mut u32, m: &Modulus) {
    let q: u32 = m.q();
    for i in 0..n {
        unsafe { *res.add(i) %= q }
    }
}
