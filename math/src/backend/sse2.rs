//! SSE2 kernels over 4 lanes of 32 bits.
//!
//! Only used for moduli q <= 2^31. Products of two lanes are formed in 64 bits,
//! even lanes directly and odd lanes after a 32-bit right shift, then folded
//! back into 32-bit lanes. Elements past the last full group go through the
//! widened scalar path.

use core::arch::x86_64::{
    __m128i, _mm_add_epi32, _mm_and_si128, _mm_cmpgt_epi32, _mm_cmplt_epi32, _mm_cvtsi32_si128, _mm_loadu_si128,
    _mm_mul_epu32, _mm_or_si128, _mm_set1_epi32, _mm_set1_epi64x, _mm_setzero_si128, _mm_slli_epi64, _mm_srl_epi32,
    _mm_srl_epi64, _mm_srli_epi64, _mm_storeu_si128, _mm_sub_epi32,
};

use super::scalar;
use crate::modulus::{FermatReducer, FermatReduction, Modulus};

const LANES: usize = 4;

/// Broadcast constants of a [`FermatReducer`].
struct FermatLanes {
    count: __m128i,
    mask: __m128i,
    mask64: __m128i,
    low32: __m128i,
    q: __m128i,
    q_minus_one: __m128i,
    safe: bool,
}

impl FermatLanes {
    #[inline(always)]
    unsafe fn new(f: &FermatReducer) -> Self {
        unsafe {
            Self {
                count: _mm_cvtsi32_si128(f.shift() as i32),
                mask: _mm_set1_epi32(f.mask() as i32),
                mask64: _mm_set1_epi64x(f.mask() as i64),
                low32: _mm_set1_epi64x(u32::MAX as i64),
                q: _mm_set1_epi32(f.q() as i32),
                q_minus_one: _mm_set1_epi32(f.q() as i32 - 1),
                safe: f.mode() == FermatReduction::Safe,
            }
        }
    }
}

/// r = u - t, plus q where negative. The safe mode subtracts t a second time,
/// corrects again and subtracts q where r > q - 1.
#[inline(always)]
unsafe fn fold(t: __m128i, u: __m128i, l: &FermatLanes) -> __m128i {
    unsafe {
        let zero: __m128i = _mm_setzero_si128();
        let mut r: __m128i = _mm_sub_epi32(u, t);
        r = _mm_add_epi32(r, _mm_and_si128(_mm_cmplt_epi32(r, zero), l.q));
        if l.safe {
            r = _mm_sub_epi32(r, t);
            r = _mm_add_epi32(r, _mm_and_si128(_mm_cmplt_epi32(r, zero), l.q));
            r = _mm_sub_epi32(r, _mm_and_si128(_mm_cmpgt_epi32(r, l.q_minus_one), l.q));
        }
        r
    }
}

/// Folds 32-bit lanes holding raw sums or differences.
#[inline(always)]
unsafe fn fold_words(x: __m128i, l: &FermatLanes) -> __m128i {
    unsafe { fold(_mm_srl_epi32(x, l.count), _mm_and_si128(x, l.mask), l) }
}

/// Folds the 64-bit products of the even and odd lanes and re-interleaves them.
#[inline(always)]
unsafe fn fold_products(even: __m128i, odd: __m128i, l: &FermatLanes) -> __m128i {
    unsafe {
        let t: __m128i = interleave(_mm_srl_epi64(even, l.count), _mm_srl_epi64(odd, l.count), l.low32);
        let u: __m128i = interleave(_mm_and_si128(even, l.mask64), _mm_and_si128(odd, l.mask64), l.low32);
        fold(t, u, l)
    }
}

#[inline(always)]
unsafe fn interleave(even: __m128i, odd: __m128i, low32: __m128i) -> __m128i {
    unsafe { _mm_or_si128(_mm_and_si128(even, low32), _mm_slli_epi64::<32>(odd)) }
}

/// # Safety
/// `res`, `a` and `b` must be valid for `n` elements, `res` may alias either input.
/// Requires q <= 2^31.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn add_sse2(n: usize, res: *mut u32, a: *const u32, b: *const u32, m: &Modulus) {
    let span: usize = n / LANES;
    unsafe {
        let mut rr: *mut __m128i = res as *mut __m128i;
        let mut aa: *const __m128i = a as *const __m128i;
        let mut bb: *const __m128i = b as *const __m128i;
        for _ in 0..span {
            _mm_storeu_si128(rr, _mm_add_epi32(_mm_loadu_si128(aa), _mm_loadu_si128(bb)));
            rr = rr.add(1);
            aa = aa.add(1);
            bb = bb.add(1);
        }
        for i in span * LANES..n {
            *res.add(i) = (*a.add(i)).wrapping_add(*b.add(i));
        }
        correct(n, res, m);
    }
}

/// # Safety
/// See [`add_sse2`].
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sub_sse2(n: usize, res: *mut u32, a: *const u32, b: *const u32, m: &Modulus) {
    let span: usize = n / LANES;
    let q: u32 = m.q();
    unsafe {
        let vq: __m128i = _mm_set1_epi32(q as i32);
        let mut rr: *mut __m128i = res as *mut __m128i;
        let mut aa: *const __m128i = a as *const __m128i;
        let mut bb: *const __m128i = b as *const __m128i;
        for _ in 0..span {
            let x: __m128i = _mm_add_epi32(_mm_loadu_si128(aa), vq);
            _mm_storeu_si128(rr, _mm_sub_epi32(x, _mm_loadu_si128(bb)));
            rr = rr.add(1);
            aa = aa.add(1);
            bb = bb.add(1);
        }
        for i in span * LANES..n {
            *res.add(i) = (*a.add(i)).wrapping_add(q).wrapping_sub(*b.add(i));
        }
        correct(n, res, m);
    }
}

/// # Safety
/// `res` must be valid for `n` elements. Requires q <= 2^31.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn neg_sse2(n: usize, res: *mut u32, m: &Modulus) {
    let span: usize = n / LANES;
    let q: u32 = m.q();
    unsafe {
        let vq: __m128i = _mm_set1_epi32(q as i32);
        let mut rr: *mut __m128i = res as *mut __m128i;
        for _ in 0..span {
            _mm_storeu_si128(rr, _mm_sub_epi32(vq, _mm_loadu_si128(rr)));
            rr = rr.add(1);
        }
        for i in span * LANES..n {
            *res.add(i) = q.wrapping_sub(*res.add(i));
        }
        correct(n, res, m);
    }
}

/// Brings raw sums and differences, all below 2q, into [0, q).
/// Fermat moduli use the lane fold, other moduli divide in the widened scalar path.
#[inline(always)]
unsafe fn correct(n: usize, res: *mut u32, m: &Modulus) {
    match m.fermat() {
        Some(f) => unsafe { fold_all(n, res, f) },
        None => unsafe { scalar::reduce_ref(n, res, m) },
    }
}

#[inline(always)]
unsafe fn fold_all(n: usize, res: *mut u32, f: &FermatReducer) {
    let span: usize = n / LANES;
    unsafe {
        let l: FermatLanes = FermatLanes::new(f);
        let mut rr: *mut __m128i = res as *mut __m128i;
        for _ in 0..span {
            _mm_storeu_si128(rr, fold_words(_mm_loadu_si128(rr), &l));
            rr = rr.add(1);
        }
        for i in span * LANES..n {
            *res.add(i) = f.reduce(*res.add(i) as u64);
        }
    }
}

/// Reduces arbitrary 32-bit values. The lane fold is only used where it is
/// exact over every 32-bit input, see [`FermatReducer::folds_any_word`].
///
/// # Safety
/// `res` must be valid for `n` elements.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn reduce_sse2(n: usize, res: *mut u32, m: &Modulus) {
    match m.fermat() {
        Some(f) if f.folds_any_word() => unsafe { fold_all(n, res, f) },
        _ => unsafe { scalar::reduce_ref(n, res, m) },
    }
}

/// # Safety
/// See [`add_sse2`].
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn mul_sse2(n: usize, res: *mut u32, a: *const u32, b: *const u32, m: &Modulus) {
    let Some(f) = m.fermat() else {
        unsafe { scalar::mul_ref(n, res, a, b, m) };
        return;
    };
    let span: usize = n / LANES;
    unsafe {
        let l: FermatLanes = FermatLanes::new(f);
        let mut rr: *mut __m128i = res as *mut __m128i;
        let mut aa: *const __m128i = a as *const __m128i;
        let mut bb: *const __m128i = b as *const __m128i;
        for _ in 0..span {
            let va: __m128i = _mm_loadu_si128(aa);
            let vb: __m128i = _mm_loadu_si128(bb);
            let even: __m128i = _mm_mul_epu32(va, vb);
            let odd: __m128i = _mm_mul_epu32(_mm_srli_epi64::<32>(va), _mm_srli_epi64::<32>(vb));
            _mm_storeu_si128(rr, fold_products(even, odd, &l));
            rr = rr.add(1);
            aa = aa.add(1);
            bb = bb.add(1);
        }
        for i in span * LANES..n {
            *res.add(i) = m.reduce(*a.add(i) as u64 * *b.add(i) as u64);
        }
    }
}

/// # Safety
/// `res` and `a` must be valid for `n` elements, `res` may alias `a`.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn mul_scalar_sse2(n: usize, res: *mut u32, a: *const u32, s: u32, m: &Modulus) {
    let Some(f) = m.fermat() else {
        unsafe { scalar::mul_scalar_ref(n, res, a, s, m) };
        return;
    };
    let span: usize = n / LANES;
    unsafe {
        let l: FermatLanes = FermatLanes::new(f);
        let vs: __m128i = _mm_set1_epi32(s as i32);
        let mut rr: *mut __m128i = res as *mut __m128i;
        let mut aa: *const __m128i = a as *const __m128i;
        for _ in 0..span {
            let va: __m128i = _mm_loadu_si128(aa);
            let even: __m128i = _mm_mul_epu32(va, vs);
            let odd: __m128i = _mm_mul_epu32(_mm_srli_epi64::<32>(va), vs);
            _mm_storeu_si128(rr, fold_products(even, odd, &l));
            rr = rr.add(1);
            aa = aa.add(1);
        }
        for i in span * LANES..n {
            *res.add(i) = m.reduce(*a.add(i) as u64 * s as u64);
        }
    }
}
