//! Kernel backends and their runtime selection.
//!
//! Every backend exposes the same [`Kernels`] table of pointer-based kernels.
//! `res` may alias any input of the same call, which lets the in-place
//! variants of [`crate::modulus::VectorOperations`] reuse one kernel.
//!
//! | Backend | Lanes | Fermat moduli | Generic moduli |
//! |---|---|---|---|
//! | [`Backend::Avx2`] | 8 | vector fold | vector add/sub/neg, scalar reduce and multiply |
//! | [`Backend::Sse2`] | 4 | vector fold | vector add/sub/neg, scalar reduce and multiply |
//! | [`Backend::Scalar`] | 1 | widened scalar | widened scalar |

pub(crate) mod scalar;

#[cfg(target_arch = "x86_64")]
pub(crate) mod avx2;
#[cfg(target_arch = "x86_64")]
pub(crate) mod sse2;

use std::sync::OnceLock;

use tracing::debug;

use crate::modulus::Modulus;

/// `res[i] <- a[i] op b[i]` for i in [0, n).
pub(crate) type BinaryKernel = unsafe fn(usize, *mut u32, *const u32, *const u32, &Modulus);
/// `res[i] <- a[i] * s` for i in [0, n).
pub(crate) type ScalarKernel = unsafe fn(usize, *mut u32, *const u32, u32, &Modulus);
/// `res[i] <- op(res[i])` for i in [0, n).
pub(crate) type UnaryKernel = unsafe fn(usize, *mut u32, &Modulus);

pub(crate) struct Kernels {
    pub(crate) add: BinaryKernel,
    pub(crate) sub: BinaryKernel,
    pub(crate) mul: BinaryKernel,
    pub(crate) mul_scalar: ScalarKernel,
    pub(crate) neg: UnaryKernel,
    pub(crate) reduce: UnaryKernel,
}

static SCALAR_KERNELS: Kernels = Kernels {
    add: scalar::add_ref,
    sub: scalar::sub_ref,
    mul: scalar::mul_ref,
    mul_scalar: scalar::mul_scalar_ref,
    neg: scalar::neg_ref,
    reduce: scalar::reduce_ref,
};

#[cfg(target_arch = "x86_64")]
static SSE2_KERNELS: Kernels = Kernels {
    add: sse2::add_sse2,
    sub: sse2::sub_sse2,
    mul: sse2::mul_sse2,
    mul_scalar: sse2::mul_scalar_sse2,
    neg: sse2::neg_sse2,
    reduce: sse2::reduce_sse2,
};

#[cfg(target_arch = "x86_64")]
static AVX2_KERNELS: Kernels = Kernels {
    add: avx2::add_avx2,
    sub: avx2::sub_avx2,
    mul: avx2::mul_avx2,
    mul_scalar: avx2::mul_scalar_avx2,
    neg: avx2::neg_avx2,
    reduce: avx2::reduce_avx2,
};

static DETECTED: OnceLock<Backend> = OnceLock::new();

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Backend {
    Avx2,
    Sse2,
    Scalar,
}

impl Backend {
    /// Best backend supported by the running cpu. Probed once per process.
    pub fn detect() -> Backend {
        *DETECTED.get_or_init(|| {
            let backend: Backend = [Backend::Avx2, Backend::Sse2]
                .into_iter()
                .find(|b| b.is_available())
                .unwrap_or(Backend::Scalar);
            debug!(?backend, "selected vector backend");
            backend
        })
    }

    pub fn is_available(self) -> bool {
        match self {
            Backend::Scalar => true,
            #[cfg(target_arch = "x86_64")]
            Backend::Sse2 => std::is_x86_feature_detected!("sse2"),
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => std::is_x86_feature_detected!("avx2"),
            #[cfg(not(target_arch = "x86_64"))]
            _ => false,
        }
    }

    /// All backends usable on this cpu, widest first.
    pub fn available() -> Vec<Backend> {
        [Backend::Avx2, Backend::Sse2, Backend::Scalar]
            .into_iter()
            .filter(|b| b.is_available())
            .collect()
    }

    pub const fn lanes(self) -> usize {
        match self {
            Backend::Avx2 => 8,
            Backend::Sse2 => 4,
            Backend::Scalar => 1,
        }
    }

    /// # Panics
    /// Panics if the backend is not compiled for this target.
    pub(crate) fn kernels(self) -> &'static Kernels {
        match self {
            Backend::Scalar => &SCALAR_KERNELS,
            #[cfg(target_arch = "x86_64")]
            Backend::Sse2 => &SSE2_KERNELS,
            #[cfg(target_arch = "x86_64")]
            Backend::Avx2 => &AVX2_KERNELS,
            #[cfg(not(target_arch = "x86_64"))]
            b => panic!("backend {b:?} is not compiled for this target"),
        }
    }
}
