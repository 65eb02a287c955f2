//! Finite-field kernel for private information retrieval: vectorized arithmetic modulo a
//! 32-bit prime, number-theoretic transforms and cyclic convolution.
//!
//! [`field::PrimeField`] is the arithmetic context. It classifies its modulus
//! (the Fermat primes 3, 5, 17, 257 and 65537 get a shift-and-subtract
//! reduction) and binds a kernel [`backend::Backend`] detected once per process.
//! [`api`] exposes the canonical operations over plain `u32` buffers, in an
//! unchecked and a checked (`try_*`) flavor.
//!
//! ```
//! use pir_math::api::{field_mul_vector, intt, ntt};
//!
//! let mut dst = vec![0u32; 4];
//! field_mul_vector(&mut dst, &[65536, 1, 2, 3], 2, 65537);
//! assert_eq!(dst, [65535, 2, 4, 6]);
//!
//! let mut a = vec![1u32, 2, 3, 4];
//! ntt(&mut a, 4, 17).unwrap();
//! assert_eq!(a, [10, 7, 15, 6]);
//! intt(&mut a, 4, 17).unwrap();
//! assert_eq!(a, [1, 2, 3, 4]);
//! ```

pub mod api;
pub mod backend;
pub mod config;
pub mod convolution;
pub mod dft;
pub mod error;
pub mod field;
pub mod modulus;
pub mod permutation;
pub mod root;
pub mod validate;

pub use backend::Backend;
pub use config::Config;
pub use error::FieldError;
pub use field::PrimeField;
pub use modulus::{FermatReduction, Modulus, ModulusKind, ScalarOperations, VectorOperations};
