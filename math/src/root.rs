//! Randomized search for primitive roots of unity.

use pir_sampling::Source;
use tracing::{debug, warn};

use crate::error::FieldError;
use crate::field::PrimeField;
use crate::modulus::WordOps;
use crate::validate;

/// Returns a primitive n-th root of unity modulo q, for n dividing q - 1.
///
/// Draws alpha uniformly from [1, q), sets beta = alpha^((q-1)/n) and accepts
/// beta if beta^k != 1 for every k in [1, n). Gives up after `max_attempts`
/// candidates. The check costs O(n) multiplications per candidate.
pub fn primitive_root_of_unity(
    field: &PrimeField,
    n: u32,
    source: &mut Source,
    max_attempts: usize,
) -> Result<u32, FieldError> {
    let q: u32 = field.q();
    validate::check_modulus(q)?;
    if n == 0 || (q - 1) % n != 0 {
        return Err(FieldError::OrderNotDividing { n: n as usize, q });
    }

    let exponent: u64 = ((q - 1) / n) as u64;
    let max: u32 = q - 1;
    let mask: u32 = max.mask();

    for attempt in 1..=max_attempts {
        let alpha: u32 = 1 + source.next_u32n(max, mask);
        let beta: u32 = field.pow(alpha, exponent);
        if has_order(field, beta, n) {
            debug!(q, n, attempt, root = beta, "found primitive root of unity");
            return Ok(beta);
        }
    }

    warn!(q, n, max_attempts, "primitive root search exhausted");
    Err(FieldError::RootSearchExhausted {
        n,
        q,
        attempts: max_attempts,
    })
}

/// Whether no power beta^k with k in [1, n) equals 1, given beta^n = 1.
fn has_order(field: &PrimeField, beta: u32, n: u32) -> bool {
    let mut acc: u32 = 1;
    for _ in 1..n {
        acc = field.mul(acc, beta);
        if acc == 1 {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_ROOT_ATTEMPTS;

    fn order(field: &PrimeField, x: u32) -> u32 {
        let mut acc: u32 = x;
        let mut k: u32 = 1;
        while acc != 1 {
            acc = field.mul(acc, x);
            k += 1;
        }
        k
    }

    #[test]
    fn finds_roots_of_exact_order() {
        let mut source: Source = Source::new([0u8; 32]);
        for (q, n) in [(65537, 16), (65537, 2), (17, 16), (17, 4), (12289, 1024), (998244353, 64), (7, 3), (7, 6)] {
            let field: PrimeField = PrimeField::new(q);
            let root: u32 = primitive_root_of_unity(&field, n, &mut source, DEFAULT_MAX_ROOT_ATTEMPTS).unwrap();
            assert!(root < q);
            assert_eq!(order(&field, root), n, "q={q} n={n}");
        }
    }

    #[test]
    fn order_two_is_minus_one() {
        let field: PrimeField = PrimeField::new(65537);
        let mut source: Source = Source::new([5u8; 32]);
        for _ in 0..16 {
            assert_eq!(primitive_root_of_unity(&field, 2, &mut source, 64).unwrap(), 65536);
        }
    }

    #[test]
    fn order_one_is_one() {
        let field: PrimeField = PrimeField::new(17);
        let mut source: Source = Source::new([0u8; 32]);
        assert_eq!(primitive_root_of_unity(&field, 1, &mut source, 1).unwrap(), 1);
    }

    #[test]
    fn non_dividing_order() {
        let field: PrimeField = PrimeField::new(17);
        let mut source: Source = Source::new([0u8; 32]);
        assert!(matches!(
            primitive_root_of_unity(&field, 32, &mut source, 16),
            Err(FieldError::OrderNotDividing { n: 32, q: 17 })
        ));
        assert!(matches!(
            primitive_root_of_unity(&field, 0, &mut source, 16),
            Err(FieldError::OrderNotDividing { n: 0, q: 17 })
        ));
    }

    #[test]
    fn bounded_search() {
        let field: PrimeField = PrimeField::new(65537);
        let mut source: Source = Source::new([0u8; 32]);
        assert!(matches!(
            primitive_root_of_unity(&field, 16, &mut source, 0),
            Err(FieldError::RootSearchExhausted { n: 16, q: 65537, attempts: 0 })
        ));
    }

    #[test]
    fn deterministic_for_a_seed() {
        let field: PrimeField = PrimeField::new(998244353);
        let a: u32 = primitive_root_of_unity(&field, 1 << 10, &mut Source::new([9u8; 32]), 64).unwrap();
        let b: u32 = primitive_root_of_unity(&field, 1 << 10, &mut Source::new([9u8; 32]), 64).unwrap();
        assert_eq!(a, b);
    }
}
