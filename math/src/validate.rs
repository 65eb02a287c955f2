//! Precondition checks run by the checked entry points before the hot paths.

use crate::error::FieldError;
use crate::modulus::Modulus;

pub fn check_modulus(q: u32) -> Result<(), FieldError> {
    if q < 2 {
        return Err(FieldError::InvalidModulus { q });
    }
    Ok(())
}

pub fn check_power_of_two(len: usize) -> Result<(), FieldError> {
    if !len.is_power_of_two() {
        return Err(FieldError::NotPowerOfTwo { len });
    }
    Ok(())
}

pub fn check_len(expected: usize, got: usize) -> Result<(), FieldError> {
    if expected != got {
        return Err(FieldError::LengthMismatch { expected, got });
    }
    Ok(())
}

/// Fails on the first element not in [0, q).
pub fn check_reduced(a: &[u32], q: u32) -> Result<(), FieldError> {
    match a.iter().position(|&x| x >= q) {
        Some(index) => Err(FieldError::Unreduced { index, value: a[index], q }),
        None => Ok(()),
    }
}

/// Checks that `root` is a primitive n-th root of unity modulo q for a
/// power-of-two n dividing q - 1.
pub fn check_transform(q: u32, n: usize, root: u32) -> Result<(), FieldError> {
    check_modulus(q)?;
    check_power_of_two(n)?;
    if (q - 1) as usize % n != 0 {
        return Err(FieldError::OrderNotDividing { n, q });
    }
    if root >= q {
        return Err(FieldError::Unreduced { index: 0, value: root, q });
    }
    let m: Modulus = Modulus::new(q);
    let primitive: bool = m.pow(root, n as u64) == 1 && (n == 1 || m.pow(root, (n / 2) as u64) != 1);
    if !primitive {
        return Err(FieldError::NotPrimitiveRoot { root, n, q });
    }
    Ok(())
}
