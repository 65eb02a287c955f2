//! Bit-reversal permutations, built once per length and shared process-wide.

use std::sync::{Mutex, OnceLock, PoisonError};

use itertools::izip;
use tracing::debug;

use crate::error::FieldError;

/// Number of cache keys: tables exist for n = 2^0 .. 2^31.
const SLOTS: usize = 32;

static CACHE: BitReversalCache = BitReversalCache::new();

/// The process-wide cache used by the transforms.
pub fn bit_reversal_cache() -> &'static BitReversalCache {
    &CACHE
}

/// Map from log2(n) to the immutable bit-reversal table of length n.
///
/// Lookups of a populated key take no lock. Populating a key holds that key's
/// mutex only, so concurrent first uses of different lengths do not contend
/// and each table is built exactly once.
pub struct BitReversalCache {
    tables: [OnceLock<Box<[u32]>>; SLOTS],
    building: [Mutex<()>; SLOTS],
}

impl Default for BitReversalCache {
    fn default() -> Self {
        Self::new()
    }
}

impl BitReversalCache {
    pub const fn new() -> Self {
        Self {
            tables: [const { OnceLock::new() }; SLOTS],
            building: [const { Mutex::new(()) }; SLOTS],
        }
    }

    fn slot(n: usize) -> Result<usize, FieldError> {
        if !n.is_power_of_two() {
            return Err(FieldError::NotPowerOfTwo { len: n });
        }
        let log_n: usize = n.trailing_zeros() as usize;
        if log_n >= SLOTS {
            return Err(FieldError::TooLong { len: n, max: 1 << (SLOTS - 1) });
        }
        Ok(log_n)
    }

    pub fn is_cached(&self, n: usize) -> bool {
        Self::slot(n).is_ok_and(|log_n| self.tables[log_n].get().is_some())
    }

    /// Returns the table of length n, building it on first use.
    pub fn get_or_build(&self, n: usize) -> Result<&[u32], FieldError> {
        let log_n: usize = Self::slot(n)?;
        if let Some(table) = self.tables[log_n].get() {
            return Ok(table);
        }
        let _guard = self.building[log_n].lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = self.tables[log_n].get() {
            return Ok(table);
        }
        let table: Box<[u32]> = build(n)?;
        debug!(n, log_n, "built bit-reversal table");
        Ok(self.tables[log_n].get_or_init(|| table))
    }

    /// Permutes `a` in place: `a[i] <- a[perm[i]]`.
    pub fn apply<T: Copy>(&self, a: &mut [T]) -> Result<(), FieldError> {
        let perm: &[u32] = self.get_or_build(a.len())?;
        let mut scratch: Vec<T> = Vec::new();
        scratch.try_reserve_exact(a.len())?;
        scratch.extend_from_slice(a);
        izip!(a.iter_mut(), perm.iter()).for_each(|(x, &j)| *x = scratch[j as usize]);
        Ok(())
    }
}

/// perm[i] is i with its log2(n) low bits reversed. Built by doubling: the
/// entries [j, 2j) are the entries [0, j) plus the weight n/(2j) of the newly
/// reversed bit.
fn build(n: usize) -> Result<Box<[u32]>, FieldError> {
    let mut perm: Vec<u32> = Vec::new();
    perm.try_reserve_exact(n)?;
    perm.resize(n, 0);
    let mut j: usize = 1;
    while j < n {
        let weight: u32 = (n / (2 * j)) as u32;
        for i in j..2 * j {
            perm[i] = perm[i - j] + weight;
        }
        j <<= 1;
    }
    Ok(perm.into_boxed_slice())
}
