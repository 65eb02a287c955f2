use crate::backend::Backend;
use crate::error::FieldError;
use crate::modulus::FermatReduction;

/// Default bound on the number of candidates drawn by the root search.
pub const DEFAULT_MAX_ROOT_ATTEMPTS: usize = 1 << 12;

/// Tunables of a [`crate::field::PrimeField`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Forces a backend. `None` selects the best one supported by the cpu.
    pub backend: Option<Backend>,
    pub fermat_reduction: FermatReduction,
    pub max_root_attempts: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: None,
            fermat_reduction: FermatReduction::Fast,
            max_root_attempts: DEFAULT_MAX_ROOT_ATTEMPTS,
        }
    }
}

impl Config {
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn with_fermat_reduction(mut self, reduction: FermatReduction) -> Self {
        self.fermat_reduction = reduction;
        self
    }

    pub fn with_max_root_attempts(mut self, attempts: usize) -> Self {
        self.max_root_attempts = attempts;
        self
    }

    /// Returns the forced backend if it is usable, else the detected one.
    pub fn resolve_backend(&self) -> Result<Backend, FieldError> {
        match self.backend {
            Some(backend) if backend.is_available() => Ok(backend),
            Some(backend) => Err(FieldError::BackendUnavailable(backend)),
            None => Ok(Backend::detect()),
        }
    }
}
