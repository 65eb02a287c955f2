pub mod ntt;

use crate::error::FieldError;

pub trait DFT<O> {
    fn forward_inplace(&self, a: &mut [O]) -> Result<(), FieldError>;
    fn backward_inplace(&self, a: &mut [O]) -> Result<(), FieldError>;
}
