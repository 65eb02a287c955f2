//! Deterministic sources of uniform randomness for the PIR field kernel.
//!
//! A [`source::Source`] is a ChaCha8 stream seeded by 32 bytes: two sources
//! built from the same seed produce the same field elements.

pub mod source;

pub use source::{Source, new_seed};
