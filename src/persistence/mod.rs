//! Save/load persistence with integrity verification
//!
//! Features:
//! - Versioned JSON envelope
//! - Atomic writes (tmp then rename) with backup rotation
//! - Corruption detection and recovery from the previous save
//! - LocalStorage backend on wasm32

pub mod envelope;
pub mod store;

pub use envelope::{Envelope, EnvelopeError, SAVE_VERSION};
pub use store::{Store, StoreError};
