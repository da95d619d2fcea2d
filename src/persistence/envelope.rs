//! Versioned JSON envelope around persisted payloads
//!
//! Every save file carries a format version so corrupt files and saves
//! written by a newer build are detected instead of mis-read.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("malformed save data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("save data version {0} is newer than supported version {SAVE_VERSION}")]
    UnknownVersion(u32),
}

/// A payload wrapped with its format version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub version: u32,
    pub payload: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn wrap(payload: T) -> Self {
        Self {
            version: SAVE_VERSION,
            payload,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Parse an envelope and hand back its payload after the version check.
pub fn open<T: DeserializeOwned>(json: &str) -> Result<T, EnvelopeError> {
    let envelope: Envelope<T> = serde_json::from_str(json)?;
    if envelope.version > SAVE_VERSION {
        return Err(EnvelopeError::UnknownVersion(envelope.version));
    }
    Ok(envelope.payload)
}
