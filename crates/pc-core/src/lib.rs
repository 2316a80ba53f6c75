//! pc-core: shared numeric guards.
//!
//! Published values must be finite; formulas that can misbehave carry their
//! own domain checks, and this crate holds the last-line guard the engine
//! applies before publishing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PcError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },
}

/// Pass a finite value through, reject NaN and infinities.
pub fn ensure_finite(v: f64, what: &'static str) -> Result<f64, PcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PcError::NonFinite { what, value: v })
    }
}
