//! Error types for the rendezvous core.

use thiserror::Error;

/// Errors returned by the slot registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The caller supplied a slot id outside `{0, 1}`.
    #[error("Invalid slot id {slot}: must be 0 or 1")]
    InvalidSlot { slot: i64 },
}
