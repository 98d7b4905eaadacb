//! # Rendezvous
//!
//! A minimal two-peer rendezvous service. Each of exactly two devices
//! reports its local network address under a fixed slot id (0 or 1), and
//! the service answers with the address most recently reported by the
//! other slot. That is the whole protocol: enough for two peers behind
//! the same router to find each other for a direct connection, with no
//! directory, no NAT traversal, and no persistence.
//!
//! The state lives in a single in-memory [`SlotRegistry`]; correctness
//! requires running exactly one server process.

pub mod error;
pub mod registry;
pub mod server;

pub use error::RegistryError;
pub use registry::{SlotRegistry, SENTINEL_ADDR};

/// Library version reported by the health probe.
pub const VERSION: &str = "0.1.0";
