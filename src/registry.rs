//! Two-slot address registry — the core of the rendezvous exchange.
//!
//! Exactly two peers participate. Each reports its local address under a
//! fixed slot id (0 or 1) and receives back whatever address the *other*
//! slot last reported. Before a peer has reported, its slot holds the
//! sentinel [`SENTINEL_ADDR`].
//!
//! The registry lives for the process lifetime and is shared across all
//! request handlers; there is no persistence across restarts. If the
//! deployment runs multiple server processes, each holds an independent
//! registry — correctness requires exactly one process instance.

use parking_lot::Mutex;

use crate::error::RegistryError;

/// Address stored for a slot whose peer has not reported yet, and
/// substituted when a peer reports an empty address.
pub const SENTINEL_ADDR: &str = "0.0.0.0";

/// Last-known address for each of the two peer slots.
///
/// Addresses are opaque strings: stored and returned verbatim, never parsed
/// or validated as IPs.
pub struct SlotRegistry {
    slots: Mutex<[String; 2]>,
}

impl SlotRegistry {
    /// Create a registry with both slots holding the sentinel address.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new([SENTINEL_ADDR.to_string(), SENTINEL_ADDR.to_string()]),
        }
    }

    /// Record `address` for `slot` and return the other slot's current
    /// address.
    ///
    /// The write and the read happen under a single lock acquisition, so a
    /// concurrent `update` can never interleave between them. An empty
    /// `address` is stored as [`SENTINEL_ADDR`]. A `slot` outside `{0, 1}`
    /// fails with [`RegistryError::InvalidSlot`] and leaves both slots
    /// untouched.
    pub fn update(&self, slot: i64, address: &str) -> Result<String, RegistryError> {
        let index = match slot {
            0 | 1 => slot as usize,
            _ => return Err(RegistryError::InvalidSlot { slot }),
        };

        let stored = if address.is_empty() {
            SENTINEL_ADDR.to_string()
        } else {
            address.to_string()
        };

        let mut slots = self.slots.lock();
        slots[index] = stored;
        Ok(slots[1 - index].clone())
    }
}

impl Default for SlotRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_fresh_registry_returns_sentinel() {
        let registry = SlotRegistry::new();
        assert_eq!(registry.update(0, "1.2.3.4").unwrap(), SENTINEL_ADDR);
    }

    #[test]
    fn test_symmetry() {
        let registry = SlotRegistry::new();
        registry.update(0, "A").unwrap();
        registry.update(1, "B").unwrap();
        assert_eq!(registry.update(0, "C").unwrap(), "B");
        assert_eq!(registry.update(1, "D").unwrap(), "C");
    }

    #[test]
    fn test_repeated_update_leaves_other_slot_unchanged() {
        let registry = SlotRegistry::new();
        registry.update(1, "B").unwrap();
        assert_eq!(registry.update(0, "A").unwrap(), "B");
        assert_eq!(registry.update(0, "A").unwrap(), "B");
    }

    #[test]
    fn test_empty_address_stores_sentinel() {
        let registry = SlotRegistry::new();
        registry.update(1, "").unwrap();
        assert_eq!(registry.update(0, "1.2.3.4").unwrap(), SENTINEL_ADDR);
    }

    #[test]
    fn test_invalid_slot_rejected_without_state_change() {
        let registry = SlotRegistry::new();
        registry.update(0, "A").unwrap();
        registry.update(1, "B").unwrap();

        assert_eq!(
            registry.update(2, "X"),
            Err(RegistryError::InvalidSlot { slot: 2 })
        );
        assert_eq!(
            registry.update(-1, "X"),
            Err(RegistryError::InvalidSlot { slot: -1 })
        );

        // Both slots still hold their pre-error values.
        assert_eq!(registry.update(0, "A").unwrap(), "B");
        assert_eq!(registry.update(1, "B").unwrap(), "A");
    }

    #[test]
    fn test_exchange_sequence() {
        let registry = SlotRegistry::new();
        assert_eq!(registry.update(0, "10.0.0.5").unwrap(), "0.0.0.0");
        assert_eq!(registry.update(1, "10.0.0.9").unwrap(), "10.0.0.5");
        assert_eq!(registry.update(0, "10.0.0.6").unwrap(), "10.0.0.9");
    }

    #[test]
    fn test_concurrent_updates_never_tear() {
        let registry = Arc::new(SlotRegistry::new());
        let threads = 8;
        let rounds = 200;

        // Every value any thread will ever write, plus the sentinel. A
        // returned address outside this set would mean a torn read.
        let mut valid: HashSet<String> = HashSet::new();
        valid.insert(SENTINEL_ADDR.to_string());
        for t in 0..threads {
            for r in 0..rounds {
                valid.insert(format!("10.0.{}.{}", t, r));
            }
        }

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    let slot = (t % 2) as i64;
                    (0..rounds)
                        .map(|r| registry.update(slot, &format!("10.0.{}.{}", t, r)).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            for returned in handle.join().unwrap() {
                assert!(valid.contains(&returned), "torn read: {:?}", returned);
            }
        }
    }
}
