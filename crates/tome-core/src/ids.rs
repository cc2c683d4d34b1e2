//! # Identity Generation
//!
//! Customer and order ids come from an [`IdGenerator`] injected at
//! construction, not from a hidden process-wide random source. Production
//! code uses [`UuidGenerator`]; tests use [`SequenceGenerator`] for
//! deterministic, human-readable ids.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// A source of opaque entity ids.
pub trait IdGenerator {
    /// Produces the next unique id.
    fn next_id(&self) -> String;
}

/// Production generator: random UUID v4, globally unique without
/// coordination.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic generator for tests: `<prefix>-1`, `<prefix>-2`, ...
#[derive(Debug)]
pub struct SequenceGenerator {
    prefix: &'static str,
    counter: AtomicU64,
}

impl SequenceGenerator {
    pub fn new(prefix: &'static str) -> Self {
        SequenceGenerator {
            prefix,
            counter: AtomicU64::new(0),
        }
    }
}

impl IdGenerator for SequenceGenerator {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_generator_produces_unique_ids() {
        let ids = UuidGenerator;
        let a = ids.next_id();
        let b = ids.next_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn test_sequence_generator_is_deterministic() {
        let ids = SequenceGenerator::new("cust");
        assert_eq!(ids.next_id(), "cust-1");
        assert_eq!(ids.next_id(), "cust-2");
        assert_eq!(ids.next_id(), "cust-3");
    }
}
