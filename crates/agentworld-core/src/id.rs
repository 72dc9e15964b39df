//! Strongly-typed identifiers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`EntityId`] allocation.
static ENTITY_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Identity of a physical object.
///
/// Allocated from a monotonic atomic counter when an [`Entity`](crate::Entity)
/// is created. Two distinct entities never share an ID, so environments
/// compare entities by ID rather than by value. Cloning an entity preserves
/// its ID: a clone is the *same* thing, and inserting it next to the
/// original is a duplicate insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// Allocate a fresh, unique entity ID. Thread-safe.
    pub fn next() -> Self {
        Self(ENTITY_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonically increasing tick counter.
///
/// Incremented each time an environment completes one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
