//! Listeners notified of world mutations.

use agentworld_core::Entity;

/// A notification sink for entity moves, additions, and deletions.
///
/// Observers are called synchronously, in registration order, after the
/// mutation has been applied. The environment ignores anything an observer
/// does; a panicking observer is the observer's problem.
///
/// Every method has an empty default so observers implement only what
/// they need.
pub trait Observer<L> {
    /// `entity` now sits at its new location.
    fn thing_moved(&mut self, _entity: &Entity<L>) {}

    /// `entity` was added at `location`.
    fn thing_added(&mut self, _entity: &Entity<L>, _location: &L) {}

    /// `entity` was removed; it still reports its last location.
    fn thing_deleted(&mut self, _entity: &Entity<L>) {}
}
