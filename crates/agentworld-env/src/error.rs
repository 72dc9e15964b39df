//! Error types for environments.
//!
//! Two classes live here. [`ConfigError`] is fatal and raised at
//! construction. [`WorldError`] and [`GridError`] describe conditions the
//! environment reports and then carries on from; callers may ignore them.

use agentworld_core::{EntityId, Point};

/// Non-fatal conditions raised by entity bookkeeping.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The entity is already in the environment; the insertion was skipped.
    #[error("can't add the same thing twice: {id} is already present")]
    AlreadyPresent {
        /// The duplicated entity.
        id: EntityId,
    },
    /// The entity is not in the environment.
    #[error("{id} is not present (last seen at {last_location:?}); {present} things remain")]
    NotPresent {
        /// The missing entity.
        id: EntityId,
        /// Where the entity was when it was last removed, if it ever was.
        last_location: Option<String>,
        /// How many things are currently in the environment.
        present: usize,
    },
}

/// Non-fatal conditions raised by grid queries.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// The active bounds contain no cells.
    #[error("active bounds contain no cells")]
    EmptyBounds,
    /// The only in-bounds cell is the one to avoid.
    #[error("no in-bounds location other than {excluded}")]
    NoAlternativeLocation {
        /// The excluded location.
        excluded: Point,
    },
}

/// Errors detected while validating a [`GridConfig`](crate::GridConfig).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Width or height is zero.
    #[error("grid must have at least one cell, got {width}x{height}")]
    EmptyGrid {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// A dimension does not fit in an `i32` coordinate.
    #[error("{name} {value} exceeds maximum {max}")]
    DimensionTooLarge {
        /// Which dimension.
        name: &'static str,
        /// The configured value.
        value: u32,
        /// The maximum allowed.
        max: u32,
    },
    /// The perception radius does not fit in an `i32` coordinate.
    #[error("perceptible distance {value} exceeds maximum {max}")]
    PerceptionTooLarge {
        /// The configured radius.
        value: u32,
        /// The maximum allowed.
        max: u32,
    },
    /// A fixed default placement lies outside the grid.
    #[error("default placement {location} lies outside the {width}x{height} grid")]
    PlacementOutOfBounds {
        /// The configured placement.
        location: Point,
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
}
