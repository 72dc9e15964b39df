//! agentworld: a small agent-environment simulation scaffold.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the agentworld sub-crates. For most users, adding `agentworld` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use agentworld::prelude::*;
//!
//! let mut env: GridEnvironment = GridEnvironment::new(GridConfig {
//!     width: 6,
//!     height: 6,
//!     ..GridConfig::default()
//! })
//! .unwrap();
//! env.add_walls();
//!
//! let walker = env
//!     .add_program(
//!         |seen: &GridPercept| {
//!             if seen.iter().any(|n| n.obstacle) {
//!                 GridAction::TurnRight
//!             } else {
//!                 GridAction::Forward
//!             }
//!         },
//!         Some(Point::new(1, 1)),
//!     )
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(env.run(10), 10);
//! let at = env.world().thing(walker).unwrap().location().copied().unwrap();
//! assert!(env.is_inbounds(at));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `agentworld-core` | IDs, points, directions, entities, agents, programs |
//! | [`env`] | `agentworld-env` | Environment driver, world storage, grid environment |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core value types and agent programs (`agentworld-core`).
///
/// Contains [`types::Entity`], [`types::AgentState`], [`types::Direction`],
/// and the [`types::Program`] trait with its ready-made implementations.
pub use agentworld_core as types;

/// Environments (`agentworld-env`).
///
/// The [`env::Environment`] trait drives simulations;
/// [`env::GridEnvironment`] is the bundled 2D world.
pub use agentworld_env as env;

/// Common imports for typical agentworld usage.
///
/// ```rust
/// use agentworld::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use agentworld_core::{
        AgentBuilder, AgentState, Direction, Entity, EntityId, EntityKind, Point, Thing, TickId,
        Turn,
    };

    // Programs
    pub use agentworld_core::{Program, RandomProgram, Rule, SimpleReflexProgram, TraceProgram};

    // Environments
    pub use agentworld_env::{
        Environment, GridAction, GridConfig, GridEnvironment, GridPercept, Nearby, Observer,
        Placement, ThingFilter, World,
    };

    // Errors
    pub use agentworld_core::{AgentError, ParseError};
    pub use agentworld_env::{ConfigError, GridError, WorldError};
}
