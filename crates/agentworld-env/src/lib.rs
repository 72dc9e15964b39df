//! Environment driver and 2D grid environment for agentworld simulations.
//!
//! The [`Environment`] trait owns the perceive-then-act stepping protocol:
//! every live agent's action for a tick is decided against the same world
//! state before any action is applied. [`GridEnvironment`] is the concrete
//! bounded 2D world with headings, obstacle collision, held-object
//! transport, perimeter walls, and observer notification.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod config;
pub mod environment;
pub mod error;
pub mod grid;
pub mod observer;
pub mod world;

pub use action::GridAction;
pub use config::{GridConfig, Placement};
pub use environment::Environment;
pub use error::{ConfigError, GridError, WorldError};
pub use grid::{Bounds, GridEnvironment, GridPercept, Nearby};
pub use observer::Observer;
pub use world::{ThingFilter, World};
