//! Core types and traits for the agentworld simulation scaffold.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! vocabulary shared by every environment: entity identities and records,
//! the agent component, headings and grid points, decision programs, and
//! the error types raised while building them.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod direction;
pub mod entity;
pub mod error;
pub mod id;
pub mod point;
pub mod program;
pub mod thing;

pub use agent::AgentState;
pub use direction::{Direction, Turn};
pub use entity::{Entity, EntityKind};
pub use error::{AgentError, ParseError};
pub use id::{EntityId, TickId};
pub use point::Point;
pub use program::{
    InteractiveProgram, ModelBasedReflexProgram, Program, RandomProgram, Rule,
    SimpleReflexProgram, TableDrivenProgram, TraceProgram,
};
pub use thing::{AgentBuilder, Thing};
