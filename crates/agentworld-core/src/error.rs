//! Error types for core value parsing and agent construction.

use crate::entity::EntityKind;

/// Errors from parsing headings, turns, and actions from text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The text does not name a heading.
    #[error("unknown direction '{input}' (expected right, left, up or down)")]
    UnknownDirection {
        /// The rejected input.
        input: String,
    },
    /// The text does not name a relative turn.
    #[error("unknown turn '{input}' (expected right or left)")]
    UnknownTurn {
        /// The rejected input.
        input: String,
    },
    /// The text does not name an action.
    #[error("unknown action '{input}'")]
    UnknownAction {
        /// The rejected input.
        input: String,
    },
}

/// Errors from building an agent.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    /// No decision program was supplied and the interactive fallback
    /// was not enabled.
    #[error("no program supplied for agent of kind '{kind}'")]
    MissingProgram {
        /// Kind of the agent being built.
        kind: EntityKind,
    },
}
