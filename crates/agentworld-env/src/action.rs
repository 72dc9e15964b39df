//! Actions understood by the grid environment.

use std::fmt;
use std::str::FromStr;

use agentworld_core::ParseError;

/// An action an agent may take on a [`GridEnvironment`](crate::GridEnvironment).
///
/// `NoOp` is the default and is what dead agents "choose". `Custom` is an
/// extension point for environments layered on top of the grid; the grid
/// itself ignores it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GridAction {
    /// Do nothing.
    #[default]
    NoOp,
    /// Rotate the heading clockwise.
    TurnRight,
    /// Rotate the heading counter-clockwise.
    TurnLeft,
    /// Step one cell along the heading.
    Forward,
    /// Pick up the first portable thing in the agent's cell.
    Grab,
    /// Put down the most recently held thing.
    Release,
    /// Environment-defined action, ignored by the grid.
    Custom(u32),
}

impl GridAction {
    /// Label used for display and parsing.
    pub const fn label(&self) -> &'static str {
        match self {
            GridAction::NoOp => "NoOp",
            GridAction::TurnRight => "TurnRight",
            GridAction::TurnLeft => "TurnLeft",
            GridAction::Forward => "Forward",
            GridAction::Grab => "Grab",
            GridAction::Release => "Release",
            GridAction::Custom(_) => "Custom",
        }
    }
}

impl fmt::Display for GridAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridAction::Custom(code) => write!(f, "Custom({code})"),
            other => f.write_str(other.label()),
        }
    }
}

impl FromStr for GridAction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let action = match trimmed {
            "" | "NoOp" => GridAction::NoOp,
            "TurnRight" => GridAction::TurnRight,
            "TurnLeft" => GridAction::TurnLeft,
            "Forward" => GridAction::Forward,
            "Grab" => GridAction::Grab,
            "Release" => GridAction::Release,
            other => {
                let code = other
                    .strip_prefix("Custom(")
                    .and_then(|rest| rest.strip_suffix(')'))
                    .and_then(|n| n.parse().ok());
                match code {
                    Some(code) => GridAction::Custom(code),
                    None => {
                        return Err(ParseError::UnknownAction {
                            input: s.to_string(),
                        })
                    }
                }
            }
        };
        Ok(action)
    }
}
