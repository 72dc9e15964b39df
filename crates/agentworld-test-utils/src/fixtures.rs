//! Reusable programs and grid builders.
//!
//! - [`ScriptedProgram`]: plays back a fixed list of actions, then no-ops.
//! - [`ConstProgram`]: always returns the same action.
//! - [`open_grid`] / [`walled_grid`]: default-configured grids.
//! - [`agent_facing`]: a grid agent with a chosen heading.

use std::collections::VecDeque;

use agentworld_core::{Direction, Point, Program, Thing};
use agentworld_env::{ConfigError, GridAction, GridConfig, GridEnvironment, GridPercept};

/// Returns scripted actions in order, then `A::default()` forever.
pub struct ScriptedProgram<A> {
    script: VecDeque<A>,
}

impl<A> ScriptedProgram<A> {
    pub fn new(script: impl IntoIterator<Item = A>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl<P, A: Default> Program<P, A> for ScriptedProgram<A> {
    fn decide(&mut self, _percept: &P) -> A {
        self.script.pop_front().unwrap_or_default()
    }
}

/// Always returns a clone of the same action.
pub struct ConstProgram<A>(pub A);

impl<P, A: Clone> Program<P, A> for ConstProgram<A> {
    fn decide(&mut self, _percept: &P) -> A {
        self.0.clone()
    }
}

/// A `width × height` grid with default settings and the given seed.
pub fn open_grid(width: u32, height: u32, seed: u64) -> Result<GridEnvironment, ConfigError> {
    GridEnvironment::new(GridConfig {
        width,
        height,
        seed,
        ..GridConfig::default()
    })
}

/// [`open_grid`] with perimeter walls installed.
pub fn walled_grid(width: u32, height: u32, seed: u64) -> Result<GridEnvironment, ConfigError> {
    let mut env = open_grid(width, height, seed)?;
    env.add_walls();
    Ok(env)
}

/// A live grid agent facing `heading`, driven by `program`.
pub fn agent_facing(
    heading: Direction,
    program: impl Program<GridPercept, GridAction> + 'static,
) -> Thing<Point, GridPercept, GridAction> {
    let mut thing = Thing::from_program(program);
    if let Some(agent) = thing.agent.as_mut() {
        agent.set_heading(heading);
    }
    thing
}
