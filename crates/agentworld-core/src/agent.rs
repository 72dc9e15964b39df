//! The agent component attached to an entity.

use std::fmt;

use smallvec::SmallVec;

use crate::direction::{Direction, Turn};
use crate::id::EntityId;
use crate::program::Program;

/// Behaviour and bookkeeping that turn an [`Entity`](crate::Entity) into an
/// agent.
///
/// Holds the decision program, the collision flag of the last action cycle,
/// the ordered list of held entities (most recent last), the performance
/// accumulator, and the heading used by directional environments.
pub struct AgentState<P, A> {
    program: Box<dyn Program<P, A>>,
    collided: bool,
    holding: SmallVec<[EntityId; 4]>,
    performance: f64,
    heading: Direction,
}

impl<P, A> AgentState<P, A> {
    /// A fresh agent state driven by `program`, facing right.
    pub fn new(program: impl Program<P, A> + 'static) -> Self {
        Self::from_boxed(Box::new(program))
    }

    /// A fresh agent state from an already boxed program.
    pub fn from_boxed(program: Box<dyn Program<P, A>>) -> Self {
        Self {
            program,
            collided: false,
            holding: SmallVec::new(),
            performance: 0.0,
            heading: Direction::Right,
        }
    }

    /// Run the decision program on `percept`.
    pub fn decide(&mut self, percept: &P) -> A {
        self.program.decide(percept)
    }

    /// Swap in a different program, returning the old one.
    pub fn replace_program(&mut self, program: Box<dyn Program<P, A>>) -> Box<dyn Program<P, A>> {
        std::mem::replace(&mut self.program, program)
    }

    /// Whether the last action bumped into an obstacle.
    pub fn collided(&self) -> bool {
        self.collided
    }

    /// Set the collision flag.
    pub fn set_collided(&mut self, collided: bool) {
        self.collided = collided;
    }

    /// Held entities, oldest first.
    pub fn holding(&self) -> &[EntityId] {
        &self.holding
    }

    /// Whether `id` is among the held entities.
    pub fn is_holding(&self, id: EntityId) -> bool {
        self.holding.contains(&id)
    }

    /// Pick up `id`. Already-held entities are not added twice.
    pub fn hold(&mut self, id: EntityId) {
        if !self.holding.contains(&id) {
            self.holding.push(id);
        }
    }

    /// Put down the most recently held entity.
    pub fn release(&mut self) -> Option<EntityId> {
        self.holding.pop()
    }

    /// Forget `id` wherever it sits in the held list.
    pub fn drop_held(&mut self, id: EntityId) -> bool {
        let before = self.holding.len();
        self.holding.retain(|held| *held != id);
        self.holding.len() != before
    }

    /// Empty the held list, returning what was held.
    pub fn take_holding(&mut self) -> SmallVec<[EntityId; 4]> {
        std::mem::take(&mut self.holding)
    }

    /// Performance measure.
    pub fn performance(&self) -> f64 {
        self.performance
    }

    /// Overwrite the performance measure.
    pub fn set_performance(&mut self, performance: f64) {
        self.performance = performance;
    }

    /// Add `delta` to the performance measure.
    pub fn add_performance(&mut self, delta: f64) {
        self.performance += delta;
    }

    /// Current heading.
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Face `heading`.
    pub fn set_heading(&mut self, heading: Direction) {
        self.heading = heading;
    }

    /// Rotate the heading by one quarter turn.
    pub fn turn(&mut self, turn: Turn) {
        self.heading += turn;
    }
}

impl<P, A> fmt::Debug for AgentState<P, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentState")
            .field("collided", &self.collided)
            .field("holding", &self.holding)
            .field("performance", &self.performance)
            .field("heading", &self.heading)
            .finish_non_exhaustive()
    }
}
