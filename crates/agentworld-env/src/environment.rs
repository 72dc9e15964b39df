//! The environment driver: percepts, actions, and the stepping protocol.

use std::fmt;

use agentworld_core::{Entity, EntityId, EntityKind, Program, Thing};

use crate::error::WorldError;
use crate::world::{ThingFilter, World};

/// A world of entities driven one tick at a time.
///
/// Implementors supply storage ([`world`](Environment::world)), the percept
/// an agent receives ([`percept`](Environment::percept)), and the effect of
/// an action ([`execute_action`](Environment::execute_action)). Stepping,
/// termination, and entity bookkeeping come as provided methods.
///
/// # Simultaneity
///
/// [`step`](Environment::step) decides every live agent's action against
/// the same world state before applying any of them. Actions are then
/// applied in agent insertion order. An agent deleted by an earlier action
/// in the same tick is skipped.
///
/// # Examples
///
/// ```
/// use agentworld_core::EntityId;
/// use agentworld_env::{Environment, World};
///
/// #[derive(Default)]
/// struct Counter {
///     world: World<i32, i32, i32>,
/// }
///
/// impl Environment for Counter {
///     type Location = i32;
///     type Percept = i32;
///     type Action = i32;
///
///     fn world(&self) -> &World<i32, i32, i32> { &self.world }
///     fn world_mut(&mut self) -> &mut World<i32, i32, i32> { &mut self.world }
///
///     fn percept(&self, agent: EntityId) -> i32 {
///         self.world.thing(agent).and_then(|e| e.location().copied()).unwrap_or(0)
///     }
///
///     fn execute_action(&mut self, agent: EntityId, action: i32) {
///         if let Some(e) = self.world.thing_mut(agent) {
///             let at = e.location().copied().unwrap_or(0);
///             e.set_location(at + action);
///         }
///     }
/// }
///
/// let mut env = Counter::default();
/// let id = env.add_program(|_: &i32| 2, Some(0)).unwrap().unwrap();
/// assert_eq!(env.run(5), 5);
/// assert_eq!(env.world().thing(id).unwrap().location(), Some(&10));
/// ```
pub trait Environment {
    /// Coordinate type of entity locations.
    type Location: Clone + PartialEq + fmt::Debug;
    /// What an agent observes.
    type Percept;
    /// What an agent does. `Default` is the no-op given to dead agents.
    type Action: Default;

    /// Entity and agent storage.
    fn world(&self) -> &World<Self::Location, Self::Percept, Self::Action>;

    /// Mutable entity and agent storage.
    fn world_mut(&mut self) -> &mut World<Self::Location, Self::Percept, Self::Action>;

    /// The percept `agent` receives in the current state.
    fn percept(&self, agent: EntityId) -> Self::Percept;

    /// Apply `action` on behalf of `agent`.
    fn execute_action(&mut self, agent: EntityId, action: Self::Action);

    /// Kinds of entity this environment admits. Informational.
    fn thing_kinds(&self) -> &[EntityKind] {
        &[]
    }

    /// Where `thing` is placed when added without a location.
    fn default_location(&mut self, _thing: &Entity<Self::Location>) -> Option<Self::Location> {
        None
    }

    /// World-driven change applied after every agent has acted.
    fn exogenous_change(&mut self) {}

    /// Whether the simulation should stop. Default: no agent is alive.
    fn is_done(&self) -> bool {
        self.world().is_done()
    }

    /// Run one tick: decide all actions, then apply all actions, then apply
    /// the exogenous change. Does nothing once [`is_done`](Self::is_done).
    fn step(&mut self) {
        if self.is_done() {
            return;
        }
        let ids = self.world().agent_ids();
        tracing::debug!(
            tick = %self.world().tick(),
            agents = ids.len(),
            live = self.world().live_agents(),
            "step"
        );

        let mut actions = Vec::with_capacity(ids.len());
        for &id in &ids {
            let alive = self.world().thing(id).is_some_and(Entity::is_alive);
            let action = if alive {
                let percept = self.percept(id);
                self.world_mut()
                    .agent_mut(id)
                    .map(|agent| agent.decide(&percept))
                    .unwrap_or_default()
            } else {
                Self::Action::default()
            };
            actions.push((id, action));
        }

        for (id, action) in actions {
            if self.world().contains(id) {
                self.execute_action(id, action);
            }
        }

        self.exogenous_change();
        self.world_mut().advance_tick();
    }

    /// Step until done or `max_steps` ticks have run. Returns the number of
    /// ticks run. `is_done` is checked before every step, the first included.
    fn run(&mut self, max_steps: u64) -> u64 {
        let mut steps = 0;
        while steps < max_steps && !self.is_done() {
            self.step();
            steps += 1;
        }
        steps
    }

    /// Add `thing` at `location`, or at the
    /// [`default_location`](Self::default_location) if `None`.
    ///
    /// Returns `Ok(None)` when the environment declines the placement.
    /// Adding a thing that is already present is reported and skipped.
    fn add_thing(
        &mut self,
        thing: Thing<Self::Location, Self::Percept, Self::Action>,
        location: Option<Self::Location>,
    ) -> Result<Option<EntityId>, WorldError> {
        let location = match location {
            Some(location) => Some(location),
            None => self.default_location(&thing.entity),
        };
        self.world_mut().insert(thing, location).map(Some)
    }

    /// Wrap a bare decision program in a default agent and add it.
    fn add_program(
        &mut self,
        program: impl Program<Self::Percept, Self::Action> + 'static,
        location: Option<Self::Location>,
    ) -> Result<Option<EntityId>, WorldError>
    where
        Self: Sized,
    {
        self.add_thing(Thing::from_program(program), location)
    }

    /// Remove `id`, returning it with its last location.
    fn delete_thing(
        &mut self,
        id: EntityId,
    ) -> Result<Thing<Self::Location, Self::Percept, Self::Action>, WorldError> {
        self.world_mut().remove(id)
    }

    /// Entities at `location` passing `filter`.
    fn list_things_at(
        &self,
        location: &Self::Location,
        filter: ThingFilter,
    ) -> Vec<&Entity<Self::Location>> {
        self.world().list_things_at(location, filter)
    }

    /// Whether any entity at `location` passes `filter`.
    fn some_things_at(&self, location: &Self::Location, filter: ThingFilter) -> bool {
        self.world().some_things_at(location, filter)
    }

    /// Every entity, in insertion order.
    fn things(&self) -> Vec<&Entity<Self::Location>> {
        self.world().things().collect()
    }
}
