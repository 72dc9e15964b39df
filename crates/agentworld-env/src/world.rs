//! Entity and agent storage shared by every environment.
//!
//! [`World`] keeps the physical records and the agent components in two
//! insertion-ordered maps keyed by [`EntityId`]. An ID is in the agent map
//! only while it is also in the entity map.

use std::fmt;

use agentworld_core::{AgentState, Entity, EntityId, EntityKind, Thing, TickId};
use indexmap::IndexMap;

use crate::error::WorldError;

// ── ThingFilter ─────────────────────────────────────────────────

/// Capability filter for location queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThingFilter {
    /// Every entity.
    #[default]
    Any,
    /// Entities of exactly this kind.
    Kind(EntityKind),
    /// Entities that block movement.
    Obstacles,
    /// Entities with an agent component.
    Agents,
    /// Entities an agent may pick up.
    Portable,
}

// ── World ───────────────────────────────────────────────────────

/// Insertion-ordered store of entities and their agent components.
pub struct World<L, P, A> {
    things: IndexMap<EntityId, Entity<L>>,
    agents: IndexMap<EntityId, AgentState<P, A>>,
    departed: IndexMap<EntityId, Option<L>>,
    tick: TickId,
}

/// How many removed entities keep a last-known location for reports.
/// The oldest is forgotten first.
pub const DEPARTED_CAPACITY: usize = 1024;

impl<L, P, A> Default for World<L, P, A> {
    fn default() -> Self {
        Self {
            things: IndexMap::new(),
            agents: IndexMap::new(),
            departed: IndexMap::new(),
            tick: TickId::default(),
        }
    }
}

impl<L, P, A> World<L, P, A> {
    /// An empty world at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.things.len()
    }

    /// Whether the world holds no entities.
    pub fn is_empty(&self) -> bool {
        self.things.is_empty()
    }

    /// Whether `id` is present.
    pub fn contains(&self, id: EntityId) -> bool {
        self.things.contains_key(&id)
    }

    /// The entity record for `id`.
    pub fn thing(&self, id: EntityId) -> Option<&Entity<L>> {
        self.things.get(&id)
    }

    /// Mutable entity record for `id`.
    pub fn thing_mut(&mut self, id: EntityId) -> Option<&mut Entity<L>> {
        self.things.get_mut(&id)
    }

    /// The agent component for `id`, if `id` is an agent.
    pub fn agent(&self, id: EntityId) -> Option<&AgentState<P, A>> {
        self.agents.get(&id)
    }

    /// Mutable agent component for `id`.
    pub fn agent_mut(&mut self, id: EntityId) -> Option<&mut AgentState<P, A>> {
        self.agents.get_mut(&id)
    }

    /// Whether `id` carries an agent component.
    pub fn is_agent(&self, id: EntityId) -> bool {
        self.agents.contains_key(&id)
    }

    /// Agent IDs in insertion order.
    pub fn agent_ids(&self) -> Vec<EntityId> {
        self.agents.keys().copied().collect()
    }

    /// Entities in insertion order.
    pub fn things(&self) -> impl Iterator<Item = &Entity<L>> + '_ {
        self.things.values()
    }

    /// Agent components in insertion order.
    pub fn agents(&self) -> impl Iterator<Item = (EntityId, &AgentState<P, A>)> + '_ {
        self.agents.iter().map(|(id, a)| (*id, a))
    }

    /// Number of agents whose entity is alive.
    pub fn live_agents(&self) -> usize {
        self.agents
            .keys()
            .filter(|id| self.things.get(*id).is_some_and(Entity::is_alive))
            .count()
    }

    /// `true` iff no agent is alive. An empty world is done.
    pub fn is_done(&self) -> bool {
        self.live_agents() == 0
    }

    /// Number of completed steps.
    pub fn tick(&self) -> TickId {
        self.tick
    }

    /// Record a completed step and return the new tick.
    pub fn advance_tick(&mut self) -> TickId {
        self.tick = self.tick.next();
        self.tick
    }

    /// Whether `entity` passes `filter`.
    pub fn matches(&self, entity: &Entity<L>, filter: ThingFilter) -> bool {
        match filter {
            ThingFilter::Any => true,
            ThingFilter::Kind(kind) => entity.kind() == kind,
            ThingFilter::Obstacles => entity.is_obstacle(),
            ThingFilter::Agents => self.is_agent(entity.id()),
            ThingFilter::Portable => entity.is_portable(),
        }
    }

    /// Whether any agent currently holds `id`.
    pub fn is_held(&self, id: EntityId) -> bool {
        self.agents.values().any(|a| a.is_holding(id))
    }
}

impl<L: PartialEq, P, A> World<L, P, A> {
    /// Entities at `location` passing `filter`, in insertion order.
    pub fn list_things_at(&self, location: &L, filter: ThingFilter) -> Vec<&Entity<L>> {
        self.things
            .values()
            .filter(|e| e.location() == Some(location) && self.matches(e, filter))
            .collect()
    }

    /// Whether at least one entity at `location` passes `filter`.
    pub fn some_things_at(&self, location: &L, filter: ThingFilter) -> bool {
        self.things
            .values()
            .any(|e| e.location() == Some(location) && self.matches(e, filter))
    }
}

impl<L: Clone + fmt::Debug, P, A> World<L, P, A> {
    /// Insert `thing` at `location`.
    ///
    /// A thing already present is reported and skipped. Agents start with
    /// zero performance.
    pub fn insert(
        &mut self,
        thing: Thing<L, P, A>,
        location: Option<L>,
    ) -> Result<EntityId, WorldError> {
        let Thing { mut entity, agent } = thing;
        let id = entity.id();
        if self.things.contains_key(&id) {
            tracing::warn!(%id, entity = %entity, "can't add the same thing twice");
            return Err(WorldError::AlreadyPresent { id });
        }
        entity.replace_location(location);
        self.things.insert(id, entity);
        if let Some(mut agent) = agent {
            agent.set_performance(0.0);
            self.agents.insert(id, agent);
        }
        self.departed.shift_remove(&id);
        Ok(id)
    }

    /// Remove `id` and its agent component, preserving the order of the rest.
    ///
    /// The returned thing keeps its last location. Removing an absent entity
    /// is reported with its last-known location and the current listing.
    /// Other agents stop holding the removed entity.
    pub fn remove(&mut self, id: EntityId) -> Result<Thing<L, P, A>, WorldError> {
        let Some(entity) = self.things.shift_remove(&id) else {
            let err = self.not_present(id);
            tracing::warn!(%id, listing = %self.listing(), "{err}");
            return Err(err);
        };
        let agent = self.agents.shift_remove(&id);
        for holder in self.agents.values_mut() {
            holder.drop_held(id);
        }
        self.departed.insert(id, entity.location().cloned());
        if self.departed.len() > DEPARTED_CAPACITY {
            self.departed.shift_remove_index(0);
        }
        Ok(Thing { entity, agent })
    }

    /// The error describing a missing `id`.
    pub fn not_present(&self, id: EntityId) -> WorldError {
        WorldError::NotPresent {
            id,
            last_location: self
                .departed
                .get(&id)
                .and_then(|loc| loc.as_ref())
                .map(|loc| format!("{loc:?}")),
            present: self.things.len(),
        }
    }

    /// One-line diagnostic listing of every entity and its location.
    pub fn listing(&self) -> String {
        let parts: Vec<String> = self
            .things
            .values()
            .map(|e| match e.location() {
                Some(loc) => format!("{e} {} at {loc:?}", e.id()),
                None => format!("{e} {} unplaced", e.id()),
            })
            .collect();
        format!("[{}]", parts.join(", "))
    }
}

impl<L: fmt::Debug, P, A> fmt::Debug for World<L, P, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("tick", &self.tick)
            .field("things", &self.things.len())
            .field("agents", &self.agents.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentworld_core::Point;

    type TestWorld = World<Point, (), ()>;

    fn agent() -> Thing<Point, (), ()> {
        Thing::from_program(|_: &()| ())
    }

    #[test]
    fn insert_registers_agents_in_both_maps() {
        let mut w = TestWorld::new();
        let a = w.insert(agent(), Some(Point::new(1, 1))).unwrap();
        let rock = w
            .insert(Entity::new(EntityKind::THING).into(), Some(Point::new(2, 2)))
            .unwrap();
        assert!(w.is_agent(a));
        assert!(!w.is_agent(rock));
        assert_eq!(w.len(), 2);
        assert_eq!(w.agent_ids(), vec![a]);
        assert_eq!(w.thing(a).unwrap().location(), Some(&Point::new(1, 1)));
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut w = TestWorld::new();
        let e: Entity<Point> = Entity::new(EntityKind::THING);
        let copy = e.clone();
        let id = w.insert(e.into(), Some(Point::new(0, 0))).unwrap();
        let err = w.insert(copy.into(), Some(Point::new(3, 3))).unwrap_err();
        assert_eq!(err, WorldError::AlreadyPresent { id });
        assert_eq!(w.len(), 1);
        assert_eq!(w.thing(id).unwrap().location(), Some(&Point::new(0, 0)));
    }

    #[test]
    fn remove_preserves_order_and_reports_absent() {
        let mut w = TestWorld::new();
        let ids: Vec<_> = (0..3)
            .map(|i| {
                w.insert(Entity::new(EntityKind::THING).into(), Some(Point::new(i, 0)))
                    .unwrap()
            })
            .collect();
        let removed = w.remove(ids[1]).unwrap();
        assert_eq!(removed.entity.location(), Some(&Point::new(1, 0)));
        let order: Vec<_> = w.things().map(Entity::id).collect();
        assert_eq!(order, vec![ids[0], ids[2]]);

        match w.remove(ids[1]) {
            Err(WorldError::NotPresent {
                id,
                last_location,
                present,
            }) => {
                assert_eq!(id, ids[1]);
                assert_eq!(last_location.as_deref(), Some("Point { x: 1, y: 0 }"));
                assert_eq!(present, 2);
            }
            other => panic!("expected NotPresent, got {other:?}"),
        }
    }

    #[test]
    fn departed_memory_is_bounded() {
        let mut w = TestWorld::new();
        let ids: Vec<_> = (0..DEPARTED_CAPACITY + 10)
            .map(|i| {
                let id = w
                    .insert(Entity::new(EntityKind::THING).into(), Some(Point::new(i as i32, 0)))
                    .unwrap();
                w.remove(id).unwrap();
                id
            })
            .collect();
        assert_eq!(w.departed.len(), DEPARTED_CAPACITY);
        assert!(matches!(
            w.not_present(ids[0]),
            WorldError::NotPresent { last_location: None, .. }
        ));
        let newest = ids[ids.len() - 1];
        assert!(matches!(
            w.not_present(newest),
            WorldError::NotPresent { last_location: Some(_), .. }
        ));
    }

    #[test]
    fn removing_an_agent_drops_its_component() {
        let mut w = TestWorld::new();
        let a = w.insert(agent(), None).unwrap();
        let t = w.remove(a).unwrap();
        assert!(t.is_agent());
        assert!(!w.is_agent(a));
        assert!(w.agent_ids().is_empty());
    }

    #[test]
    fn removed_entity_is_scrubbed_from_holders() {
        let mut w = TestWorld::new();
        let a = w.insert(agent(), Some(Point::new(0, 0))).unwrap();
        let gem = w
            .insert(
                Entity::new(EntityKind::THING).with_portable(true).into(),
                Some(Point::new(0, 0)),
            )
            .unwrap();
        w.agent_mut(a).unwrap().hold(gem);
        assert!(w.is_held(gem));
        w.remove(gem).unwrap();
        assert!(w.agent(a).unwrap().holding().is_empty());
    }

    #[test]
    fn done_iff_no_live_agent() {
        let mut w = TestWorld::new();
        assert!(w.is_done());
        let a = w.insert(agent(), None).unwrap();
        let b = w.insert(agent(), None).unwrap();
        assert!(!w.is_done());
        w.thing_mut(a).unwrap().set_alive(false);
        assert!(!w.is_done());
        w.thing_mut(b).unwrap().set_alive(false);
        assert!(w.is_done());
    }

    #[test]
    fn location_queries_respect_filters() {
        let mut w = TestWorld::new();
        let here = Point::new(2, 2);
        w.insert(Entity::wall().into(), Some(here)).unwrap();
        let a = w.insert(agent(), Some(here)).unwrap();
        w.insert(Entity::new(EntityKind::THING).into(), Some(Point::new(5, 5)))
            .unwrap();

        assert_eq!(w.list_things_at(&here, ThingFilter::Any).len(), 2);
        assert!(w.some_things_at(&here, ThingFilter::Obstacles));
        assert!(w.some_things_at(&here, ThingFilter::Kind(EntityKind::WALL)));
        let agents = w.list_things_at(&here, ThingFilter::Agents);
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].id(), a);
        assert!(!w.some_things_at(&here, ThingFilter::Portable));
        assert!(!w.some_things_at(&Point::new(9, 9), ThingFilter::Any));
    }

    #[test]
    fn insertion_resets_performance() {
        let mut w = TestWorld::new();
        let mut t = agent();
        if let Some(a) = t.agent.as_mut() {
            a.set_performance(42.0);
        }
        let id = w.insert(t, None).unwrap();
        assert_eq!(w.agent(id).unwrap().performance(), 0.0);
    }

    #[test]
    fn tick_advances() {
        let mut w = TestWorld::new();
        assert_eq!(w.tick(), TickId(0));
        assert_eq!(w.advance_tick(), TickId(1));
        assert_eq!(w.tick(), TickId(1));
    }
}
