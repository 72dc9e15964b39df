//! Bounded 2D grid environment.
//!
//! [`GridEnvironment`] places entities on integer [`Point`]s inside a
//! `width × height` grid. Agents face a [`Direction`](agentworld_core::Direction),
//! turn, and step forward; a step into a cell holding an obstacle is
//! blocked and flags a collision. Anything an agent holds travels with it.
//!
//! The grid is generic over percept and action types so richer
//! environments can embed it and reuse its spatial engine. It implements
//! [`Environment`] itself with [`GridPercept`] and [`GridAction`].

use std::collections::{HashSet, VecDeque};

use agentworld_core::{Entity, EntityId, EntityKind, Point, Thing, Turn};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::action::GridAction;
use crate::config::{GridConfig, Placement};
use crate::environment::Environment;
use crate::error::{ConfigError, GridError, WorldError};
use crate::observer::Observer;
use crate::world::{ThingFilter, World};

// ── Bounds ──────────────────────────────────────────────────────

/// Half-open active region `[x_start, x_end) × [y_start, y_end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    /// First admitted column.
    pub x_start: i32,
    /// One past the last admitted column.
    pub x_end: i32,
    /// First admitted row.
    pub y_start: i32,
    /// One past the last admitted row.
    pub y_end: i32,
}

impl Bounds {
    /// Whether `p` lies inside the region.
    pub const fn contains(&self, p: Point) -> bool {
        self.x_start <= p.x && p.x < self.x_end && self.y_start <= p.y && p.y < self.y_end
    }

    /// Number of cells in the region.
    pub fn cell_count(&self) -> u64 {
        let w = i64::from(self.x_end) - i64::from(self.x_start);
        let h = i64::from(self.y_end) - i64::from(self.y_start);
        (w.max(0) * h.max(0)) as u64
    }

    /// Whether the region has no cells.
    pub fn is_empty(&self) -> bool {
        self.cell_count() == 0
    }
}

// ── Percept ─────────────────────────────────────────────────────

/// One entity within perceptible distance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nearby {
    /// The entity.
    pub id: EntityId,
    /// Its kind.
    pub kind: EntityKind,
    /// Where it is.
    pub location: Point,
    /// `radius² − distance²`: larger is closer, 0 is at the edge.
    pub closeness: i64,
    /// Whether it blocks movement.
    pub obstacle: bool,
}

/// What an agent on the grid perceives: everything within its radius.
pub type GridPercept = Vec<Nearby>;

// ── GridEnvironment ─────────────────────────────────────────────

/// A bounded 2D grid of entities.
///
/// # Examples
///
/// ```
/// use agentworld_core::{Direction, Entity, Point};
/// use agentworld_env::{Environment, GridAction, GridConfig, GridEnvironment, GridPercept};
///
/// let mut env: GridEnvironment = GridEnvironment::new(GridConfig::default()).unwrap();
/// env.add_thing(Entity::wall().into(), Some(Point::new(3, 1))).unwrap();
/// let agent = env
///     .add_program(|_: &GridPercept| GridAction::Forward, Some(Point::new(1, 1)))
///     .unwrap()
///     .unwrap();
///
/// env.run(3);
/// let at = env.world().thing(agent).unwrap().location().copied();
/// assert_eq!(at, Some(Point::new(2, 1)));
/// assert!(env.world().agent(agent).unwrap().collided());
/// assert_eq!(env.world().agent(agent).unwrap().heading(), Direction::Right);
/// ```
pub struct GridEnvironment<P = GridPercept, A = GridAction> {
    width: u32,
    height: u32,
    bounds: Bounds,
    perceptible_distance: u32,
    placement: Placement,
    rng: ChaCha8Rng,
    world: World<Point, P, A>,
    observers: Vec<Box<dyn Observer<Point>>>,
}

impl<P, A> GridEnvironment<P, A> {
    /// Create an empty grid from a validated configuration.
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            width: config.width,
            height: config.height,
            bounds: Bounds {
                x_start: 0,
                x_end: config.width as i32,
                y_start: 0,
                y_end: config.height as i32,
            },
            perceptible_distance: config.perceptible_distance,
            placement: config.default_placement,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            world: World::new(),
            observers: Vec::new(),
        })
    }

    /// Grid width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Active bounds; the full grid until walls are added.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Whether `location` is inside the active bounds.
    pub fn is_inbounds(&self, location: Point) -> bool {
        self.bounds.contains(location)
    }

    /// Default perception radius.
    pub fn perceptible_distance(&self) -> u32 {
        self.perceptible_distance
    }

    /// Reset the random number generator.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Entity and agent storage.
    pub fn world(&self) -> &World<Point, P, A> {
        &self.world
    }

    /// Mutable entity and agent storage. Mutations made here bypass
    /// observers.
    pub fn world_mut(&mut self) -> &mut World<Point, P, A> {
        &mut self.world
    }

    /// Register a listener for moves, additions, and deletions.
    pub fn add_observer(&mut self, observer: impl Observer<Point> + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Every entity within `radius` of `location` (default: the perceptible
    /// distance), in insertion order.
    pub fn things_near(&self, location: Point, radius: Option<u32>) -> Vec<Nearby> {
        let radius = i64::from(radius.unwrap_or(self.perceptible_distance));
        let radius_sq = radius.saturating_mul(radius);
        self.world
            .things()
            .filter_map(|e| {
                let at = *e.location()?;
                let d = at.distance_squared(location);
                (d <= radius_sq).then(|| Nearby {
                    id: e.id(),
                    kind: e.kind(),
                    location: at,
                    closeness: radius_sq - d,
                    obstacle: e.is_obstacle(),
                })
            })
            .collect()
    }

    /// What `agent` perceives from where it stands. Empty if it is unplaced.
    pub fn nearby(&self, agent: EntityId) -> Vec<Nearby> {
        self.world
            .thing(agent)
            .and_then(|e| e.location().copied())
            .map(|at| self.things_near(at, None))
            .unwrap_or_default()
    }

    /// A uniformly random point in the active bounds, other than `exclude`.
    pub fn random_location_inbounds(&mut self, exclude: Option<Point>) -> Result<Point, GridError> {
        let b = self.bounds;
        if b.is_empty() {
            return Err(GridError::EmptyBounds);
        }
        if let Some(excluded) = exclude {
            if b.cell_count() == 1 && b.contains(excluded) {
                return Err(GridError::NoAlternativeLocation { excluded });
            }
        }
        loop {
            let p = Point::new(
                self.rng.gen_range(b.x_start..b.x_end),
                self.rng.gen_range(b.y_start..b.y_end),
            );
            if Some(p) != exclude {
                return Ok(p);
            }
        }
    }

    /// Where things land when added without a location.
    pub fn placement_location(&mut self) -> Option<Point> {
        match self.placement {
            Placement::Fixed(p) => Some(p),
            Placement::Random => self.random_location_inbounds(None).ok(),
        }
    }

    /// Add `thing` at `location`, or at the default placement.
    ///
    /// Out-of-bounds placements are ignored and return `Ok(None)`. With
    /// `exclude_duplicate_kind`, the thing is also skipped when an entity of
    /// the same kind already occupies the cell.
    pub fn insert(
        &mut self,
        thing: Thing<Point, P, A>,
        location: Option<Point>,
        exclude_duplicate_kind: bool,
    ) -> Result<Option<EntityId>, WorldError> {
        if self.world.contains(thing.id()) {
            return self.world.insert(thing, location).map(Some);
        }
        let Some(location) = location.or_else(|| self.placement_location()) else {
            tracing::trace!(id = %thing.id(), "no placement available, ignored");
            return Ok(None);
        };
        if !self.is_inbounds(location) {
            tracing::trace!(id = %thing.id(), %location, "out of bounds, ignored");
            return Ok(None);
        }
        if exclude_duplicate_kind
            && self
                .world
                .some_things_at(&location, ThingFilter::Kind(thing.entity.kind()))
        {
            tracing::trace!(id = %thing.id(), %location, "same kind already here, skipped");
            return Ok(None);
        }
        self.place(thing, location).map(Some)
    }

    fn place(&mut self, thing: Thing<Point, P, A>, location: Point) -> Result<EntityId, WorldError> {
        let id = self.world.insert(thing, Some(location))?;
        if let Some(entity) = self.world.thing(id) {
            for observer in &mut self.observers {
                observer.thing_added(entity, &location);
            }
        }
        Ok(id)
    }

    /// Remove `id`. An agent's held entities are removed first; observers
    /// hear about each deletion.
    pub fn remove(&mut self, id: EntityId) -> Result<Thing<Point, P, A>, WorldError> {
        let held = self
            .world
            .agent(id)
            .map(|a| a.holding().to_vec())
            .unwrap_or_default();
        for held_id in held {
            if let Ok(removed) = self.world.remove(held_id) {
                self.notify_deleted(&removed.entity);
            }
        }
        let removed = self.world.remove(id)?;
        self.notify_deleted(&removed.entity);
        Ok(removed)
    }

    fn notify_deleted(&mut self, entity: &Entity<Point>) {
        tracing::trace!(id = %entity.id(), observers = self.observers.len(), "thing deleted");
        for observer in &mut self.observers {
            observer.thing_deleted(entity);
        }
    }

    /// Move `id` to `destination` unless an obstacle is there.
    ///
    /// Returns `Ok(true)` on collision, in which case nothing moves.
    /// Otherwise the thing and everything it holds, transitively, land on
    /// `destination` together; observers hear about the thing first, then
    /// each carried entity.
    pub fn move_to(&mut self, id: EntityId, destination: Point) -> Result<bool, WorldError> {
        if !self.world.contains(id) {
            return Err(self.world.not_present(id));
        }
        let blocked = self
            .world
            .list_things_at(&destination, ThingFilter::Obstacles)
            .iter()
            .any(|e| e.id() != id);
        if blocked {
            tracing::trace!(%id, %destination, "collision");
            return Ok(true);
        }

        let mut moved = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            let Some(entity) = self.world.thing_mut(current) else {
                continue;
            };
            entity.set_location(destination);
            moved.push(current);
            if let Some(agent) = self.world.agent(current) {
                queue.extend(agent.holding().iter().copied());
            }
        }
        tracing::trace!(%id, %destination, carried = moved.len() - 1, "moved");

        for moved_id in moved {
            if let Some(entity) = self.world.thing(moved_id) {
                for observer in &mut self.observers {
                    observer.thing_moved(entity);
                }
            }
        }
        Ok(false)
    }

    /// Pick up the first portable entity in `agent`'s cell that nobody holds.
    pub fn grab(&mut self, agent: EntityId) -> Option<EntityId> {
        let at = self.world.thing(agent)?.location().copied()?;
        let target = self
            .world
            .list_things_at(&at, ThingFilter::Portable)
            .into_iter()
            .map(Entity::id)
            .find(|&id| id != agent && !self.world.is_held(id))?;
        self.world.agent_mut(agent)?.hold(target);
        tracing::trace!(%agent, held = %target, "grab");
        Some(target)
    }

    /// Put down the most recently held entity where `agent` stands.
    pub fn release(&mut self, agent: EntityId) -> Option<EntityId> {
        let released = self.world.agent_mut(agent)?.release()?;
        tracing::trace!(%agent, %released, "release");
        Some(released)
    }

    /// Apply a [`GridAction`] for `agent`.
    ///
    /// The collision flag is cleared first and set only by a blocked
    /// forward step. Anything that is not an agent is ignored, as are
    /// `NoOp` and `Custom` actions.
    pub fn execute_grid_action(&mut self, agent: EntityId, action: GridAction) {
        let Some(state) = self.world.agent_mut(agent) else {
            return;
        };
        state.set_collided(false);
        match action {
            GridAction::TurnRight => state.turn(Turn::Right),
            GridAction::TurnLeft => state.turn(Turn::Left),
            GridAction::Forward => {
                let heading = state.heading();
                let Some(from) = self.world.thing(agent).and_then(|e| e.location().copied()) else {
                    return;
                };
                let collided = self
                    .move_to(agent, heading.move_forward(from))
                    .unwrap_or(false);
                if let Some(state) = self.world.agent_mut(agent) {
                    state.set_collided(collided);
                }
            }
            GridAction::Grab => {
                self.grab(agent);
            }
            GridAction::Release => {
                self.release(agent);
            }
            GridAction::NoOp | GridAction::Custom(_) => {}
        }
    }

    /// Put a wall on every perimeter cell of the full grid, then shrink the
    /// active bounds to the interior. Cells already walled are left alone.
    pub fn add_walls(&mut self) {
        let (w, h) = (self.width as i32, self.height as i32);
        let mut perimeter = Vec::new();
        for x in 0..w {
            perimeter.push(Point::new(x, 0));
            if h > 1 {
                perimeter.push(Point::new(x, h - 1));
            }
        }
        for y in 1..h - 1 {
            perimeter.push(Point::new(0, y));
            if w > 1 {
                perimeter.push(Point::new(w - 1, y));
            }
        }
        for cell in perimeter {
            if self
                .world
                .some_things_at(&cell, ThingFilter::Kind(EntityKind::WALL))
            {
                continue;
            }
            // Fresh walls are never duplicates.
            let _ = self.place(Thing::inert(Entity::wall()), cell);
        }
        self.bounds = Bounds {
            x_start: 1,
            x_end: w - 1,
            y_start: 1,
            y_end: h - 1,
        };
        tracing::debug!(bounds = ?self.bounds, "walls added");
    }
}

impl<P, A> std::fmt::Debug for GridEnvironment<P, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridEnvironment")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bounds", &self.bounds)
            .field("world", &self.world)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

const GRID_KINDS: &[EntityKind] = &[
    EntityKind::THING,
    EntityKind::AGENT,
    EntityKind::OBSTACLE,
    EntityKind::WALL,
];

impl Environment for GridEnvironment<GridPercept, GridAction> {
    type Location = Point;
    type Percept = GridPercept;
    type Action = GridAction;

    fn world(&self) -> &World<Point, GridPercept, GridAction> {
        &self.world
    }

    fn world_mut(&mut self) -> &mut World<Point, GridPercept, GridAction> {
        &mut self.world
    }

    fn percept(&self, agent: EntityId) -> GridPercept {
        self.nearby(agent)
    }

    fn execute_action(&mut self, agent: EntityId, action: GridAction) {
        self.execute_grid_action(agent, action);
    }

    fn thing_kinds(&self) -> &[EntityKind] {
        GRID_KINDS
    }

    fn default_location(&mut self, _thing: &Entity<Point>) -> Option<Point> {
        self.placement_location()
    }

    fn add_thing(
        &mut self,
        thing: Thing<Point, GridPercept, GridAction>,
        location: Option<Point>,
    ) -> Result<Option<EntityId>, WorldError> {
        self.insert(thing, location, false)
    }

    fn delete_thing(
        &mut self,
        id: EntityId,
    ) -> Result<Thing<Point, GridPercept, GridAction>, WorldError> {
        self.remove(id)
    }
}
