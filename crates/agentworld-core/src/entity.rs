//! Physical objects placed in an environment.
//!
//! An [`Entity`] is a plain record: identity, kind, optional liveness,
//! location, and capability flags. Behaviour that used to come from a class
//! hierarchy (obstacle, wall, agent) is expressed as capabilities: an entity
//! *blocks movement* if [`Entity::is_obstacle`] is set, and it is an agent if
//! the environment holds an [`AgentState`](crate::AgentState) for its ID.

use std::fmt;

use crate::id::EntityId;

/// Concrete kind of an entity, used for display and for
/// same-kind exclusion when placing things on a grid.
///
/// Kinds are compared by name. Environments define their own kinds with
/// [`EntityKind::new`].
///
/// # Examples
///
/// ```
/// use agentworld_core::EntityKind;
///
/// const DIRT: EntityKind = EntityKind::new("Dirt");
/// assert_eq!(DIRT.name(), "Dirt");
/// assert_ne!(DIRT, EntityKind::WALL);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKind(&'static str);

impl EntityKind {
    /// A generic thing.
    pub const THING: EntityKind = EntityKind("Thing");
    /// An agent with no more specific kind.
    pub const AGENT: EntityKind = EntityKind("Agent");
    /// A generic movement blocker.
    pub const OBSTACLE: EntityKind = EntityKind("Obstacle");
    /// A perimeter wall.
    pub const WALL: EntityKind = EntityKind("Wall");

    /// Define a kind by name.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The kind's name.
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A physical object that can appear in an environment.
///
/// `L` is the environment's location type. The location is `None` until the
/// entity is placed.
///
/// Cloning keeps the [`EntityId`], so a clone denotes the same thing.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity<L> {
    id: EntityId,
    kind: EntityKind,
    name: Option<String>,
    alive: Option<bool>,
    location: Option<L>,
    obstacle: bool,
    portable: bool,
}

impl<L> Entity<L> {
    /// A new inert entity of the given kind.
    pub fn new(kind: EntityKind) -> Self {
        Self {
            id: EntityId::next(),
            kind,
            name: None,
            alive: None,
            location: None,
            obstacle: false,
            portable: false,
        }
    }

    /// A new entity that blocks movement into its cell.
    pub fn obstacle(kind: EntityKind) -> Self {
        Self {
            obstacle: true,
            ..Self::new(kind)
        }
    }

    /// A new wall.
    pub fn wall() -> Self {
        Self::obstacle(EntityKind::WALL)
    }

    /// Attach a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the liveness flag.
    pub fn with_alive(mut self, alive: bool) -> Self {
        self.alive = Some(alive);
        self
    }

    /// Mark the entity as something an agent may pick up.
    pub fn with_portable(mut self, portable: bool) -> Self {
        self.portable = portable;
        self
    }

    /// Identity.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Kind.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Display name, if one was attached.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Raw liveness flag. `None` for things that are never alive.
    pub fn alive(&self) -> Option<bool> {
        self.alive
    }

    /// `true` only if the liveness flag is present and set.
    pub fn is_alive(&self) -> bool {
        self.alive == Some(true)
    }

    /// Set the liveness flag.
    pub fn set_alive(&mut self, alive: bool) {
        self.alive = Some(alive);
    }

    /// Current location, if placed.
    pub fn location(&self) -> Option<&L> {
        self.location.as_ref()
    }

    /// Place the entity.
    pub fn set_location(&mut self, location: L) {
        self.location = Some(location);
    }

    /// Replace the location wholesale, including unsetting it.
    pub fn replace_location(&mut self, location: Option<L>) -> Option<L> {
        std::mem::replace(&mut self.location, location)
    }

    /// Whether this entity blocks movement into its location.
    pub fn is_obstacle(&self) -> bool {
        self.obstacle
    }

    /// Whether an agent may pick this entity up.
    pub fn is_portable(&self) -> bool {
        self.portable
    }
}

impl<L> fmt::Display for Entity<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "<{name}>"),
            None => write!(f, "<{}>", self.kind),
        }
    }
}
