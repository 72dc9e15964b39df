//! Insertable bundles: an entity plus its optional agent component.

use std::fmt;
use std::str::FromStr;

use crate::agent::AgentState;
use crate::direction::Direction;
use crate::entity::{Entity, EntityKind};
use crate::error::AgentError;
use crate::id::EntityId;
use crate::program::{InteractiveProgram, Program};

/// Everything an environment needs to insert one physical object.
///
/// `agent` is `Some` for agents. Environments store the two halves in
/// separate collections keyed by the entity's ID.
pub struct Thing<L, P, A> {
    /// The physical record.
    pub entity: Entity<L>,
    /// Agent behaviour, if this thing is an agent.
    pub agent: Option<AgentState<P, A>>,
}

impl<L, P, A> Thing<L, P, A> {
    /// An inert thing.
    pub fn inert(entity: Entity<L>) -> Self {
        Self {
            entity,
            agent: None,
        }
    }

    /// A default agent wrapping a bare decision program.
    pub fn from_program(program: impl Program<P, A> + 'static) -> Self {
        Self {
            entity: Entity::new(EntityKind::AGENT).with_alive(true),
            agent: Some(AgentState::new(program)),
        }
    }

    /// The thing's identity.
    pub fn id(&self) -> EntityId {
        self.entity.id()
    }

    /// Whether this thing carries an agent component.
    pub fn is_agent(&self) -> bool {
        self.agent.is_some()
    }
}

impl<L, P, A> From<Entity<L>> for Thing<L, P, A> {
    fn from(entity: Entity<L>) -> Self {
        Self::inert(entity)
    }
}

impl<L: fmt::Debug, P, A> fmt::Debug for Thing<L, P, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thing")
            .field("entity", &self.entity)
            .field("agent", &self.agent)
            .finish()
    }
}

/// Builder for agents with a custom kind, name, or heading.
///
/// A program is mandatory: [`build`](AgentBuilder::build) fails with
/// [`AgentError::MissingProgram`] if none was given. The interactive
/// fallback, which prompts on stdin for every action, is only used by
/// [`build_with_fallback`](AgentBuilder::build_with_fallback) and only when
/// switched on with [`interactive_fallback`](AgentBuilder::interactive_fallback).
///
/// # Examples
///
/// ```
/// use agentworld_core::{AgentBuilder, Direction, EntityKind, Point, Thing};
///
/// let thing: Thing<Point, (), u8> = AgentBuilder::new(EntityKind::new("Explorer"))
///     .program(|_: &()| 0u8)
///     .heading(Direction::Down)
///     .build()
///     .unwrap();
/// assert!(thing.is_agent());
///
/// let err = AgentBuilder::<(), u8>::new(EntityKind::AGENT).build::<Point>();
/// assert!(err.is_err());
/// ```
pub struct AgentBuilder<P, A> {
    kind: EntityKind,
    name: Option<String>,
    heading: Direction,
    program: Option<Box<dyn Program<P, A>>>,
    interactive_fallback: bool,
}

impl<P, A> AgentBuilder<P, A> {
    /// Start building an agent of `kind`.
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            name: None,
            heading: Direction::Right,
            program: None,
            interactive_fallback: false,
        }
    }

    /// Set the decision program.
    pub fn program(mut self, program: impl Program<P, A> + 'static) -> Self {
        self.program = Some(Box::new(program));
        self
    }

    /// Set an already boxed decision program.
    pub fn boxed_program(mut self, program: Box<dyn Program<P, A>>) -> Self {
        self.program = Some(program);
        self
    }

    /// Attach a display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Initial heading. Default: right.
    pub fn heading(mut self, heading: Direction) -> Self {
        self.heading = heading;
        self
    }

    /// Allow [`build_with_fallback`](Self::build_with_fallback) to prompt on
    /// stdin when no program was set. Default: off.
    pub fn interactive_fallback(mut self, enabled: bool) -> Self {
        self.interactive_fallback = enabled;
        self
    }

    /// Build the agent. Fails if no program was supplied.
    pub fn build<L>(self) -> Result<Thing<L, P, A>, AgentError> {
        let Some(program) = self.program else {
            return Err(AgentError::MissingProgram { kind: self.kind });
        };
        Ok(Self::assemble(self.kind, self.name, self.heading, program))
    }

    fn assemble<L>(
        kind: EntityKind,
        name: Option<String>,
        heading: Direction,
        program: Box<dyn Program<P, A>>,
    ) -> Thing<L, P, A> {
        let mut entity = Entity::new(kind).with_alive(true);
        if let Some(name) = name {
            entity = entity.with_name(name);
        }
        let mut agent = AgentState::from_boxed(program);
        agent.set_heading(heading);
        Thing {
            entity,
            agent: Some(agent),
        }
    }
}

impl<P, A> AgentBuilder<P, A>
where
    P: fmt::Debug + 'static,
    A: FromStr + Default + 'static,
    A::Err: fmt::Display,
{
    /// Build the agent, prompting on stdin for actions if no program was set
    /// and the interactive fallback is enabled.
    pub fn build_with_fallback<L>(self) -> Result<Thing<L, P, A>, AgentError> {
        match self.program {
            Some(program) => Ok(Self::assemble(self.kind, self.name, self.heading, program)),
            None if self.interactive_fallback => {
                tracing::warn!(kind = %self.kind, "no program supplied, prompting on stdin");
                Ok(Self::assemble(
                    self.kind,
                    self.name,
                    self.heading,
                    Box::new(InteractiveProgram::stdio()),
                ))
            }
            None => Err(AgentError::MissingProgram { kind: self.kind }),
        }
    }
}
