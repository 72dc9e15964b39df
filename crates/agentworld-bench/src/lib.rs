//! Benchmark profiles for the agentworld grid environment.
//!
//! - [`crowded_room`]: walled grid with scattered obstacles and random walkers
//! - [`scatter_points`]: deterministic in-bounds points via seed
//! - [`ProfileError`]: why a profile could not be built

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use agentworld_core::{Entity, EntityKind, Point, RandomProgram, Thing};
use agentworld_env::{ConfigError, GridAction, GridConfig, GridEnvironment, GridError, WorldError};

/// Why a benchmark profile could not be built.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    /// The room dimensions are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The room has no free interior to place walkers in.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// A placement was rejected by the world.
    #[error(transparent)]
    World(#[from] WorldError),
    /// A walker was skipped by the grid.
    #[error("walker {index} could not be placed")]
    Unplaced {
        /// Position of the walker in creation order.
        index: usize,
    },
}

/// Actions drawn by benchmark walkers.
pub const WALKER_ACTIONS: [GridAction; 4] = [
    GridAction::Forward,
    GridAction::Forward,
    GridAction::TurnLeft,
    GridAction::TurnRight,
];

/// Build a `side × side` walled room holding `agents` random walkers and
/// `obstacles` movement blockers, all placed from `seed`.
pub fn crowded_room(
    side: u32,
    agents: usize,
    obstacles: usize,
    seed: u64,
) -> Result<GridEnvironment, ProfileError> {
    let mut env = GridEnvironment::new(GridConfig {
        width: side,
        height: side,
        seed,
        ..GridConfig::default()
    })?;
    env.add_walls();

    for p in scatter_points(&mut env, obstacles) {
        // Two obstacles drawn onto one cell collapse into one.
        env.insert(
            Thing::inert(Entity::obstacle(EntityKind::OBSTACLE)),
            Some(p),
            true,
        )?;
    }
    for index in 0..agents {
        let p = env.random_location_inbounds(None)?;
        let walker = Thing::from_program(RandomProgram::new(
            WALKER_ACTIONS.to_vec(),
            seed.wrapping_add(index as u64),
        ));
        env.insert(walker, Some(p), false)?
            .ok_or(ProfileError::Unplaced { index })?;
    }
    Ok(env)
}

/// `n` points drawn from the environment's generator within its bounds.
pub fn scatter_points(env: &mut GridEnvironment, n: usize) -> Vec<Point> {
    (0..n)
        .filter_map(|_| env.random_location_inbounds(None).ok())
        .collect()
}
