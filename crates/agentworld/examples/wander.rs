//! Random walkers in a walled room, picking up and carrying gems.
//!
//! Run with `RUST_LOG=agentworld_env=trace,agentworld_core=info` to see
//! every move, collision, and decision.

use agentworld::prelude::*;
use tracing_subscriber::EnvFilter;

const GEM: EntityKind = EntityKind::new("Gem");

struct MoveCounter {
    moves: usize,
}

impl Observer<Point> for MoveCounter {
    fn thing_moved(&mut self, entity: &Entity<Point>) {
        self.moves += 1;
        tracing::trace!(%entity, moves = self.moves, "observed move");
    }

    fn thing_deleted(&mut self, entity: &Entity<Point>) {
        tracing::info!(%entity, "observed deletion");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut env: GridEnvironment = GridEnvironment::new(GridConfig {
        width: 12,
        height: 8,
        seed: 7,
        default_placement: Placement::Random,
        ..GridConfig::default()
    })?;
    env.add_walls();
    env.add_observer(MoveCounter { moves: 0 });

    for i in 0..6 {
        env.add_thing(
            Entity::new(GEM).with_name(format!("gem-{i}")).with_portable(true).into(),
            None,
        )?;
    }

    let moves = vec![
        GridAction::Forward,
        GridAction::Forward,
        GridAction::TurnLeft,
        GridAction::TurnRight,
        GridAction::Grab,
        GridAction::Release,
    ];
    for (i, heading) in Direction::ALL.into_iter().enumerate() {
        let walker = AgentBuilder::new(EntityKind::new("Walker"))
            .name(format!("walker-{i}"))
            .heading(heading)
            .program(TraceProgram::new(
                format!("walker-{i}"),
                RandomProgram::new(moves.clone(), i as u64),
            ))
            .build()?;
        env.add_thing(walker, None)?;
    }

    let ticks = env.run(40);
    tracing::info!(ticks, tick = %env.world().tick(), "run finished");

    for (id, agent) in env.world().agents() {
        if let Some(entity) = env.world().thing(id) {
            let held: Vec<String> = agent
                .holding()
                .iter()
                .filter_map(|h| env.world().thing(*h))
                .map(ToString::to_string)
                .collect();
            tracing::info!(
                %entity,
                location = ?entity.location(),
                heading = %agent.heading(),
                collided = agent.collided(),
                ?held,
                "final state"
            );
        }
    }
    Ok(())
}
