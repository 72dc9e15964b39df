//! Integration test: behavioural properties of the grid environment.
//!
//! Covers simultaneous stepping, movement and collision, held-entity
//! transport, walled bounds, termination, and duplicate rejection.

use std::collections::BTreeMap;

use agentworld_core::{Direction, Entity, EntityKind, Point, Thing};
use agentworld_env::{Environment, GridAction, GridEnvironment, GridPercept, WorldError};
use agentworld_test_utils::fixtures::{agent_facing, open_grid, walled_grid, ConstProgram, ScriptedProgram};
use agentworld_test_utils::{ObservedEvent, PerceptRecorder, RecordingObserver};
use proptest::prelude::*;

fn location<E: Environment<Location = Point>>(env: &E, id: agentworld_core::EntityId) -> Point {
    env.world()
        .thing(id)
        .and_then(|e| e.location().copied())
        .expect("entity is placed")
}

// ── Simultaneity ────────────────────────────────────────────────

#[test]
fn percepts_see_the_previous_tick() {
    let mut env = open_grid(10, 10, 0).unwrap();
    let mover = env
        .add_thing(
            agent_facing(Direction::Right, ConstProgram(GridAction::Forward)),
            Some(Point::new(1, 1)),
        )
        .unwrap()
        .unwrap();
    let (recorder, seen) = PerceptRecorder::<GridPercept, GridAction>::new(GridAction::NoOp);
    let watcher = env
        .add_thing(Thing::from_program(recorder), Some(Point::new(3, 1)))
        .unwrap()
        .unwrap();

    env.step();
    assert_eq!(location(&env, mover), Point::new(2, 1));
    env.step();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    let ids = |p: &GridPercept| p.iter().map(|n| n.id).collect::<Vec<_>>();
    // Tick 1 was decided before the mover stepped next to the watcher.
    assert_eq!(ids(&seen[0]), vec![watcher]);
    assert_eq!(ids(&seen[1]), vec![mover, watcher]);
}

/// Turns away from other agents, turns right at obstacles, otherwise
/// walks on. Its choice depends on where the other agents stand.
fn shy(percept: &GridPercept) -> GridAction {
    let agents = percept
        .iter()
        .filter(|n| n.kind == EntityKind::AGENT)
        .count();
    if agents > 1 {
        GridAction::TurnLeft
    } else if percept.iter().any(|n| n.obstacle) {
        GridAction::TurnRight
    } else {
        GridAction::Forward
    }
}

fn step_together(env: &mut GridEnvironment) {
    env.step();
}

/// Perceive, decide and act agent by agent, without the two-phase split.
fn step_one_by_one(env: &mut GridEnvironment) {
    for id in env.world().agent_ids() {
        let percept = env.percept(id);
        let action = env.world_mut().agent_mut(id).unwrap().decide(&percept);
        env.execute_action(id, action);
    }
}

fn run_named(
    starts: &[(i32, i32)],
    reverse: bool,
    steps: usize,
    stepper: fn(&mut GridEnvironment),
) -> BTreeMap<String, (Point, Direction)> {
    let mut env = walled_grid(8, 8, 0).unwrap();
    let mut order: Vec<usize> = (0..starts.len()).collect();
    if reverse {
        order.reverse();
    }
    let mut ids = Vec::new();
    for i in order {
        let mut thing = agent_facing(Direction::Right, shy);
        thing.entity = thing.entity.with_name(format!("agent-{i}"));
        let (x, y) = starts[i];
        let id = env
            .add_thing(thing, Some(Point::new(x, y)))
            .unwrap()
            .unwrap();
        ids.push(id);
    }
    for _ in 0..steps {
        stepper(&mut env);
    }
    ids.into_iter()
        .map(|id| {
            let entity = env.world().thing(id).unwrap();
            let heading = env.world().agent(id).unwrap().heading();
            (
                entity.name().unwrap().to_string(),
                (entity.location().copied().unwrap(), heading),
            )
        })
        .collect()
}

#[test]
fn neighbours_in_a_row_act_on_the_same_snapshot() {
    let starts = [(2, 3), (4, 3)];
    // Both walk right: neither saw the other before the tick.
    let forward = run_named(&starts, false, 1, step_together);
    assert_eq!(forward, run_named(&starts, true, 1, step_together));
    assert_eq!(forward["agent-0"], (Point::new(3, 3), Direction::Right));
    assert_eq!(forward["agent-1"], (Point::new(5, 3), Direction::Right));

    // Acting one by one lets the second agent see the first one's move.
    assert_ne!(
        run_named(&starts, false, 1, step_one_by_one),
        run_named(&starts, true, 1, step_one_by_one)
    );
}

proptest! {
    #[test]
    fn permuting_agent_order_gives_same_state(
        starts in prop::collection::vec((1i32..5, 1i32..5), 2..6),
        steps in 1usize..6,
    ) {
        prop_assert_eq!(
            run_named(&starts, false, steps, step_together),
            run_named(&starts, true, steps, step_together)
        );
    }
}

// ── Movement and collision ──────────────────────────────────────

#[test]
fn forward_moves_one_cell_along_heading() {
    for (heading, expected) in [
        (Direction::Right, Point::new(6, 5)),
        (Direction::Left, Point::new(4, 5)),
        (Direction::Up, Point::new(5, 4)),
        (Direction::Down, Point::new(5, 6)),
    ] {
        let mut env = open_grid(10, 10, 0).unwrap();
        let id = env
            .add_thing(
                agent_facing(heading, ConstProgram(GridAction::Forward)),
                Some(Point::new(5, 5)),
            )
            .unwrap()
            .unwrap();
        env.step();
        assert_eq!(location(&env, id), expected, "heading {heading}");
    }
}

#[test]
fn wall_blocks_and_flags_collision() {
    let mut env = open_grid(10, 10, 0).unwrap();
    env.add_thing(Entity::wall().into(), Some(Point::new(2, 2)))
        .unwrap();
    let id = env
        .add_thing(
            agent_facing(Direction::Right, ConstProgram(GridAction::Forward)),
            Some(Point::new(1, 2)),
        )
        .unwrap()
        .unwrap();
    env.step();
    assert_eq!(location(&env, id), Point::new(1, 2));
    assert!(env.world().agent(id).unwrap().collided());
}

#[test]
fn turning_clears_collision() {
    let mut env = walled_grid(4, 4, 0).unwrap();
    let id = env
        .add_thing(
            agent_facing(
                Direction::Up,
                ScriptedProgram::new([GridAction::Forward, GridAction::TurnRight]),
            ),
            Some(Point::new(1, 1)),
        )
        .unwrap()
        .unwrap();
    env.step();
    assert!(env.world().agent(id).unwrap().collided());
    env.step();
    let agent = env.world().agent(id).unwrap();
    assert!(!agent.collided());
    assert_eq!(agent.heading(), Direction::Right);
}

// ── Transport ───────────────────────────────────────────────────

#[test]
fn carried_entity_moves_with_agent_and_observers_hear_both() {
    let mut env = open_grid(10, 10, 0).unwrap();
    let log = RecordingObserver::new();
    env.add_observer(log.clone());

    let carrier = env
        .add_thing(
            agent_facing(
                Direction::Right,
                ScriptedProgram::new([GridAction::Grab, GridAction::Forward]),
            ),
            Some(Point::new(1, 1)),
        )
        .unwrap()
        .unwrap();
    let gem = env
        .add_thing(
            Entity::new(EntityKind::new("Gem")).with_portable(true).into(),
            Some(Point::new(1, 1)),
        )
        .unwrap()
        .unwrap();
    log.clear();

    env.run(2);
    assert_eq!(location(&env, carrier), Point::new(2, 1));
    assert_eq!(location(&env, gem), Point::new(2, 1));
    assert_eq!(
        log.events(),
        vec![
            ObservedEvent::Moved {
                id: carrier,
                location: Some(Point::new(2, 1))
            },
            ObservedEvent::Moved {
                id: gem,
                location: Some(Point::new(2, 1))
            },
        ]
    );
}

#[test]
fn deleting_agent_deletes_held_first() {
    let mut env = open_grid(10, 10, 0).unwrap();
    let log = RecordingObserver::new();
    let carrier = env
        .add_thing(
            agent_facing(Direction::Right, ConstProgram(GridAction::Grab)),
            Some(Point::new(2, 2)),
        )
        .unwrap()
        .unwrap();
    let rock = env
        .add_thing(
            Entity::new(EntityKind::THING).with_portable(true).into(),
            Some(Point::new(2, 2)),
        )
        .unwrap()
        .unwrap();
    env.step();
    env.add_observer(log.clone());

    env.delete_thing(carrier).unwrap();
    assert_eq!(
        log.events(),
        vec![
            ObservedEvent::Deleted { id: rock },
            ObservedEvent::Deleted { id: carrier },
        ]
    );
    assert!(env.world().is_empty());
}

// ── Bounds ──────────────────────────────────────────────────────

#[test]
fn five_by_five_walled_bounds() {
    let env = walled_grid(5, 5, 0).unwrap();
    assert!(!env.is_inbounds(Point::new(0, 0)));
    assert!(env.is_inbounds(Point::new(1, 1)));
    let b = env.bounds();
    assert_eq!((b.x_start, b.x_end), (1, 4));
    assert_eq!((b.y_start, b.y_end), (1, 4));
}

proptest! {
    #[test]
    fn random_locations_stay_inbounds(
        w in 3u32..16, h in 3u32..16, seed in any::<u64>(),
    ) {
        let mut env = walled_grid(w, h, seed).unwrap();
        let first = env.random_location_inbounds(None).unwrap();
        prop_assert!(env.is_inbounds(first));
        if env.bounds().cell_count() > 1 {
            let other = env.random_location_inbounds(Some(first)).unwrap();
            prop_assert!(env.is_inbounds(other));
            prop_assert_ne!(other, first);
        }
    }
}

// ── Termination ─────────────────────────────────────────────────

#[test]
fn run_is_bounded_by_max_steps() {
    let mut env = open_grid(10, 10, 0).unwrap();
    env.add_thing(
        agent_facing(Direction::Right, ConstProgram(GridAction::NoOp)),
        None,
    )
    .unwrap();
    assert_eq!(env.run(4), 4);
    assert_eq!(env.world().tick().0, 4);
}

#[test]
fn run_checks_done_before_first_step() {
    let mut env = open_grid(10, 10, 0).unwrap();
    assert!(env.is_done());
    assert_eq!(env.run(10), 0);

    let id = env
        .add_thing(
            agent_facing(Direction::Right, ConstProgram(GridAction::NoOp)),
            None,
        )
        .unwrap()
        .unwrap();
    env.world_mut().thing_mut(id).unwrap().set_alive(false);
    assert!(env.is_done());
    assert_eq!(env.run(10), 0);
    assert_eq!(env.world().tick().0, 0);
}

// ── Duplicates ──────────────────────────────────────────────────

#[test]
fn same_entity_cannot_be_added_twice() {
    let mut env = open_grid(10, 10, 0).unwrap();
    let rock: Entity<Point> = Entity::new(EntityKind::THING);
    let again = rock.clone();
    let id = env
        .add_thing(rock.into(), Some(Point::new(3, 3)))
        .unwrap()
        .unwrap();
    assert_eq!(
        env.add_thing(again.into(), Some(Point::new(4, 4))),
        Err(WorldError::AlreadyPresent { id })
    );
    assert_eq!(env.things().len(), 1);
    assert_eq!(location(&env, id), Point::new(3, 3));
}
