//! Test utilities and fixtures for agentworld development.
//!
//! Provides a [`RecordingObserver`] that captures observer notifications, a
//! [`PerceptRecorder`] program that records what an agent was shown, and the
//! scripted programs and grid builders in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::cell::RefCell;
use std::rc::Rc;

use agentworld_core::{Entity, EntityId, Point, Program};
use agentworld_env::Observer;

/// One notification received by a [`RecordingObserver`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObservedEvent {
    Added { id: EntityId, location: Point },
    Moved { id: EntityId, location: Option<Point> },
    Deleted { id: EntityId },
}

/// Observer that appends every notification to a shared log.
///
/// Clone it before handing it to the environment; the clone shares the log.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    log: Rc<RefCell<Vec<ObservedEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events seen so far.
    pub fn events(&self) -> Vec<ObservedEvent> {
        self.log.borrow().clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl Observer<Point> for RecordingObserver {
    fn thing_moved(&mut self, entity: &Entity<Point>) {
        self.log.borrow_mut().push(ObservedEvent::Moved {
            id: entity.id(),
            location: entity.location().copied(),
        });
    }

    fn thing_added(&mut self, entity: &Entity<Point>, location: &Point) {
        self.log.borrow_mut().push(ObservedEvent::Added {
            id: entity.id(),
            location: *location,
        });
    }

    fn thing_deleted(&mut self, entity: &Entity<Point>) {
        self.log
            .borrow_mut()
            .push(ObservedEvent::Deleted { id: entity.id() });
    }
}

/// Program that records every percept it is given and answers with a
/// fixed action.
pub struct PerceptRecorder<P, A> {
    seen: Rc<RefCell<Vec<P>>>,
    action: A,
}

impl<P, A> PerceptRecorder<P, A> {
    /// A recorder that always answers `action`, plus a handle to its log.
    pub fn new(action: A) -> (Self, Rc<RefCell<Vec<P>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                seen: Rc::clone(&seen),
                action,
            },
            seen,
        )
    }
}

impl<P: Clone, A: Clone> Program<P, A> for PerceptRecorder<P, A> {
    fn decide(&mut self, percept: &P) -> A {
        self.seen.borrow_mut().push(percept.clone());
        self.action.clone()
    }
}
