//! Agent decision programs.
//!
//! A [`Program`] maps a percept to an action and may keep private state
//! between calls. It sees only the percept it is handed, never the agent or
//! the environment. Any `FnMut(&P) -> A` closure is a program.
//!
//! Besides the trait this module ships the classic program shapes:
//!
//! - [`TableDrivenProgram`]: looks up the whole percept sequence in a table.
//! - [`RandomProgram`]: picks uniformly from a fixed action list (seeded).
//! - [`SimpleReflexProgram`]: interprets the percept and fires the first
//!   matching [`Rule`].
//! - [`ModelBasedReflexProgram`]: folds percepts into an internal state
//!   before rule matching.
//! - [`TraceProgram`]: wraps another program and logs each decision.
//! - [`InteractiveProgram`]: asks a human for each action.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::io::{BufRead, Write};
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

/// A decision function from percepts to actions.
pub trait Program<P, A> {
    /// Choose an action for this percept.
    fn decide(&mut self, percept: &P) -> A;
}

impl<P, A, F> Program<P, A> for F
where
    F: FnMut(&P) -> A,
{
    fn decide(&mut self, percept: &P) -> A {
        self(percept)
    }
}

// ── TraceProgram ────────────────────────────────────────────────

/// Wraps a program and logs every percept/action pair at `info` level.
pub struct TraceProgram<G> {
    label: String,
    inner: G,
}

impl<G> TraceProgram<G> {
    /// Trace `inner`, tagging log lines with `label`.
    pub fn new(label: impl Into<String>, inner: G) -> Self {
        Self {
            label: label.into(),
            inner,
        }
    }

    /// The wrapped program.
    pub fn into_inner(self) -> G {
        self.inner
    }
}

impl<P, A, G> Program<P, A> for TraceProgram<G>
where
    P: fmt::Debug,
    A: fmt::Debug,
    G: Program<P, A>,
{
    fn decide(&mut self, percept: &P) -> A {
        let action = self.inner.decide(percept);
        info!(agent = %self.label, ?percept, ?action, "agent perceives and acts");
        action
    }
}

// ── TableDrivenProgram ──────────────────────────────────────────

/// Selects an action from the full percept sequence seen so far.
///
/// Practical only for tiny domains. Sequences missing from the table yield
/// `A::default()`.
pub struct TableDrivenProgram<P, A> {
    table: HashMap<Vec<P>, A>,
    percepts: Vec<P>,
}

impl<P, A> TableDrivenProgram<P, A>
where
    P: Eq + Hash,
{
    /// Build from `(percept sequence, action)` pairs.
    pub fn new(table: impl IntoIterator<Item = (Vec<P>, A)>) -> Self {
        Self {
            table: table.into_iter().collect(),
            percepts: Vec::new(),
        }
    }

    /// Percepts observed so far.
    pub fn history(&self) -> &[P] {
        &self.percepts
    }
}

impl<P, A> Program<P, A> for TableDrivenProgram<P, A>
where
    P: Eq + Hash + Clone,
    A: Clone + Default,
{
    fn decide(&mut self, percept: &P) -> A {
        self.percepts.push(percept.clone());
        self.table.get(&self.percepts).cloned().unwrap_or_default()
    }
}

// ── RandomProgram ───────────────────────────────────────────────

/// Ignores percepts and picks an action uniformly at random.
///
/// Uses a seeded ChaCha8 generator, so two programs built with the same
/// seed make the same choices. An empty action list yields `A::default()`.
pub struct RandomProgram<A> {
    actions: Vec<A>,
    rng: ChaCha8Rng,
}

impl<A> RandomProgram<A> {
    /// Choose among `actions`, seeded with `seed`.
    pub fn new(actions: Vec<A>, seed: u64) -> Self {
        Self {
            actions,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl<P, A> Program<P, A> for RandomProgram<A>
where
    A: Clone + Default,
{
    fn decide(&mut self, _percept: &P) -> A {
        self.actions
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
    }
}

// ── Rules ───────────────────────────────────────────────────────

/// A condition-action rule over an interpreted state `S`.
pub struct Rule<S, A> {
    condition: Box<dyn Fn(&S) -> bool>,
    action: A,
}

impl<S, A> Rule<S, A> {
    /// Fire `action` whenever `condition` holds.
    pub fn new(condition: impl Fn(&S) -> bool + 'static, action: A) -> Self {
        Self {
            condition: Box::new(condition),
            action,
        }
    }

    /// Whether the rule applies to `state`.
    pub fn matches(&self, state: &S) -> bool {
        (self.condition)(state)
    }

    /// The rule's action.
    pub fn action(&self) -> &A {
        &self.action
    }
}

/// First rule whose condition holds for `state`.
pub fn rule_match<'r, S, A>(state: &S, rules: &'r [Rule<S, A>]) -> Option<&'r Rule<S, A>> {
    rules.iter().find(|rule| rule.matches(state))
}

// ── SimpleReflexProgram ─────────────────────────────────────────

/// Acts on the current percept alone.
///
/// The percept is interpreted into a state, then the first matching rule
/// fires. With no matching rule the program returns `A::default()`.
pub struct SimpleReflexProgram<P, S, A> {
    interpret_input: Box<dyn Fn(&P) -> S>,
    rules: Vec<Rule<S, A>>,
}

impl<P, S, A> SimpleReflexProgram<P, S, A> {
    /// Build from an interpreter and an ordered rule list.
    pub fn new(interpret_input: impl Fn(&P) -> S + 'static, rules: Vec<Rule<S, A>>) -> Self {
        Self {
            interpret_input: Box::new(interpret_input),
            rules,
        }
    }
}

impl<P, S, A> Program<P, A> for SimpleReflexProgram<P, S, A>
where
    A: Clone + Default,
{
    fn decide(&mut self, percept: &P) -> A {
        let state = (self.interpret_input)(percept);
        rule_match(&state, &self.rules)
            .map(|rule| rule.action().clone())
            .unwrap_or_default()
    }
}

// ── ModelBasedReflexProgram ─────────────────────────────────────

/// State-update function for [`ModelBasedReflexProgram`]:
/// `(previous state, previous action, percept, model) -> new state`.
pub type UpdateState<S, A, P, M> = Box<dyn Fn(&S, Option<&A>, &P, &M) -> S>;

/// Acts on an internal state updated from each percept and a world model.
pub struct ModelBasedReflexProgram<P, S, M, A> {
    state: S,
    last_action: Option<A>,
    model: M,
    update_state: UpdateState<S, A, P, M>,
    rules: Vec<Rule<S, A>>,
}

impl<P, S, M, A> ModelBasedReflexProgram<P, S, M, A> {
    /// Build with an initial state, a model, an updater, and rules.
    pub fn new(
        initial_state: S,
        model: M,
        update_state: impl Fn(&S, Option<&A>, &P, &M) -> S + 'static,
        rules: Vec<Rule<S, A>>,
    ) -> Self {
        Self {
            state: initial_state,
            last_action: None,
            model,
            update_state: Box::new(update_state),
            rules,
        }
    }

    /// The current internal state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The action chosen on the previous call.
    pub fn last_action(&self) -> Option<&A> {
        self.last_action.as_ref()
    }
}

impl<P, S, M, A> Program<P, A> for ModelBasedReflexProgram<P, S, M, A>
where
    A: Clone + Default,
{
    fn decide(&mut self, percept: &P) -> A {
        self.state = (self.update_state)(
            &self.state,
            self.last_action.as_ref(),
            percept,
            &self.model,
        );
        let action = rule_match(&self.state, &self.rules)
            .map(|rule| rule.action().clone())
            .unwrap_or_default();
        self.last_action = Some(action.clone());
        action
    }
}

// ── InteractiveProgram ──────────────────────────────────────────

/// Prompts for an action on every percept.
///
/// Writes `Percept=<percept>; action? ` to the output and parses a line from
/// the input. Unparseable lines are re-prompted; end of input or an I/O error
/// yields `A::default()`.
pub struct InteractiveProgram<R, W> {
    input: R,
    output: W,
}

impl<R, W> InteractiveProgram<R, W> {
    /// Prompt on `output`, read answers from `input`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl InteractiveProgram<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Prompt on the process's standard streams.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<P, A, R, W> Program<P, A> for InteractiveProgram<R, W>
where
    P: fmt::Debug,
    A: FromStr + Default,
    A::Err: fmt::Display,
    R: BufRead,
    W: Write,
{
    fn decide(&mut self, percept: &P) -> A {
        loop {
            if let Err(e) = write!(self.output, "Percept={percept:?}; action? ")
                .and_then(|_| self.output.flush())
            {
                warn!(error = %e, "failed to write action prompt");
                return A::default();
            }
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return A::default(),
                Ok(_) => match line.trim().parse::<A>() {
                    Ok(action) => return action,
                    Err(e) => warn!(input = line.trim(), error = %e, "unrecognised action"),
                },
                Err(e) => {
                    warn!(error = %e, "failed to read action");
                    return A::default();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[derive(Clone, Debug, Default, PartialEq, Eq)]
    enum Act {
        #[default]
        NoOp,
        Suck,
        Right,
        Left,
    }

    impl FromStr for Act {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "Suck" => Ok(Act::Suck),
                "Right" => Ok(Act::Right),
                "Left" => Ok(Act::Left),
                "NoOp" => Ok(Act::NoOp),
                other => Err(format!("bad action {other}")),
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Loc {
        A,
        B,
    }

    #[test]
    fn closures_are_programs() {
        let mut p = |x: &i32| x * 2;
        assert_eq!(Program::decide(&mut p, &21), 42);
    }

    #[test]
    fn boxed_programs_delegate() {
        let mut counter = 0;
        let mut boxed: Box<dyn Program<(), u32>> = Box::new(move |_: &()| {
            counter += 1;
            counter
        });
        assert_eq!(boxed.decide(&()), 1);
        assert_eq!(boxed.decide(&()), 2);
    }

    #[test]
    fn table_driven_uses_whole_sequence() {
        let mut p = TableDrivenProgram::new([
            (vec![(Loc::A, true)], Act::Suck),
            (vec![(Loc::A, true), (Loc::A, false)], Act::Right),
        ]);
        assert_eq!(p.decide(&(Loc::A, true)), Act::Suck);
        assert_eq!(p.decide(&(Loc::A, false)), Act::Right);
        assert_eq!(p.decide(&(Loc::B, true)), Act::NoOp);
        assert_eq!(p.history().len(), 3);
    }

    #[test]
    fn random_program_is_seeded() {
        let actions = vec![Act::Suck, Act::Right, Act::Left, Act::NoOp];
        let mut a = RandomProgram::new(actions.clone(), 7);
        let mut b = RandomProgram::new(actions.clone(), 7);
        for _ in 0..32 {
            let x: Act = a.decide(&());
            let y: Act = b.decide(&());
            assert_eq!(x, y);
            assert!(actions.contains(&x));
        }
    }

    #[test]
    fn random_program_with_no_actions_idles() {
        let mut p: RandomProgram<Act> = RandomProgram::new(Vec::new(), 0);
        assert_eq!(Program::<(), Act>::decide(&mut p, &()), Act::NoOp);
    }

    #[test]
    fn simple_reflex_fires_first_matching_rule() {
        let rules = vec![
            Rule::new(|s: &(Loc, bool)| s.1, Act::Suck),
            Rule::new(|s: &(Loc, bool)| s.0 == Loc::A, Act::Right),
            Rule::new(|s: &(Loc, bool)| s.0 == Loc::B, Act::Left),
        ];
        let mut p = SimpleReflexProgram::new(|p: &(Loc, bool)| *p, rules);
        assert_eq!(p.decide(&(Loc::A, true)), Act::Suck);
        assert_eq!(p.decide(&(Loc::A, false)), Act::Right);
        assert_eq!(p.decide(&(Loc::B, false)), Act::Left);
    }

    #[test]
    fn simple_reflex_without_match_idles() {
        let mut p: SimpleReflexProgram<u8, u8, Act> =
            SimpleReflexProgram::new(|p: &u8| *p, vec![Rule::new(|s: &u8| *s > 10, Act::Suck)]);
        assert_eq!(p.decide(&3), Act::NoOp);
    }

    #[test]
    fn model_based_reflex_tracks_state_and_last_action() {
        // State counts percepts; the model is the threshold.
        let rules = vec![Rule::new(|n: &u32| *n >= 2, Act::Suck)];
        let mut p = ModelBasedReflexProgram::new(
            0u32,
            2u32,
            |state: &u32, last: Option<&Act>, _p: &(), _m: &u32| {
                if last == Some(&Act::Suck) {
                    0
                } else {
                    state + 1
                }
            },
            rules,
        );
        assert_eq!(p.decide(&()), Act::NoOp);
        assert_eq!(p.decide(&()), Act::Suck);
        assert_eq!(p.last_action(), Some(&Act::Suck));
        assert_eq!(p.decide(&()), Act::NoOp);
        assert_eq!(*p.state(), 0);
    }

    #[test]
    fn trace_program_passes_action_through() {
        let mut p = TraceProgram::new("tracer", |x: &u8| u16::from(*x) + 1);
        let out: u16 = Program::<u8, u16>::decide(&mut p, &4);
        assert_eq!(out, 5);
    }

    #[test]
    fn interactive_program_reprompts_until_parse() {
        let input = Cursor::new("Jump\nSuck\n");
        let mut output = Vec::new();
        let action: Act = {
            let mut p = InteractiveProgram::new(input, &mut output);
            p.decide(&(Loc::A, true))
        };
        assert_eq!(action, Act::Suck);
        let prompt = String::from_utf8(output).unwrap();
        assert_eq!(prompt.matches("action?").count(), 2);
        assert!(prompt.starts_with("Percept=(A, true); action? "));
    }

    #[test]
    fn interactive_program_idles_at_end_of_input() {
        let mut p = InteractiveProgram::new(Cursor::new(""), Vec::new());
        let action: Act = p.decide(&1u8);
        assert_eq!(action, Act::NoOp);
    }
}
