//! Small table-driven state machine with queued transitions.
//!
//! States are identified by small integers. Each state carries three action
//! lists (Entry, Evaluate, Exit); multiple actions may fire per trigger.
//! Actions are plain function pointers over a caller-provided context type,
//! and request transitions through a [`TransitionQueue`] rather than on the
//! engine itself. This keeps the queued-transition discipline of the design:
//! an Exit or Entry action that requests another transition does not recurse,
//! it re-arms the queue, which [`Engine::do_transition`] drains in a loop
//! until quiescent.
//!
//! The engine starts with no valid state; the first
//! [`transition`](Engine::transition) + [`do_transition`](Engine::do_transition)
//! pair establishes one.

use thiserror::Error;

/// An action bound to a state trigger.
///
/// The first parameter is the machine's context (the owning component's
/// mutable state); the second is where the action may request a transition.
pub type Action<C> = fn(&mut C, &mut TransitionQueue);

/// Trigger slots of a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionTrigger {
    /// Runs when the state is entered.
    Entry = 0,
    /// Runs on [`Engine::evaluate`].
    Evaluate = 1,
    /// Runs when the state is left.
    Exit = 2,
}

/// Pending transition requested by an action or an external caller.
#[derive(Default)]
pub struct TransitionQueue {
    next: Option<usize>,
}

impl TransitionQueue {
    /// Requests a transition to `state`. A later request overrides an
    /// earlier one that has not been committed yet.
    pub fn transition(&mut self, state: usize) {
        self.next = Some(state);
    }
}

/// Errors for state machine setup.
#[derive(Debug, Error)]
pub enum StateMachineError {
    /// A state id outside the configured range was used.
    #[error("invalid state id {0}")]
    InvalidState(usize),
}

struct State<C> {
    actions: [Vec<Action<C>>; 3],
}

impl<C> State<C> {
    fn new() -> Self {
        Self {
            actions: [Vec::new(), Vec::new(), Vec::new()],
        }
    }
}

/// The state machine engine.
pub struct Engine<C> {
    states: Vec<State<C>>,
    queue: TransitionQueue,
    current: usize,
}

impl<C> Engine<C> {
    /// Creates an engine with `state_count` empty states and no current
    /// state.
    pub fn new(state_count: usize) -> Self {
        let mut states = Vec::with_capacity(state_count);
        for _ in 0..state_count {
            states.push(State::new());
        }
        Self {
            states,
            queue: TransitionQueue::default(),
            current: state_count,
        }
    }

    /// Appends an action to the given state and trigger.
    pub fn add_action(
        &mut self,
        state: usize,
        trigger: ActionTrigger,
        action: Action<C>,
    ) -> Result<(), StateMachineError> {
        let slot = self
            .states
            .get_mut(state)
            .ok_or(StateMachineError::InvalidState(state))?;
        slot.actions[trigger as usize].push(action);
        Ok(())
    }

    /// The current state id, or the state count while no state is active.
    pub fn current_state(&self) -> usize {
        self.current
    }

    /// Requests a transition; committed by [`do_transition`](Engine::do_transition).
    pub fn transition(&mut self, state: usize) -> Result<(), StateMachineError> {
        if state >= self.states.len() {
            return Err(StateMachineError::InvalidState(state));
        }
        self.queue.transition(state);
        Ok(())
    }

    /// Commits any queued transition: runs Exit actions of the current state,
    /// then Entry actions of the target. Loops while Entry/Exit actions queue
    /// further transitions. Returns whether any transition occurred.
    pub fn do_transition(&mut self, ctx: &mut C) -> bool {
        let occurred = self.queue.next.is_some();
        while let Some(target) = self.queue.next.take() {
            if target >= self.states.len() {
                // Actions only see a bare queue, so guard here as well.
                break;
            }
            if self.current < self.states.len() {
                let exits = &self.states[self.current].actions[ActionTrigger::Exit as usize];
                for action in exits {
                    action(ctx, &mut self.queue);
                }
            }
            self.current = target;
            let entries = &self.states[self.current].actions[ActionTrigger::Entry as usize];
            for action in entries {
                action(ctx, &mut self.queue);
            }
        }
        occurred
    }

    /// Runs the current state's Evaluate actions, then commits any queued
    /// transition.
    pub fn evaluate(&mut self, ctx: &mut C) {
        if self.current < self.states.len() {
            let evals = &self.states[self.current].actions[ActionTrigger::Evaluate as usize];
            for action in evals {
                action(ctx, &mut self.queue);
            }
        }
        self.do_transition(ctx);
    }
}
