//! Lock-guarded handle for machines driven from more than one thread.

use crate::core::{State, StateHistory};
use crate::error::TransitionError;
use crate::machine::info::{MachineSnapshot, StateInfo};
use crate::machine::StateMachine;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Cloneable handle to one machine. Every call takes the same lock, so the
/// history always matches the current state.
#[derive(Debug)]
pub struct SharedStateMachine<S: State> {
    inner: Arc<Mutex<StateMachine<S>>>,
}

impl<S: State> Clone for SharedStateMachine<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: State> SharedStateMachine<S> {
    pub fn new(machine: StateMachine<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(machine)),
        }
    }

    pub fn transition(&self, to: S) -> Result<(), TransitionError> {
        self.inner.lock().transition(to)
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    pub fn current(&self) -> S {
        self.inner.lock().current().clone()
    }

    pub fn history(&self) -> StateHistory<S> {
        self.inner.lock().history().clone()
    }

    pub fn transition_counts(&self) -> HashMap<(S, S), usize> {
        self.inner.lock().transition_counts()
    }

    pub fn current_state_info(&self) -> StateInfo<S> {
        self.inner.lock().current_state_info()
    }

    pub fn snapshot(&self) -> MachineSnapshot<S> {
        self.inner.lock().snapshot()
    }

    /// Run `f` against the machine while holding the lock.
    pub fn with<R>(&self, f: impl FnOnce(&StateMachine<S>) -> R) -> R {
        let guard = self.inner.lock();
        f(&*guard)
    }
}

impl<S: State> From<StateMachine<S>> for SharedStateMachine<S> {
    fn from(machine: StateMachine<S>) -> Self {
        Self::new(machine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateMachineBuilder;
    use crate::machine::SelfTransitionPolicy;
    use std::thread;

    #[test]
    fn concurrent_transitions_keep_history_consistent() {
        let machine = StateMachineBuilder::new()
            .states(vec!["ping".to_string(), "pong".to_string()])
            .self_transitions(SelfTransitionPolicy::Always)
            .build()
            .unwrap();
        let shared = SharedStateMachine::new(machine);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let shared = shared.clone();
                thread::spawn(move || {
                    let target = if i % 2 == 0 { "ping" } else { "pong" };
                    for _ in 0..50 {
                        shared.transition(target.to_string()).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let history = shared.history();
        assert_eq!(history.len(), 400);
        for pair in history.transitions().windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
        assert_eq!(&history.last().unwrap().to, &shared.current());
    }

    #[test]
    fn handle_exposes_machine_views() {
        let shared: SharedStateMachine<String> =
            StateMachine::new(vec!["idle".to_string(), "working".to_string()])
                .unwrap()
                .into();

        shared.transition("working".to_string()).unwrap();
        assert_eq!(shared.current(), "working");
        assert_eq!(shared.current_state_info().transition_count, 1);
        assert_eq!(shared.snapshot().history.len(), 1);
        assert_eq!(
            shared.transition_counts()[&("idle".to_string(), "working".to_string())],
            1
        );
        assert_eq!(shared.with(|m| m.name().to_string()), "state");

        shared.reset();
        assert_eq!(shared.current(), "idle");
        assert!(shared.history().is_empty());
    }
}
