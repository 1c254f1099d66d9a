//! State machine that validates and records transitions.

use crate::core::{State, StateHistory, StateTransition};
use crate::definition::MachineDefinition;
use crate::error::{ConfigurationError, TransitionError};
use crate::machine::graph::{into_result, validate, SelfTransitionPolicy, TransitionGraph};
use crate::machine::info::{MachineSnapshot, StateInfo};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

pub(crate) const DEFAULT_MACHINE_NAME: &str = "state";

/// Finite-state tracker over a declared set of states.
///
/// # Example
///
/// ```rust
/// use aios_core::StateMachine;
///
/// let mut machine = StateMachine::new(vec![
///     "idle".to_string(),
///     "working".to_string(),
///     "done".to_string(),
/// ])
/// .unwrap();
///
/// machine.transition("working".to_string()).unwrap();
/// machine.transition("done".to_string()).unwrap();
///
/// assert_eq!(machine.current(), "done");
/// assert_eq!(machine.history().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct StateMachine<S: State> {
    name: String,
    graph: TransitionGraph<S>,
    initial: S,
    current: S,
    history: StateHistory<S>,
    last_changed_at: DateTime<Utc>,
}

impl<S: State> StateMachine<S> {
    /// Machine over `states` with no declared graph, starting in the first
    /// state.
    pub fn new(states: Vec<S>) -> Result<Self, ConfigurationError> {
        Self::from_parts(
            DEFAULT_MACHINE_NAME.to_string(),
            states,
            None,
            None,
            SelfTransitionPolicy::default(),
        )
    }

    pub(crate) fn from_parts(
        name: String,
        states: Vec<S>,
        edges: Option<Vec<(S, S)>>,
        initial: Option<S>,
        self_transitions: SelfTransitionPolicy,
    ) -> Result<Self, ConfigurationError> {
        into_result(validate(&states, edges.as_deref(), initial.as_ref()))?;

        // Validation rejects an empty state list.
        let initial = initial.unwrap_or_else(|| states[0].clone());
        let graph = TransitionGraph::from_validated(states, edges, self_transitions);

        debug!(
            machine = %name,
            states = graph.states().len(),
            declared_graph = graph.declared_edges().is_some(),
            initial = initial.name(),
            "State machine created"
        );

        Ok(Self {
            name,
            graph,
            current: initial.clone(),
            initial,
            history: StateHistory::new(),
            last_changed_at: Utc::now(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared states in declaration order.
    pub fn states(&self) -> &[S] {
        self.graph.states()
    }

    pub fn graph(&self) -> &TransitionGraph<S> {
        &self.graph
    }

    /// The state this machine started in and returns to on reset.
    pub fn initial(&self) -> &S {
        &self.initial
    }

    pub fn current(&self) -> &S {
        &self.current
    }

    pub fn is_valid_state(&self, state: &S) -> bool {
        self.graph.contains(state)
    }

    /// Whether `transition(to)` would succeed right now.
    pub fn can_transition(&self, to: &S) -> bool {
        self.graph.permits(&self.current, to)
    }

    /// States reachable in one move from the current state.
    pub fn allowed_targets(&self) -> Vec<S> {
        self.graph.targets(&self.current)
    }

    /// Move to `to`, recording the transition.
    ///
    /// On error the current state and history are unchanged.
    pub fn transition(&mut self, to: S) -> Result<(), TransitionError> {
        if let Err(error) = self.check(&to) {
            debug!(machine = %self.name, %error, "Transition rejected");
            return Err(error);
        }

        let now = Utc::now();
        let from = std::mem::replace(&mut self.current, to.clone());
        debug!(
            machine = %self.name,
            from = from.name(),
            to = to.name(),
            history_len = self.history.len() + 1,
            "Transition committed"
        );
        self.history.append(StateTransition {
            from,
            to,
            timestamp: now,
        });
        self.last_changed_at = now;
        Ok(())
    }

    fn check(&self, to: &S) -> Result<(), TransitionError> {
        if !self.graph.contains(to) {
            return Err(TransitionError::InvalidState {
                state: to.name().to_string(),
                valid: self.graph.state_names(),
            });
        }
        if !self.graph.permits(&self.current, to) {
            return Err(TransitionError::IllegalTransition {
                from: self.current.name().to_string(),
                to: to.name().to_string(),
            });
        }
        Ok(())
    }

    /// Return to the initial state and discard all history.
    pub fn reset(&mut self) {
        info!(
            machine = %self.name,
            discarded = self.history.len(),
            initial = self.initial.name(),
            "State machine reset"
        );
        self.current = self.initial.clone();
        self.history.clear();
        self.last_changed_at = Utc::now();
    }

    pub fn history(&self) -> &StateHistory<S> {
        &self.history
    }

    /// How many times each `(from, to)` edge has been taken since creation or
    /// the last reset.
    pub fn transition_counts(&self) -> HashMap<(S, S), usize> {
        self.history.transition_counts()
    }

    /// Display-oriented summary of where the machine is.
    pub fn current_state_info(&self) -> StateInfo<S> {
        let elapsed = Utc::now()
            .signed_duration_since(self.last_changed_at)
            .to_std()
            .unwrap_or_default();
        StateInfo {
            current: self.current.clone(),
            elapsed_since_last_transition: elapsed,
            transition_count: self.history.len(),
        }
    }

    /// Owned copy of the machine's configuration and progress.
    pub fn snapshot(&self) -> MachineSnapshot<S> {
        MachineSnapshot {
            name: self.name.clone(),
            states: self.graph.states().to_vec(),
            initial: self.initial.clone(),
            current: self.current.clone(),
            history: self.history.clone(),
        }
    }

    /// Definition that rebuilds a fresh machine with this configuration.
    pub fn definition(&self) -> MachineDefinition<S> {
        MachineDefinition {
            name: Some(self.name.clone()),
            states: self.graph.states().to_vec(),
            transitions: self.graph.declared_edges().map(<[_]>::to_vec),
            initial: Some(self.initial.clone()),
            self_transitions: self.graph.self_transitions(),
        }
    }
}

impl<S: State> fmt::Display for StateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateMachine({}: {})", self.name, self.current.name())
    }
}
