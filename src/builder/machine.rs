//! Builder for constructing state machines.

use crate::core::State;
use crate::error::ConfigurationError;
use crate::machine::{SelfTransitionPolicy, StateMachine, DEFAULT_MACHINE_NAME};

/// Builder for constructing state machines with a fluent API.
///
/// ```rust
/// use aios_core::builder::StateMachineBuilder;
/// use aios_core::SelfTransitionPolicy;
///
/// let machine = StateMachineBuilder::new()
///     .name("crew")
///     .states(["planning", "executing", "monitoring"].map(String::from))
///     .transition("planning".to_string(), "executing".to_string())
///     .transition("executing".to_string(), "monitoring".to_string())
///     .transition("monitoring".to_string(), "executing".to_string())
///     .self_transitions(SelfTransitionPolicy::AsDeclared)
///     .build()
///     .unwrap();
///
/// assert_eq!(machine.current(), "planning");
/// ```
pub struct StateMachineBuilder<S: State> {
    name: Option<String>,
    states: Vec<S>,
    transitions: Option<Vec<(S, S)>>,
    initial: Option<S>,
    self_transitions: SelfTransitionPolicy,
}

impl<S: State> StateMachineBuilder<S> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            name: None,
            states: Vec::new(),
            transitions: None,
            initial: None,
            self_transitions: SelfTransitionPolicy::default(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Declare one state. Declaration order is preserved.
    pub fn state(mut self, state: S) -> Self {
        self.states.push(state);
        self
    }

    /// Declare several states.
    pub fn states(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.states.extend(states);
        self
    }

    /// Allow one edge. Declaring any edge switches the machine from the
    /// complete graph to the declared graph.
    pub fn transition(mut self, from: S, to: S) -> Self {
        self.transitions.get_or_insert_with(Vec::new).push((from, to));
        self
    }

    pub fn transitions(mut self, edges: impl IntoIterator<Item = (S, S)>) -> Self {
        self.transitions.get_or_insert_with(Vec::new).extend(edges);
        self
    }

    /// Set the initial state. Defaults to the first declared state.
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    pub fn self_transitions(mut self, policy: SelfTransitionPolicy) -> Self {
        self.self_transitions = policy;
        self
    }

    /// Build the state machine, reporting every configuration problem found.
    pub fn build(self) -> Result<StateMachine<S>, ConfigurationError> {
        StateMachine::from_parts(
            self.name.unwrap_or_else(|| DEFAULT_MACHINE_NAME.to_string()),
            self.states,
            self.transitions,
            self.initial,
            self.self_transitions,
        )
    }
}

impl<S: State> Default for StateMachineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigIssue;

    fn s(name: &str) -> String {
        name.to_string()
    }

    #[test]
    fn builder_requires_states() {
        let result = StateMachineBuilder::<String>::new().build();
        let error = result.unwrap_err();
        assert_eq!(error.issues(), &[ConfigIssue::EmptyStates]);
    }

    #[test]
    fn builder_rejects_unknown_initial_state() {
        let result = StateMachineBuilder::new()
            .states(vec![s("idle"), s("done")])
            .initial(s("paused"))
            .build();

        assert!(matches!(
            result.unwrap_err().issues(),
            [ConfigIssue::UnknownInitialState { state }] if state == "paused"
        ));
    }

    #[test]
    fn builder_rejects_edges_to_undeclared_states() {
        let error = StateMachineBuilder::new()
            .states(vec![s("idle"), s("done")])
            .transition(s("idle"), s("ghost"))
            .transition(s("phantom"), s("done"))
            .build()
            .unwrap_err();

        assert_eq!(error.issues().len(), 2);
    }

    #[test]
    fn builder_reports_duplicates_and_bad_initial_together() {
        let error = StateMachineBuilder::new()
            .state(s("idle"))
            .state(s("idle"))
            .initial(s("paused"))
            .build()
            .unwrap_err();

        assert_eq!(error.issues().len(), 2);
    }

    #[test]
    fn fluent_api_builds_machine() {
        let machine = StateMachineBuilder::new()
            .name("deploy")
            .state(s("idle"))
            .states(vec![s("working"), s("done")])
            .transitions(vec![(s("idle"), s("working")), (s("working"), s("done"))])
            .initial(s("working"))
            .build()
            .unwrap();

        assert_eq!(machine.name(), "deploy");
        assert_eq!(machine.current(), "working");
        assert_eq!(machine.states().len(), 3);
        assert_eq!(machine.graph().declared_edges().unwrap().len(), 2);
    }

    #[test]
    fn empty_transition_list_declares_empty_graph() {
        let mut machine = StateMachineBuilder::new()
            .states(vec![s("idle"), s("done")])
            .transitions(Vec::new())
            .build()
            .unwrap();

        assert!(machine.transition(s("done")).is_err());
        assert!(machine.allowed_targets().is_empty());
    }
}
