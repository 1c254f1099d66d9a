//! Declared states, the optional transition graph, and the rules that decide
//! whether a move is legal.

use crate::core::State;
use crate::error::{ConfigIssue, ConfigurationError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Whether a machine may move from a state to that same state.
///
/// A declared graph always has the final say: `(s, s)` is legal there only
/// when the graph lists it, whatever the policy. The policy decides the
/// undeclared (complete) graph.
///
/// The default rejects `idle -> idle` when no graph is declared. Callers that
/// only ever checked membership, and so accepted self-transitions, should
/// pick [`SelfTransitionPolicy::Always`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfTransitionPolicy {
    /// Without a declared graph every self-transition is rejected.
    #[default]
    AsDeclared,

    /// Without a declared graph `(s, s)` is legal for every declared state.
    Always,
}

/// Immutable set of declared states plus the edges allowed between them.
#[derive(Debug, Clone)]
pub struct TransitionGraph<S: State> {
    states: Vec<S>,
    members: HashSet<S>,
    declared: Option<Vec<(S, S)>>,
    adjacency: HashMap<S, HashSet<S>>,
    self_transitions: SelfTransitionPolicy,
}

impl<S: State> TransitionGraph<S> {
    /// Validate and assemble a graph.
    ///
    /// `edges == None` means every move between distinct declared states is
    /// legal. Repeated edges are collapsed.
    pub fn new(
        states: Vec<S>,
        edges: Option<Vec<(S, S)>>,
        self_transitions: SelfTransitionPolicy,
    ) -> Result<Self, ConfigurationError> {
        into_result(validate(&states, edges.as_deref(), None))?;
        Ok(Self::from_validated(states, edges, self_transitions))
    }

    /// Assemble a graph from a configuration that already passed [`validate`].
    pub(crate) fn from_validated(
        states: Vec<S>,
        edges: Option<Vec<(S, S)>>,
        self_transitions: SelfTransitionPolicy,
    ) -> Self {
        let members: HashSet<S> = states.iter().cloned().collect();
        let mut adjacency: HashMap<S, HashSet<S>> = HashMap::new();
        let declared = edges.map(|edges| {
            let mut unique = Vec::with_capacity(edges.len());
            for (from, to) in edges {
                if adjacency.entry(from.clone()).or_default().insert(to.clone()) {
                    unique.push((from, to));
                }
            }
            unique
        });

        Self {
            states,
            members,
            declared,
            adjacency,
            self_transitions,
        }
    }

    /// Declared states in declaration order.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn contains(&self, state: &S) -> bool {
        self.members.contains(state)
    }

    /// Explicitly declared edges, or `None` for the complete graph.
    pub fn declared_edges(&self) -> Option<&[(S, S)]> {
        self.declared.as_deref()
    }

    pub fn self_transitions(&self) -> SelfTransitionPolicy {
        self.self_transitions
    }

    /// Whether moving from `from` to `to` is legal.
    ///
    /// Both states must be declared; an undeclared endpoint is never permitted.
    pub fn permits(&self, from: &S, to: &S) -> bool {
        if !self.contains(from) || !self.contains(to) {
            return false;
        }
        match &self.declared {
            Some(_) => self
                .adjacency
                .get(from)
                .is_some_and(|targets| targets.contains(to)),
            None => from != to || self.self_transitions == SelfTransitionPolicy::Always,
        }
    }

    /// Legal targets from `from`, in declaration order.
    pub fn targets(&self, from: &S) -> Vec<S> {
        self.states
            .iter()
            .filter(|to| self.permits(from, to))
            .cloned()
            .collect()
    }

    pub(crate) fn state_names(&self) -> Vec<String> {
        self.states.iter().map(|s| s.name().to_string()).collect()
    }
}

/// Check a machine configuration, accumulating every issue instead of
/// stopping at the first.
pub fn validate<S: State>(
    states: &[S],
    edges: Option<&[(S, S)]>,
    initial: Option<&S>,
) -> Validation<(), NonEmptyVec<ConfigIssue>> {
    let mut checks: Vec<Validation<(), NonEmptyVec<ConfigIssue>>> = Vec::new();

    checks.push(if states.is_empty() {
        Validation::fail(ConfigIssue::EmptyStates)
    } else {
        Validation::success(())
    });

    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for state in states {
        if !seen.insert(state) && reported.insert(state) {
            checks.push(Validation::fail(ConfigIssue::DuplicateState {
                state: state.name().to_string(),
            }));
        }
    }

    if let Some(initial) = initial {
        if !seen.contains(initial) {
            checks.push(Validation::fail(ConfigIssue::UnknownInitialState {
                state: initial.name().to_string(),
            }));
        }
    }

    for (from, to) in edges.unwrap_or_default() {
        for endpoint in [from, to] {
            if !seen.contains(endpoint) {
                checks.push(Validation::fail(ConfigIssue::UnknownTransitionState {
                    from: from.name().to_string(),
                    to: to.name().to_string(),
                    state: endpoint.name().to_string(),
                }));
            }
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

pub(crate) fn into_result(
    validation: Validation<(), NonEmptyVec<ConfigIssue>>,
) -> Result<(), ConfigurationError> {
    match validation {
        Validation::Success(_) => Ok(()),
        Validation::Failure(issues) => Err(ConfigurationError::new(
            issues.iter().cloned().collect(),
        )),
    }
}
