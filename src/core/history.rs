//! State transition history tracking.
//!
//! History is an append-only log of committed transitions. Records are never
//! edited or removed individually; the only way to shrink a machine's history
//! is an explicit reset of the machine that owns it.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Record of a single committed state transition.
///
/// # Example
///
/// ```rust
/// use aios_core::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "idle".to_string(),
///     to: "working".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.from, "idle");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state transitions, oldest first.
///
/// # Example
///
/// ```rust
/// use aios_core::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: "idle".to_string(),
///         to: "working".to_string(),
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: "working".to_string(),
///         to: "done".to_string(),
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // idle -> working -> done
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The receiver is left untouched.
    ///
    /// ```rust
    /// use aios_core::core::{StateHistory, StateTransition};
    /// use chrono::Utc;
    ///
    /// let history = StateHistory::new();
    /// let new_history = history.record(StateTransition {
    ///     from: "a".to_string(),
    ///     to: "b".to_string(),
    ///     timestamp: Utc::now(),
    /// });
    /// assert_eq!(new_history.len(), 1);
    /// assert!(history.is_empty());
    /// ```
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Append in place. Only the owning machine commits records this way.
    pub(crate) fn append(&mut self, transition: StateTransition<S>) {
        self.transitions.push(transition);
    }

    pub(crate) fn clear(&mut self) {
        self.transitions.clear();
    }

    /// Get the path of states traversed.
    ///
    /// Returns the first record's `from`, then the `to` of every record.
    /// An empty history has an empty path.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Duration between the first and last recorded transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all transitions in commit order.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    /// Most recently committed transition.
    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Count how many times each `(from, to)` edge was taken.
    ///
    /// ```rust
    /// use aios_core::core::{StateHistory, StateTransition};
    /// use chrono::Utc;
    ///
    /// let step = |from: &str, to: &str| StateTransition {
    ///     from: from.to_string(),
    ///     to: to.to_string(),
    ///     timestamp: Utc::now(),
    /// };
    /// let history = StateHistory::new()
    ///     .record(step("working", "monitoring"))
    ///     .record(step("monitoring", "working"))
    ///     .record(step("working", "monitoring"));
    ///
    /// let counts = history.transition_counts();
    /// assert_eq!(counts[&("working".to_string(), "monitoring".to_string())], 2);
    /// assert_eq!(counts[&("monitoring".to_string(), "working".to_string())], 1);
    /// ```
    pub fn transition_counts(&self) -> HashMap<(S, S), usize> {
        self.transitions
            .iter()
            .fold(HashMap::new(), |mut counts, transition| {
                *counts
                    .entry((transition.from.clone(), transition.to.clone()))
                    .or_insert(0) += 1;
                counts
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(from: &str, to: &str) -> StateTransition<String> {
        StateTransition {
            from: from.to_string(),
            to: to.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<String> = StateHistory::new();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(step("idle", "working"));

        assert_eq!(history.len(), 0);
        assert_eq!(new_history.len(), 1);
    }

    #[test]
    fn append_and_clear_mutate_in_place() {
        let mut history = StateHistory::new();
        history.append(step("idle", "working"));
        history.append(step("working", "done"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().to, "done");

        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(step("idle", "working"))
            .record(step("working", "done"));

        let path = history.get_path();
        assert_eq!(path, vec!["idle", "working", "done"]);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let history = StateHistory::new().record(step("idle", "working"));
        std::thread::sleep(std::time::Duration::from_millis(10));
        let history = history.record(step("working", "done"));

        let duration = history.duration().unwrap();
        assert!(duration >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let history = StateHistory::new().record(step("idle", "working"));
        assert_eq!(history.duration(), Some(std::time::Duration::from_secs(0)));
    }

    #[test]
    fn transition_counts_group_by_edge() {
        let history = StateHistory::new()
            .record(step("idle", "working"))
            .record(step("working", "done"))
            .record(step("done", "working"))
            .record(step("working", "done"));

        let counts = history.transition_counts();
        assert_eq!(counts.len(), 3);
        assert_eq!(counts[&("working".to_string(), "done".to_string())], 2);
        assert_eq!(counts[&("idle".to_string(), "working".to_string())], 1);
        assert_eq!(counts[&("done".to_string(), "working".to_string())], 1);
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(step("idle", "working"));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<String> = serde_json::from_str(&json).unwrap();

        assert_eq!(history, deserialized);
    }
}
