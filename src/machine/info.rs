//! Read-only views of a machine for reporting and serialization.

use crate::core::{State, StateHistory};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where a machine is and how long it has been there.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateInfo<S: State> {
    pub current: S,

    /// Time since the last committed transition, or since creation/reset
    /// when nothing has been committed.
    pub elapsed_since_last_transition: Duration,

    pub transition_count: usize,
}

/// Owned copy of a machine's configuration and progress.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineSnapshot<S: State> {
    pub name: String,
    pub states: Vec<S>,
    pub initial: S,
    pub current: S,
    pub history: StateHistory<S>,
}

#[cfg(test)]
mod tests {
    use crate::StateMachine;

    #[test]
    fn snapshot_serializes_to_json() {
        let mut machine =
            StateMachine::new(vec!["idle".to_string(), "working".to_string()]).unwrap();
        machine.transition("working".to_string()).unwrap();

        let json = serde_json::to_value(machine.snapshot()).unwrap();
        assert_eq!(json["name"], "state");
        assert_eq!(json["current"], "working");
        assert_eq!(json["initial"], "idle");
        assert_eq!(json["history"]["transitions"][0]["from"], "idle");
        assert_eq!(json["history"]["transitions"][0]["to"], "working");
    }

    #[test]
    fn state_info_serializes_counts() {
        let machine = StateMachine::new(vec!["idle".to_string()]).unwrap();
        let json = serde_json::to_value(machine.current_state_info()).unwrap();
        assert_eq!(json["current"], "idle");
        assert_eq!(json["transition_count"], 0);
    }
}
