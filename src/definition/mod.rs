//! Serializable machine configuration.
//!
//! A definition describes how to build a machine: its states, optional
//! transition graph, initial state, and self-transition policy. It carries no
//! runtime progress; build it to get a fresh machine.
//!
//! ```rust
//! use aios_core::definition::MachineDefinition;
//!
//! let json = r#"{
//!     "name": "crew",
//!     "states": ["planning", "executing", "monitoring"],
//!     "transitions": [["planning", "executing"], ["executing", "executing"]],
//!     "self_transitions": "always"
//! }"#;
//!
//! let definition = MachineDefinition::<String>::from_json(json).unwrap();
//! let mut machine = definition.build().unwrap();
//! assert_eq!(machine.current(), "planning");
//!
//! // The declared graph decides self-transitions, whatever the policy.
//! assert!(!machine.can_transition(&"planning".to_string()));
//! machine.transition("executing".to_string()).unwrap();
//! assert!(machine.can_transition(&"executing".to_string()));
//! ```

use crate::core::State;
use crate::error::DefinitionError;
use crate::machine::{SelfTransitionPolicy, StateMachine, DEFAULT_MACHINE_NAME};
use serde::{Deserialize, Serialize};

/// Everything needed to construct a state machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct MachineDefinition<S: State> {
    /// Machine label; defaults to `"state"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Declared states, in order
    pub states: Vec<S>,

    /// Allowed `(from, to)` edges; absent means every move between distinct
    /// states is allowed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transitions: Option<Vec<(S, S)>>,

    /// Starting state; defaults to the first declared state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<S>,

    #[serde(default)]
    pub self_transitions: SelfTransitionPolicy,
}

impl<S: State> MachineDefinition<S> {
    /// Definition with only states; every other setting takes its default.
    pub fn new(states: Vec<S>) -> Self {
        Self {
            name: None,
            states,
            transitions: None,
            initial: None,
            self_transitions: SelfTransitionPolicy::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        serde_json::from_str(json)
            .map_err(|e| DefinitionError::DeserializationFailed(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, DefinitionError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DefinitionError::SerializationFailed(e.to_string()))
    }

    /// Validate and build a fresh machine.
    pub fn build(self) -> Result<StateMachine<S>, DefinitionError> {
        let machine = StateMachine::from_parts(
            self.name.unwrap_or_else(|| DEFAULT_MACHINE_NAME.to_string()),
            self.states,
            self.transitions,
            self.initial,
            self.self_transitions,
        )?;
        Ok(machine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigIssue;
    use crate::state_enum;

    #[test]
    fn minimal_definition_uses_defaults() {
        let definition =
            MachineDefinition::<String>::from_json(r#"{"states": ["idle", "done"]}"#).unwrap();
        assert_eq!(
            definition,
            MachineDefinition::new(vec!["idle".to_string(), "done".to_string()])
        );

        let machine = definition.build().unwrap();
        assert_eq!(machine.name(), "state");
        assert_eq!(machine.current(), "idle");
        assert!(machine.graph().declared_edges().is_none());
        assert_eq!(
            machine.graph().self_transitions(),
            SelfTransitionPolicy::AsDeclared
        );
    }

    #[test]
    fn malformed_json_is_a_deserialization_error() {
        let result = MachineDefinition::<String>::from_json(r#"{"states": "idle"}"#);
        assert!(matches!(result, Err(DefinitionError::DeserializationFailed(_))));
    }

    #[test]
    fn invalid_configuration_surfaces_every_issue() {
        let json = r#"{
            "states": ["idle", "idle"],
            "transitions": [["idle", "ghost"]],
            "initial": "paused"
        }"#;
        let error = MachineDefinition::<String>::from_json(json)
            .unwrap()
            .build()
            .unwrap_err();

        match error {
            DefinitionError::Configuration(config) => {
                assert_eq!(config.issues().len(), 3);
                assert!(config
                    .issues()
                    .contains(&ConfigIssue::UnknownInitialState {
                        state: "paused".to_string()
                    }));
            }
            other => panic!("Expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn to_json_omits_unset_fields() {
        let definition = MachineDefinition::new(vec!["a".to_string()]);
        let json: serde_json::Value =
            serde_json::from_str(&definition.to_json().unwrap()).unwrap();

        assert_eq!(json["states"][0], "a");
        assert_eq!(json["self_transitions"], "as_declared");
        assert!(json.get("transitions").is_none());
        assert!(json.get("initial").is_none());
    }

    state_enum! {
        enum Deploy {
            Pending,
            Rolling,
            Live,
        }
    }

    #[test]
    fn enum_states_load_from_json() {
        let json = r#"{
            "states": ["Pending", "Rolling", "Live"],
            "transitions": [["Pending", "Rolling"], ["Rolling", "Live"]],
            "initial": "Rolling"
        }"#;
        let mut machine = MachineDefinition::<Deploy>::from_json(json)
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(machine.current(), &Deploy::Rolling);
        machine.transition(Deploy::Live).unwrap();
        assert!(machine.allowed_targets().is_empty());
    }
}
