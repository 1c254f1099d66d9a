//! Builder API for ergonomic state machine construction.
//!
//! This module provides a fluent builder and a macro for creating state
//! machines with minimal boilerplate.

pub mod machine;
pub mod macros;

pub use machine::StateMachineBuilder;

use crate::core::State;
use crate::error::ConfigurationError;
use crate::machine::StateMachine;

/// Create a machine whose only legal moves follow `states` in order.
///
/// # Example
///
/// ```
/// use aios_core::builder::linear_machine;
///
/// let mut machine = linear_machine(["queued", "running", "finished"].map(String::from)).unwrap();
/// assert!(machine.transition("finished".to_string()).is_err());
/// machine.transition("running".to_string()).unwrap();
/// machine.transition("finished".to_string()).unwrap();
/// ```
pub fn linear_machine<S>(
    states: impl IntoIterator<Item = S>,
) -> Result<StateMachine<S>, ConfigurationError>
where
    S: State,
{
    let states: Vec<S> = states.into_iter().collect();
    let edges: Vec<(S, S)> = states
        .windows(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect();
    StateMachineBuilder::new()
        .states(states)
        .transitions(edges)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_machine_only_moves_forward() {
        let mut machine =
            linear_machine(vec!["a".to_string(), "b".to_string(), "c".to_string()]).unwrap();

        assert_eq!(machine.allowed_targets(), vec!["b".to_string()]);
        machine.transition("b".to_string()).unwrap();
        assert!(machine.transition("a".to_string()).is_err());
        machine.transition("c".to_string()).unwrap();
        assert!(machine.allowed_targets().is_empty());
    }

    #[test]
    fn linear_machine_needs_states() {
        assert!(linear_machine(Vec::<String>::new()).is_err());
    }
}
