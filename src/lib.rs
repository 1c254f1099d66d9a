//! aios-core: entity and state tracking for AI workflow tooling
//!
//! Workflow scripts (installers, crew demos, dashboards, deployment
//! generators) describe the agents and tasks they manage as [`Entity`]
//! values and follow each one's lifecycle with a [`StateMachine`]. Both are
//! plain in-memory values owned by the workflow that creates them.
//!
//! # Core Concepts
//!
//! - **Entity**: named container of typed attributes with a unique identity
//! - **State**: any label type implementing the `State` trait (`String` works)
//! - **StateMachine**: declared states, an optional transition graph, and an
//!   append-only history of committed transitions
//! - **Definition**: JSON-loadable machine configuration
//!
//! # Example
//!
//! ```rust
//! use aios_core::{Entity, StateMachineBuilder, TransitionError};
//!
//! let mut developer = Entity::new("Developer");
//! developer.set_attribute("language", "rust");
//!
//! let mut lifecycle = StateMachineBuilder::new()
//!     .name("developer")
//!     .states(["idle", "working", "done"].map(String::from))
//!     .transition("idle".to_string(), "working".to_string())
//!     .transition("working".to_string(), "done".to_string())
//!     .build()
//!     .unwrap();
//!
//! lifecycle.transition("working".to_string()).unwrap();
//! assert!(matches!(
//!     lifecycle.transition("idle".to_string()),
//!     Err(TransitionError::IllegalTransition { .. })
//! ));
//! lifecycle.transition("done".to_string()).unwrap();
//!
//! let counts = lifecycle.transition_counts();
//! assert_eq!(counts[&("working".to_string(), "done".to_string())], 1);
//! ```

pub mod builder;
pub mod core;
pub mod definition;
pub mod entity;
pub mod error;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::StateMachineBuilder;
pub use crate::core::{State, StateHistory, StateTransition};
pub use crate::definition::MachineDefinition;
pub use crate::entity::{AttributeValue, Entity, EntityId, EntitySnapshot};
pub use crate::error::{ConfigIssue, ConfigurationError, DefinitionError, TransitionError};
pub use crate::machine::{
    MachineSnapshot, SelfTransitionPolicy, SharedStateMachine, StateInfo, StateMachine,
};
