//! Core State trait for state machine labels.
//!
//! A state machine only understands state *names*: it validates membership
//! and transition edges, never the meaning of a label. Any value that can be
//! compared, hashed, and serialized can act as a state.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// # Required Traits
///
/// - `Clone`: States are copied into history records
/// - `Eq` + `Hash`: States key the transition graph and transition counts
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States appear in snapshots and definitions
///
/// `String` implements `State` directly, so plain labels work without any
/// extra type:
///
/// ```rust
/// use aios_core::core::State;
///
/// let label = String::from("working");
/// assert_eq!(label.name(), "working");
/// ```
///
/// Fieldless enums can use the [`state_enum!`](crate::state_enum) macro, or
/// implement the trait by hand:
///
/// ```rust
/// use aios_core::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum TaskState {
///     Pending,
///     Running,
///     Complete,
/// }
///
/// impl State for TaskState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Pending => "Pending",
///             Self::Running => "Running",
///             Self::Complete => "Complete",
///         }
///     }
/// }
/// ```
pub trait State:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}

impl State for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}
