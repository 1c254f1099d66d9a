//! State machines over declared states.
//!
//! - **Graph**: declared states, optional legal edges, self-transition policy
//! - **Machine**: validates moves and records them in an append-only history
//! - **Views**: owned snapshots for display and serialization
//! - **Shared**: a single-lock handle for multi-threaded callers
//!
//! Machines never lock after any particular state; callers decide when a
//! workflow is finished.

mod graph;
mod info;
#[allow(clippy::module_inception)]
mod machine;
mod shared;

pub use graph::{validate, SelfTransitionPolicy, TransitionGraph};
pub use info::{MachineSnapshot, StateInfo};
pub use machine::StateMachine;
pub(crate) use machine::DEFAULT_MACHINE_NAME;
pub use shared::SharedStateMachine;
