//! Core state types.
//!
//! - State labels via the `State` trait
//! - Immutable transition records and the append-only history log
//!
//! Nothing in this module performs I/O or reads the clock on its own.

mod history;
mod state;

pub use history::{StateHistory, StateTransition};
pub use state::State;
