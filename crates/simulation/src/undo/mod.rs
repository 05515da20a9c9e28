//! Undo for the last construction or demolition action.
//!
//! `start_build` snapshots the map layers before an action mutates them.
//! While the action runs, every building it touches is recorded once. When
//! the action finishes the record is sealed and `perform_undo` can put the
//! map and the recorded buildings back. Actions that record too many
//! buildings, or that explicitly disable undo (fort demolition), cannot be
//! undone.

pub mod history;
pub mod systems;
pub mod types;

mod tests;

pub use history::{UndoRequested, UndoState};
pub use systems::{process_undo, UndoPlugin};
pub use types::MapSnapshot;
