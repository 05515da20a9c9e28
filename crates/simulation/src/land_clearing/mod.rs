//! Player demolition over a rectangular selection.
//!
//! A clear is a two-phase command. [`plan`] looks at the selection without
//! touching it; if it holds a fort or a bridge the caller gets a
//! [`ConfirmationPrompt`] back and owns the wait for the player's answer.
//! Answering re-runs the request with the confirmation granted, which then
//! goes through [`commit`]. Measuring (the live preview while dragging) is
//! read-only and never prompts.

pub mod commit;
pub mod plan;
pub mod systems;
pub mod types;


pub use commit::commit;
pub use plan::{measure, plan};
pub use systems::{
    ClearConfirmationAnswered, ClearLandRequested, CityWarning, LandCleared, LandClearingPlugin,
    PendingClearConfirmation,
};
pub use types::{
    ClearOutcome, ClearPlan, ClearRequest, ClearWorld, CommitReport, ConfirmationPrompt,
    WARNING_BRIDGE_WITH_PEOPLE,
};

use crate::grid::TileCoord;

/// Entry point for a clear over the rectangle `start`..`end`.
pub fn clear_land(world: &mut ClearWorld, measure_only: bool, start: TileCoord, end: TileCoord) -> ClearOutcome {
    let request = ClearRequest::new(start, end);
    if measure_only {
        return ClearOutcome::Measured(measure(world.grid, world.buildings, world.features, &request));
    }
    resolve(world, &request)
}

/// Commits `request` unless the selection still needs a confirmation the
/// request does not carry.
pub fn resolve(world: &mut ClearWorld, request: &ClearRequest) -> ClearOutcome {
    let plan = plan(world.grid, world.buildings, world.features, request);
    if let Some(prompt) = plan.prompt_for(request) {
        return ClearOutcome::NeedsConfirmation(prompt);
    }
    ClearOutcome::Cleared(commit(world, request))
}
