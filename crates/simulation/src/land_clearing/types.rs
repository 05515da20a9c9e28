//! Value types for the land-clearing operation.

use bevy::prelude::*;

use crate::buildings::BuildingStore;
use crate::features::GameFeatures;
use crate::figures::FigureStore;
use crate::grid::{GridArea, TileCoord, TileGrid};
use crate::image_context::ImageContext;
use crate::image_groups::ImageGroups;
use crate::map_random::RandomGrid;
use crate::routing::RoutingGrids;
use crate::tiles::TileUpdate;
use crate::undo::UndoState;
use crate::view::ViewOrientation;

/// Warning shown when a bridge with people on it is in the selection.
pub const WARNING_BRIDGE_WITH_PEOPLE: &str = "#cannot_demolish_bridge_with_people";

// ---------------------------------------------------------------------------
// Request and plan
// ---------------------------------------------------------------------------

/// One demolition over the rectangle spanned by two corner tiles, together
/// with the confirmations the player has granted so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearRequest {
    pub start: TileCoord,
    pub end: TileCoord,
    pub bridge_confirmed: bool,
    pub fort_confirmed: bool,
}

impl ClearRequest {
    pub fn new(start: TileCoord, end: TileCoord) -> Self {
        Self {
            start,
            end,
            bridge_confirmed: false,
            fort_confirmed: false,
        }
    }

    /// Selection clipped to the grid; `None` if it lies entirely outside.
    pub fn area(&self, grid: &TileGrid) -> Option<GridArea> {
        grid.bound_area(GridArea::from_corners(self.start, self.end))
    }

    /// The same request with the prompt's confirmation granted.
    pub fn confirmed(mut self, prompt: ConfirmationPrompt) -> Self {
        match prompt {
            ConfirmationPrompt::Fort => self.fort_confirmed = true,
            ConfirmationPrompt::Bridge => self.bridge_confirmed = true,
        }
        self
    }
}

/// Yes/no question the player has to answer before a clear goes ahead.
/// Sent as an event when a clear gets suspended.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfirmationPrompt {
    Fort,
    Bridge,
}

impl ConfirmationPrompt {
    /// Text key of the dialog.
    pub fn key(self) -> &'static str {
        match self {
            ConfirmationPrompt::Fort => "#popup_dialog_delete_fort",
            ConfirmationPrompt::Bridge => "#popup_dialog_delete_bridge",
        }
    }
}

/// What a selection contains, before anything is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearPlan {
    /// Items a clear would remove, as the measuring pass counts them.
    pub items: u32,
    pub needs_fort_confirm: bool,
    pub needs_bridge_confirm: bool,
}

impl ClearPlan {
    /// The prompt to raise for `request`, if any. A fort takes precedence;
    /// once it is confirmed the bridge question is not asked.
    pub fn prompt_for(&self, request: &ClearRequest) -> Option<ConfirmationPrompt> {
        if self.needs_fort_confirm {
            (!request.fort_confirmed).then_some(ConfirmationPrompt::Fort)
        } else if self.needs_bridge_confirm {
            (!request.bridge_confirmed).then_some(ConfirmationPrompt::Bridge)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    pub items: u32,
    /// City warning keys raised while clearing, each at most once.
    pub warnings: Vec<&'static str>,
    /// Whether the clear disabled undo for the action.
    pub undo_disabled: bool,
}

impl CommitReport {
    pub(crate) fn warn(&mut self, key: &'static str) {
        if !self.warnings.contains(&key) {
            self.warnings.push(key);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearOutcome {
    /// Read-only preview count.
    Measured(u32),
    Cleared(CommitReport),
    /// Nothing was touched; the request waits for the player's answer.
    NeedsConfirmation(ConfirmationPrompt),
}

impl ClearOutcome {
    /// Items removed (or that would be), `-1` while awaiting confirmation.
    pub fn item_count(&self) -> i32 {
        match self {
            ClearOutcome::Measured(items) => *items as i32,
            ClearOutcome::Cleared(report) => report.items as i32,
            ClearOutcome::NeedsConfirmation(_) => -1,
        }
    }
}

// ---------------------------------------------------------------------------
// Borrowed state
// ---------------------------------------------------------------------------

/// Everything a clear reads or writes, borrowed for one call.
pub struct ClearWorld<'a> {
    pub grid: &'a mut TileGrid,
    pub random: &'a RandomGrid,
    pub images: &'a ImageGroups,
    pub shapes: &'a dyn ImageContext,
    pub orientation: ViewOrientation,
    pub buildings: &'a mut BuildingStore,
    pub figures: &'a mut FigureStore,
    pub undo: &'a mut UndoState,
    pub routing: &'a mut RoutingGrids,
    pub features: &'a GameFeatures,
}

impl ClearWorld<'_> {
    pub fn tiles(&mut self) -> TileUpdate<'_> {
        TileUpdate::new(self.grid, self.random, self.images, self.shapes, self.orientation)
    }
}
