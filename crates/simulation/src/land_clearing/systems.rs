//! ECS wiring: clear requests come in as events, prompts and results go
//! out as events, and a suspended request waits in a resource until the
//! player answers.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::buildings::BuildingStore;
use crate::features::GameFeatures;
use crate::figures::FigureStore;
use crate::grid::{TileCoord, TileGrid};
use crate::image_context::ImageContexts;
use crate::image_groups::ImageGroups;
use crate::map_random::RandomGrid;
use crate::routing::RoutingGrids;
use crate::undo::UndoState;
use crate::view::ViewOrientation;

use super::types::{ClearOutcome, ClearRequest, ClearWorld, CommitReport, ConfirmationPrompt};
use super::{clear_land, resolve};

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// The player dragged a clear over `start`..`end`. `measure_only` asks for
/// the preview count only.
#[derive(Event, Debug, Clone, Copy)]
pub struct ClearLandRequested {
    pub start: TileCoord,
    pub end: TileCoord,
    pub measure_only: bool,
}

/// Yes/no answer to the last [`ConfirmationPrompt`].
#[derive(Event, Debug, Clone, Copy)]
pub struct ClearConfirmationAnswered {
    pub accepted: bool,
}

/// A clear finished, or a preview was measured.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandCleared {
    pub start: TileCoord,
    pub end: TileCoord,
    pub items: u32,
    pub measured: bool,
}

/// Non-fatal message for the player.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CityWarning {
    pub key: &'static str,
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// The clear waiting on a prompt. A new request replaces it.
#[derive(Resource, Debug, Default)]
pub struct PendingClearConfirmation {
    pub request: Option<(ClearRequest, ConfirmationPrompt)>,
}

/// Resources a clear needs, borrowed together.
#[derive(SystemParam)]
pub struct ClearLandParams<'w> {
    grid: ResMut<'w, TileGrid>,
    random: Res<'w, RandomGrid>,
    images: Res<'w, ImageGroups>,
    shapes: Res<'w, ImageContexts>,
    orientation: Res<'w, ViewOrientation>,
    buildings: ResMut<'w, BuildingStore>,
    figures: ResMut<'w, FigureStore>,
    undo: ResMut<'w, UndoState>,
    routing: ResMut<'w, RoutingGrids>,
    features: Res<'w, GameFeatures>,
}

impl ClearLandParams<'_> {
    fn world(&mut self) -> ClearWorld<'_> {
        ClearWorld {
            grid: &mut self.grid,
            random: &self.random,
            images: &self.images,
            shapes: &*self.shapes.0,
            orientation: *self.orientation,
            buildings: &mut self.buildings,
            figures: &mut self.figures,
            undo: &mut self.undo,
            routing: &mut self.routing,
            features: &self.features,
        }
    }
}

/// Outgoing events of the clearing systems.
#[derive(SystemParam)]
pub struct ClearLandEvents<'w> {
    prompts: EventWriter<'w, ConfirmationPrompt>,
    cleared: EventWriter<'w, LandCleared>,
    warnings: EventWriter<'w, CityWarning>,
}

impl ClearLandEvents<'_> {
    fn finish(&mut self, request: &ClearRequest, report: &CommitReport) {
        for &key in &report.warnings {
            self.warnings.send(CityWarning { key });
        }
        self.cleared.send(LandCleared {
            start: request.start,
            end: request.end,
            items: report.items,
            measured: false,
        });
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

fn suspend(
    pending: &mut PendingClearConfirmation,
    events: &mut ClearLandEvents,
    request: ClearRequest,
    prompt: ConfirmationPrompt,
) {
    debug!("Clear suspended, asking {}", prompt.key());
    pending.request = Some((request, prompt));
    events.prompts.send(prompt);
}

pub fn handle_clear_requests(
    mut requests: EventReader<ClearLandRequested>,
    mut params: ClearLandParams,
    mut pending: ResMut<PendingClearConfirmation>,
    mut events: ClearLandEvents,
) {
    for event in requests.read() {
        if event.measure_only {
            let items = clear_land(&mut params.world(), true, event.start, event.end).item_count();
            events.cleared.send(LandCleared {
                start: event.start,
                end: event.end,
                items: items.max(0) as u32,
                measured: true,
            });
            continue;
        }

        if pending.request.take().is_some() {
            debug!("Dropping the unanswered clear for a new one");
        }
        params.undo.start_build(&params.grid);
        let request = ClearRequest::new(event.start, event.end);
        match clear_land(&mut params.world(), false, event.start, event.end) {
            ClearOutcome::NeedsConfirmation(prompt) => suspend(&mut pending, &mut events, request, prompt),
            ClearOutcome::Cleared(report) => {
                params.undo.finish_build();
                events.finish(&request, &report);
            }
            ClearOutcome::Measured(_) => {}
        }
    }
}

pub fn handle_confirmation_answers(
    mut answers: EventReader<ClearConfirmationAnswered>,
    mut params: ClearLandParams,
    mut pending: ResMut<PendingClearConfirmation>,
    mut events: ClearLandEvents,
) {
    for answer in answers.read() {
        let Some((request, prompt)) = pending.request.take() else {
            warn!("Clear confirmation answered with no clear pending");
            continue;
        };
        if !answer.accepted {
            debug!("Clear declined at {}", prompt.key());
            continue;
        }
        let request = request.confirmed(prompt);
        match resolve(&mut params.world(), &request) {
            ClearOutcome::NeedsConfirmation(next) => suspend(&mut pending, &mut events, request, next),
            ClearOutcome::Cleared(report) => {
                params.undo.finish_build();
                events.finish(&request, &report);
            }
            ClearOutcome::Measured(_) => {}
        }
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct LandClearingPlugin;

impl Plugin for LandClearingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingClearConfirmation>()
            .init_resource::<FigureStore>()
            .init_resource::<GameFeatures>()
            .init_resource::<UndoState>()
            .init_resource::<RoutingGrids>()
            .add_event::<ClearLandRequested>()
            .add_event::<ClearConfirmationAnswered>()
            .add_event::<ConfirmationPrompt>()
            .add_event::<LandCleared>()
            .add_event::<CityWarning>()
            .add_systems(
                Update,
                (handle_clear_requests, handle_confirmation_answers.after(handle_clear_requests)),
            );
    }
}
