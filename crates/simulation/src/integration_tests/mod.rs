//! Integration tests driven through `TestMap`: a headless App with
//! `SimulationPlugin`, fed with the same events the game sends.

mod clear_land_flow;
mod map_lifecycle;
mod undo_flow;
