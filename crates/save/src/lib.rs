mod atomic_write;
pub mod file_header;
pub mod grid_layers;
pub mod save_codec;
pub mod save_error;
mod save_plugin;

pub use save_codec::{load_from_bytes, save_to_bytes, SaveData};
pub use save_error::SaveError;
pub use save_plugin::{LoadMapRequested, MapFileDone, MapFileFailed, SaveMapRequested, SavePlugin};
