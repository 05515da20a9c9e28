// ---------------------------------------------------------------------------
// SaveError: error types for map save/load
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while writing or restoring a map.
#[derive(Debug)]
pub enum SaveError {
    /// I/O error (file not found, permission denied, disk full, etc.)
    Io(std::io::Error),
    /// Bitcode encoding failed.
    Encode(String),
    /// Bitcode decoding failed.
    Decode(String),
    /// The file or payload was written by a newer build.
    VersionMismatch { expected_max: u32, found: u32 },
    /// Header, checksum or compressed payload is damaged.
    Corrupted(String),
    /// A saved grid layer does not hold one value per cell.
    LayerSizeMismatch {
        layer: &'static str,
        expected: usize,
        found: usize,
    },
    /// No save data was available to load.
    NoData,
    /// A required resource was missing from the ECS world.
    MissingResource(&'static str),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "I/O error: {e}"),
            SaveError::Encode(msg) => write!(f, "Encoding error: {msg}"),
            SaveError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            SaveError::VersionMismatch {
                expected_max,
                found,
            } => write!(
                f,
                "Version mismatch: save is v{found}, but this build only supports up to v{expected_max}"
            ),
            SaveError::Corrupted(msg) => write!(f, "Save data is corrupted: {msg}"),
            SaveError::LayerSizeMismatch {
                layer,
                expected,
                found,
            } => write!(
                f,
                "Layer '{layer}' holds {found} cells, but the grid has {expected}"
            ),
            SaveError::NoData => write!(f, "No save data available to load"),
            SaveError::MissingResource(name) => {
                write!(f, "Missing required resource: {name}")
            }
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<bitcode::Error> for SaveError {
    fn from(e: bitcode::Error) -> Self {
        SaveError::Decode(e.to_string())
    }
}
