//! Optional gameplay behaviors toggled by the player.
//!
//! Loaded from a JSON settings file when one exists and persisted with the
//! city so a reload keeps the rules the city was played with.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, bitcode::Encode, bitcode::Decode,
)]
#[serde(default)]
pub struct GameFeatures {
    /// Measuring a clear highlights instead of re-resolving sprites.
    pub gameui_visual_feedback_on_delete: bool,
    /// Removing a floodplain farm leaves a fertility malus behind.
    pub gameplay_change_soil_depletion: bool,
    /// Deleted buildings leave the map at the end of the clear instead of
    /// on the next frame.
    pub gameplay_change_immediate_delete: bool,
}

impl GameFeatures {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl crate::Saveable for GameFeatures {
    const SAVE_KEY: &'static str = "game_features";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        if *self == Self::default() {
            return None;
        }
        Some(bitcode::encode(self))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        crate::decode_or_warn(Self::SAVE_KEY, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Saveable;

    #[test]
    fn test_defaults_are_off() {
        let features = GameFeatures::default();
        assert!(!features.gameui_visual_feedback_on_delete);
        assert!(!features.gameplay_change_soil_depletion);
        assert!(!features.gameplay_change_immediate_delete);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let features = GameFeatures::from_json(r#"{"gameplay_change_soil_depletion": true}"#).unwrap();
        assert!(features.gameplay_change_soil_depletion);
        assert!(!features.gameplay_change_immediate_delete);
    }

    #[test]
    fn test_json_roundtrip() {
        let features = GameFeatures {
            gameui_visual_feedback_on_delete: true,
            gameplay_change_soil_depletion: false,
            gameplay_change_immediate_delete: true,
        };
        let json = features.to_json().unwrap();
        assert_eq!(GameFeatures::from_json(&json).unwrap(), features);
    }

    #[test]
    fn test_default_is_not_saved() {
        assert!(GameFeatures::default().save_to_bytes().is_none());
        let features = GameFeatures {
            gameplay_change_immediate_delete: true,
            ..Default::default()
        };
        let bytes = features.save_to_bytes().expect("non-default saves");
        assert_eq!(GameFeatures::load_from_bytes(&bytes), features);
    }
}
