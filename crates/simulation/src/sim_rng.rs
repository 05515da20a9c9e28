//! The global pseudo-random sequence the map draws from.
//!
//! `ChaCha8Rng` gives the same stream on every platform, so a map seed
//! reproduces the same per-cell random layer everywhere.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const DEFAULT_MAP_SEED: u64 = 0x5EED_7135;

/// Full ChaCha state, enough to resume the stream after a reload.
#[derive(Encode, Decode)]
struct StreamState {
    seed: [u8; 32],
    stream: u64,
    word_pos: u128,
}

#[derive(Resource)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed_u64(DEFAULT_MAP_SEED)
    }
}

impl SimRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Restarts the sequence for a new map.
    pub fn reseed(&mut self, seed: u64) {
        self.0 = ChaCha8Rng::seed_from_u64(seed);
    }
}

impl crate::Saveable for SimRng {
    const SAVE_KEY: &'static str = "sim_rng";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        let state = StreamState {
            seed: self.0.get_seed(),
            stream: self.0.get_stream(),
            word_pos: self.0.get_word_pos(),
        };
        Some(bitcode::encode(&state))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        match bitcode::decode::<StreamState>(bytes) {
            Ok(state) => {
                let mut rng = ChaCha8Rng::from_seed(state.seed);
                rng.set_stream(state.stream);
                rng.set_word_pos(state.word_pos);
                Self(rng)
            }
            Err(e) => {
                warn!("SimRng: undecodable stream state, reseeding with default: {}", e);
                Self::default()
            }
        }
    }
}
