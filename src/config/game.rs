use serde::{Deserialize, Serialize};

use crate::game::{GRID_WIDTH, START_HEIGHT, TICKS_PER_SEC};

// Playfield and timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: usize,
    pub start_height: usize,
    pub ticks_per_sec: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            start_height: START_HEIGHT,
            ticks_per_sec: TICKS_PER_SEC,
        }
    }
}

impl GameConfig {
    // Seconds between gravity ticks; guards against a zero tick rate in a
    // hand-edited config file
    #[must_use]
    pub fn tick_interval(&self) -> f32 {
        1.0 / self.ticks_per_sec.max(1) as f32
    }
}
