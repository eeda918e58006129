//! Lava Runner - A tile-based platformer simulation
//!
//! Core modules:
//! - `sim`: Level simulation (vectors, actors, obstacle grid, tick loop)
//! - `game`: Headless level sequencing and input sources
//! - `plans`: Level plan loading (JSON)
//! - `settings`: Run configuration

pub mod error;
pub mod game;
pub mod plans;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest single step handed to actors; longer ticks are split
    pub const MAX_STEP: f32 = 0.05;
    /// Longest tick simulated in one call; anything beyond is dropped
    pub const MAX_TICK: f32 = 60.0;

    /// Seconds a finished level keeps running before it reports done
    pub const FINISH_DELAY: f32 = 1.0;

    /// Player walking speed (tiles/s)
    pub const PLAYER_SPEED: f32 = 7.0;

    /// Coin bobbing: phase advance per second and amplitude in tiles
    pub const COIN_SPRING_SPEED: f32 = 8.0;
    pub const COIN_SPRING_DIST: f32 = 0.07;

    /// Fireball initial speeds (tiles/s)
    pub const HORIZONTAL_FIREBALL_SPEED: f32 = 2.0;
    pub const VERTICAL_FIREBALL_SPEED: f32 = 2.0;
    pub const FIRE_RAIN_SPEED: f32 = 3.0;
}
