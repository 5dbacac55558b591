//! Retro Flappy - a single-screen tap-to-fly arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Web Audio sound effects and background music
//! - `settings`: User preferences (volumes, accessibility)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical scene width; height is derived from the device aspect ratio
    pub const GAME_WIDTH: f32 = 320.0;
    /// Height of the playable area, measured down from the top of the scene.
    /// Everything below it is floor.
    pub const GAME_AREA: f32 = 410.0;

    /// Horizontal scroll speed for pipes and the floor (units/s)
    pub const SCROLL_SPEED: f32 = 100.0;

    /// Player sprite dimensions
    pub const PLAYER_WIDTH: f32 = 46.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    /// Collision circle is tucked inside the sprite
    pub const PLAYER_RADIUS: f32 = PLAYER_WIDTH / 2.0 - 10.0;
    /// Fixed horizontal position of the player
    pub const PLAYER_X: f32 = 60.0;
    pub const PLAYER_MASS: f32 = 0.05;

    /// Downward acceleration while airborne (units/s²)
    pub const GRAVITY: f32 = 1000.0;
    /// Upward impulse applied on tap; divided by mass to get the jump velocity
    pub const JUMP_IMPULSE: f32 = 20.0;
    /// Maximum nose-up/nose-down tilt (radians)
    pub const MAX_TILT: f32 = 0.6;

    /// Pipe sprite dimensions
    pub const PIPE_WIDTH: f32 = 52.0;
    pub const PIPE_HEIGHT: f32 = 320.0;
    /// Seconds between pipe pair spawns
    pub const PIPE_SPAWN_INTERVAL: f32 = 2.5;
    /// The gap's vertical offset is `GAP_OFFSET_BASE` plus a uniform draw
    /// over `GAP_OFFSET_SPAN` values, i.e. an integer in [74, 205].
    pub const GAP_OFFSET_BASE: u32 = 74;
    pub const GAP_OFFSET_SPAN: u32 = 132;
    /// Width of the invisible score trigger in the gap
    pub const TRIGGER_WIDTH: f32 = 1.0;

    /// Delay between the crash and the game-over banner (seconds)
    pub const GAME_OVER_BANNER_DELAY: f32 = 0.5;

    /// Floor sprite width; the loop resets every half width
    pub const FLOOR_WIDTH: f32 = 2.0 * GAME_WIDTH;
}

/// Scene dimensions, computed once from the device and handed to
/// [`sim::GameState::new`]. The logical width is fixed; the height follows
/// the device aspect ratio so the scene fills the screen without stretching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
}

impl ScreenConfig {
    pub fn from_device(device_width: f32, device_height: f32) -> Self {
        Self {
            width: consts::GAME_WIDTH,
            height: consts::GAME_WIDTH * device_height / device_width,
        }
    }

    /// Top edge of the pavement collider under the playable area
    pub fn floor_top(&self) -> f32 {
        self.height - consts::GAME_AREA
    }
}
