//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Scheduled work as tick-counted tasks, never wall-clock timers
//! - No rendering or platform dependencies

pub mod collision;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionCategory, Rect, circle_rect_overlap};
pub use schedule::{DelayedTask, RepeatingTask, secs_to_ticks};
pub use spawn::spawn_pipe_pair;
pub use state::{GameEvent, GamePhase, GameState, PipePair, Player};
pub use tick::{TickInput, tick};
