//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::schedule::{DelayedTask, RepeatingTask, secs_to_ticks};
use crate::ScreenConfig;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first tap; the player hovers in place
    Intro,
    /// Active gameplay
    Playing,
    /// Run ended. `awaiting_restart` flips once the banner is up; only then
    /// does a tap request a new game.
    GameOver { awaiting_restart: bool },
}

/// Things that happened during a tick that the platform layer reacts to
/// (sounds, HUD updates, scene replacement). Drained once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Intro tap accepted; the run is live
    Started,
    /// Upward impulse applied
    Flapped,
    /// Passed a pipe gap; score already incremented
    Scored,
    /// Hit an obstacle; game over entered
    Crashed,
    /// The game-over banner delay elapsed
    BannerShown,
    /// Tap received while awaiting restart; build a fresh scene
    RestartRequested,
}

/// The player sprite
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Nose tilt in radians, derived from vertical velocity while flying
    pub rotation: f32,
    /// Selects the crashed sprite variant after an obstacle hit
    pub crashed: bool,
}

impl Player {
    fn new(config: &ScreenConfig) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, config.height - GAME_AREA / 2.0),
            vel: Vec2::ZERO,
            rotation: 0.0,
            crashed: false,
        }
    }
}

/// An upper + lower pipe sharing an x position, plus the invisible score
/// trigger in the gap between them. The three are spawned, scrolled, and
/// despawned as one unit.
#[derive(Debug, Clone)]
pub struct PipePair {
    pub id: u32,
    /// Shared center x of both pipes
    pub x: f32,
    /// Center y of the upper pipe
    pub upper_y: f32,
    /// Center y of the lower pipe
    pub lower_y: f32,
    pub gap_height: f32,
    /// The random vertical offset this pair was placed with
    pub offset: u32,
    /// Cleared at game-over so frozen pipes stop moving
    pub scrolling: bool,
    /// Overlap state from the previous tick, for contact-begin detection
    pub(crate) trigger_overlap: bool,
}

impl PipePair {
    pub fn upper_rect(&self) -> Rect {
        Rect::from_center_size(
            Vec2::new(self.x, self.upper_y),
            Vec2::new(PIPE_WIDTH, PIPE_HEIGHT),
        )
    }

    pub fn lower_rect(&self) -> Rect {
        Rect::from_center_size(
            Vec2::new(self.x, self.lower_y),
            Vec2::new(PIPE_WIDTH, PIPE_HEIGHT),
        )
    }

    /// The score trigger spans the gap at the pipes' right edge
    pub fn trigger_rect(&self) -> Rect {
        Rect::from_center_size(
            Vec2::new(
                self.x + PIPE_WIDTH / 2.0,
                self.upper_y - PIPE_HEIGHT / 2.0 - self.gap_height / 2.0,
            ),
            Vec2::new(TRIGGER_WIDTH, self.gap_height),
        )
    }

    /// Bottom edge of the upper pipe (the top of the gap)
    pub fn gap_top(&self) -> f32 {
        self.upper_y - PIPE_HEIGHT / 2.0
    }

    /// Top edge of the lower pipe (the bottom of the gap)
    pub fn gap_bottom(&self) -> f32 {
        self.lower_y + PIPE_HEIGHT / 2.0
    }
}

/// Complete game state. Score resets only by constructing a new instance;
/// there is no in-place reset path.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: ScreenConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    pub player: Player,
    /// Active pipe pairs, oldest first
    pub pipes: Vec<PipePair>,
    /// Cosmetic floor scroll offset, loops over half the floor width
    pub floor_offset: f32,
    /// Pipe spawner; created at the intro tap, cancelled once at game-over
    pub spawn_task: Option<RepeatingTask>,
    /// One-shot delay between the crash and the banner
    pub banner_task: Option<DelayedTask>,
    /// Simulation tick counter
    pub time_ticks: u64,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    pub fn new(config: ScreenConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Intro,
            score: 0,
            player: Player::new(&config),
            pipes: Vec::new(),
            floor_offset: 0.0,
            spawn_task: None,
            banner_task: None,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand the accumulated events to the platform layer
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Intro tap: go live. Starts gravity, applies the first impulse, and
    /// arms the pipe spawner.
    pub(crate) fn start_run(&mut self) {
        debug_assert_eq!(self.phase, GamePhase::Intro);
        self.phase = GamePhase::Playing;
        self.player.vel.y = JUMP_IMPULSE / PLAYER_MASS;
        self.spawn_task = Some(RepeatingTask::every(secs_to_ticks(PIPE_SPAWN_INTERVAL)));
        self.push_event(GameEvent::Started);
    }

    /// Playing tap: cancel any fall speed, then jump. Zeroing first keeps
    /// the jump height the same no matter how fast the player was falling.
    pub(crate) fn flap(&mut self) {
        self.player.vel.y = 0.0;
        self.player.vel.y += JUMP_IMPULSE / PLAYER_MASS;
        self.push_event(GameEvent::Flapped);
    }

    /// Obstacle hit: stop spawning, freeze everything in place, and start
    /// the banner delay. Taps are ignored until the banner is up.
    pub(crate) fn enter_game_over(&mut self) {
        if let Some(task) = &mut self.spawn_task {
            task.cancel();
        }
        for pair in &mut self.pipes {
            pair.scrolling = false;
        }
        self.player.rotation = 0.0;
        self.player.crashed = true;
        self.phase = GamePhase::GameOver {
            awaiting_restart: false,
        };
        self.banner_task = Some(DelayedTask::after(secs_to_ticks(GAME_OVER_BANNER_DELAY)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ScreenConfig {
        ScreenConfig::from_device(320.0, 568.0)
    }

    #[test]
    fn test_new_game_defaults() {
        let state = GameState::new(test_config(), 42);
        assert_eq!(state.phase, GamePhase::Intro);
        assert_eq!(state.score, 0);
        assert!(state.pipes.is_empty());
        assert!(state.spawn_task.is_none());
        assert!(state.banner_task.is_none());
        assert!(!state.player.crashed);
        // Player hovers mid game-area
        assert!((state.player.pos.x - PLAYER_X).abs() < f32::EPSILON);
        assert!((state.player.pos.y - (568.0 - GAME_AREA / 2.0)).abs() < 0.001);
    }

    #[test]
    fn test_pipe_pair_geometry() {
        let pair = PipePair {
            id: 1,
            x: 346.0,
            upper_y: 568.0 + PIPE_HEIGHT / 2.0 - 100.0,
            lower_y: 568.0 + PIPE_HEIGHT / 2.0 - 100.0 - PIPE_HEIGHT - 96.0,
            gap_height: 96.0,
            offset: 100,
            scrolling: true,
            trigger_overlap: false,
        };

        // The gap sits between the upper pipe's bottom and the lower's top
        assert!((pair.gap_top() - (568.0 - 100.0)).abs() < 0.001);
        assert!((pair.gap_top() - pair.gap_bottom() - 96.0).abs() < 0.001);

        // Trigger is centered on the gap, one unit wide
        let trigger = pair.trigger_rect();
        assert!((trigger.half.x - 0.5).abs() < f32::EPSILON);
        assert!((trigger.half.y - 48.0).abs() < f32::EPSILON);
        assert!((trigger.center.y - (pair.gap_top() + pair.gap_bottom()) / 2.0).abs() < 0.001);
        assert!((trigger.center.x - (pair.x + PIPE_WIDTH / 2.0)).abs() < 0.001);
    }

    #[test]
    fn test_flap_height_independent_of_fall_speed() {
        let mut slow = GameState::new(test_config(), 1);
        let mut fast = GameState::new(test_config(), 1);
        slow.player.vel.y = -50.0;
        fast.player.vel.y = -900.0;

        slow.flap();
        fast.flap();
        assert_eq!(slow.player.vel.y, fast.player.vel.y);
        assert!(slow.player.vel.y > 0.0);
    }

    #[test]
    fn test_enter_game_over_freezes_world() {
        let mut state = GameState::new(test_config(), 7);
        state.start_run();
        state.pipes.push(PipePair {
            id: 1,
            x: 200.0,
            upper_y: 700.0,
            lower_y: 300.0,
            gap_height: 96.0,
            offset: 80,
            scrolling: true,
            trigger_overlap: false,
        });

        state.enter_game_over();

        assert_eq!(
            state.phase,
            GamePhase::GameOver {
                awaiting_restart: false
            }
        );
        assert!(state.spawn_task.as_ref().unwrap().is_cancelled());
        assert!(state.pipes.iter().all(|p| !p.scrolling));
        assert!(state.player.crashed);
        assert_eq!(state.player.rotation, 0.0);
        assert!(state.banner_task.is_some());
        // Frozen pipes stay on screen rather than despawning
        assert_eq!(state.pipes.len(), 1);
    }
}
