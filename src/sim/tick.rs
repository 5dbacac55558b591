//! Fixed timestep simulation tick
//!
//! Advances the game deterministically: phase machine, player physics,
//! pipe scrolling/spawning, and contact dispatch.

use super::collision::{CollisionCategory, circle_rect_overlap};
use super::spawn::spawn_pipe_pair;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap gesture (mouse/touch/space). What it does depends on the phase.
    pub tap: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    // Cosmetic floor loop runs in every phase
    advance_floor(state, dt);

    match state.phase {
        GamePhase::Intro => {
            if input.tap {
                state.start_run();
            }
        }

        GamePhase::Playing => {
            if input.tap {
                state.flap();
            }

            integrate_player(state, dt);
            advance_pipes(state, dt);

            if state.spawn_task.as_mut().is_some_and(|t| t.tick()) {
                spawn_pipe_pair(state);
            }

            dispatch_contacts(state);
        }

        GamePhase::GameOver { awaiting_restart } => {
            // The crashed player still falls until it rests on the pavement;
            // only its rotation is frozen.
            settle_player(state, dt);

            if state.banner_task.as_mut().is_some_and(|t| t.tick()) {
                state.phase = GamePhase::GameOver {
                    awaiting_restart: true,
                };
                state.push_event(GameEvent::BannerShown);
            }
            // Taps before the banner is up are ignored
            if input.tap && awaiting_restart {
                state.push_event(GameEvent::RestartRequested);
            }
        }
    }
}

fn advance_floor(state: &mut GameState, dt: f32) {
    state.floor_offset -= SCROLL_SPEED * dt;
    if state.floor_offset <= -FLOOR_WIDTH / 2.0 {
        state.floor_offset += FLOOR_WIDTH / 2.0;
    }
}

fn integrate_player(state: &mut GameState, dt: f32) {
    let player = &mut state.player;
    player.vel.y -= GRAVITY * dt;
    player.pos += player.vel * dt;

    // The roof is a boundary, not an obstacle: clamp position and kill any
    // remaining upward speed without producing a contact event.
    let ceiling = state.config.height - PLAYER_RADIUS;
    if player.pos.y > ceiling {
        player.pos.y = ceiling;
        player.vel.y = player.vel.y.min(0.0);
    }

    // Nose tilt follows vertical speed
    let jump_speed = JUMP_IMPULSE / PLAYER_MASS;
    player.rotation = (player.vel.y / jump_speed).clamp(-1.0, 1.0) * MAX_TILT;
}

fn settle_player(state: &mut GameState, dt: f32) {
    let rest = state.config.floor_top() + PLAYER_RADIUS;
    let player = &mut state.player;
    if player.pos.y <= rest {
        player.pos.y = rest;
        player.vel.y = 0.0;
        return;
    }
    player.vel.y -= GRAVITY * dt;
    player.pos.y += player.vel.y * dt;
    if player.pos.y < rest {
        player.pos.y = rest;
        player.vel.y = 0.0;
    }
}

fn advance_pipes(state: &mut GameState, dt: f32) {
    for pair in state.pipes.iter_mut().filter(|p| p.scrolling) {
        pair.x -= SCROLL_SPEED * dt;
    }
    // A pair despawns together with its trigger once fully past the left edge
    state.pipes.retain(|p| p.x > -PIPE_WIDTH / 2.0);
}

/// Collect this tick's contacts against the player, then dispatch by
/// category. Scoring triggers use begin-edge detection so each pair scores
/// at most once; an obstacle hit ends the run and silences the rest.
fn dispatch_contacts(state: &mut GameState) {
    let pos = state.player.pos;
    let mut contacts: Vec<CollisionCategory> = Vec::new();

    for pair in &mut state.pipes {
        let inside = circle_rect_overlap(pos, PLAYER_RADIUS, &pair.trigger_rect());
        if inside && !pair.trigger_overlap {
            contacts.push(CollisionCategory::Scoring);
        }
        pair.trigger_overlap = inside;

        if circle_rect_overlap(pos, PLAYER_RADIUS, &pair.upper_rect())
            || circle_rect_overlap(pos, PLAYER_RADIUS, &pair.lower_rect())
        {
            contacts.push(CollisionCategory::Obstacle);
        }
    }

    // The pavement under the play area is an obstacle like any pipe
    if pos.y - PLAYER_RADIUS <= state.config.floor_top() {
        contacts.push(CollisionCategory::Obstacle);
    }

    for category in contacts {
        // A crash flips the phase; later contacts from the same tick no
        // longer apply.
        if state.phase != GamePhase::Playing {
            break;
        }
        match category {
            CollisionCategory::Scoring => {
                state.score += 1;
                state.push_event(GameEvent::Scored);
            }
            CollisionCategory::Obstacle => {
                state.push_event(GameEvent::Crashed);
                state.enter_game_over();
            }
            // Contacts are always against the player; it never shows up as
            // the other body.
            CollisionCategory::Player => {}
        }
    }
}
