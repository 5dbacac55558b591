//! Pipe pair spawning
//!
//! Each firing of the spawn task places one upper+lower pipe pair just off
//! the right edge, at a random vertical offset, with the score trigger
//! centered in the gap.

use rand::Rng;

use super::state::{GameState, PipePair};
use crate::consts::*;

/// Spawn one pipe pair at the right edge of the scene.
///
/// The gap's placement comes from a uniform integer offset in
/// [`GAP_OFFSET_BASE`, `GAP_OFFSET_BASE + GAP_OFFSET_SPAN`); the gap height
/// is always three player sprite heights.
pub fn spawn_pipe_pair(state: &mut GameState) {
    let offset = GAP_OFFSET_BASE + state.rng.random_range(0..GAP_OFFSET_SPAN);
    let gap_height = 3.0 * PLAYER_HEIGHT;

    // The upper pipe hangs from above the scene so its bottom edge sits
    // `offset` units below the top; the lower pipe follows under the gap.
    let upper_y = state.config.height + PIPE_HEIGHT / 2.0 - offset as f32;
    let lower_y = upper_y - PIPE_HEIGHT - gap_height;

    let id = state.next_entity_id();
    state.pipes.push(PipePair {
        id,
        x: state.config.width + PIPE_WIDTH / 2.0,
        upper_y,
        lower_y,
        gap_height,
        offset,
        scrolling: true,
        trigger_overlap: false,
    });
}
