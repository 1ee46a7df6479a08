//! Collision detection
//!
//! The run ends when the player leaves the vertical playfield or its box
//! overlaps any pipe. The checks are pure; reacting to a hit is the tick's job.

use serde::{Deserialize, Serialize};

use super::player::PlayerState;
use super::state::Layout;
use super::stream::ObstacleStream;
use crate::consts::GROUND_MARGIN;

/// What the player struck
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collision {
    Ceiling,
    Ground,
    UpperPipe { x: f32 },
    LowerPipe { x: f32 },
}

/// Player is above the top of the screen or has reached the base.
///
/// The ground test fires slightly before the sprite touches the ground line
/// so the bird visibly lands on the base artwork.
pub fn out_of_bounds(player: &PlayerState, layout: &Layout) -> Option<Collision> {
    if player.pos.y < 0.0 {
        Some(Collision::Ceiling)
    } else if player.pos.y > layout.ground_y - GROUND_MARGIN {
        Some(Collision::Ground)
    } else {
        None
    }
}

/// First thing the player collides with, if any
pub fn detect_collision(
    player: &PlayerState,
    pipes: &ObstacleStream,
    layout: &Layout,
) -> Option<Collision> {
    if let Some(hit) = out_of_bounds(player, layout) {
        return Some(hit);
    }

    let player_box = player.bounds(layout);
    for pair in pipes.iter() {
        if player_box.intersects(&pair.upper_bounds(layout)) {
            return Some(Collision::UpperPipe { x: pair.x });
        }
        if player_box.intersects(&pair.lower_bounds(layout)) {
            return Some(Collision::LowerPipe { x: pair.x });
        }
    }

    None
}

/// True if the run should end this tick
pub fn check_collision(player: &PlayerState, pipes: &ObstacleStream, layout: &Layout) -> bool {
    detect_collision(player, pipes, layout).is_some()
}
