//! Player vertical physics

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::{Layout, Tuning};

/// The bird. `pos.x` never changes after spawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    /// Positive is downward
    pub vel_y: f32,
    /// Set for the tick a flap was applied, cleared on the next step
    pub flapped: bool,
}

impl PlayerState {
    /// Player at its fixed column, vertically centered
    pub fn spawn(layout: &Layout, tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(layout.player_x(), (layout.screen_height / 2.0).trunc()),
            vel_y: tuning.start_vel,
            flapped: false,
        }
    }

    /// Advance one tick. Returns true if a flap was applied.
    ///
    /// A flap is ignored while the player is at or above the top of the
    /// screen. Gravity is skipped on the tick a flap lands, and the position
    /// update never carries the sprite past the ground line.
    pub fn step(&mut self, flap_requested: bool, tuning: &Tuning, layout: &Layout) -> bool {
        self.flapped = false;

        if flap_requested && self.pos.y > 0.0 {
            self.vel_y = tuning.flap_impulse.max(tuning.min_rise_vel);
            self.flapped = true;
        } else if self.vel_y < tuning.max_fall_vel {
            self.vel_y = (self.vel_y + tuning.gravity).min(tuning.max_fall_vel);
        }

        let room = layout.ground_y - self.pos.y - layout.player.height;
        self.pos.y += self.vel_y.min(room);

        self.flapped
    }

    /// Collision box
    pub fn bounds(&self, layout: &Layout) -> Rect {
        Rect::from_sprite(self.pos, layout.player)
    }
}
