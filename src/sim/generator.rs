//! Pipe pair generation
//!
//! Each pair costs exactly one random draw: the vertical position of the gap.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::state::Layout;
use crate::consts::PIPE_SPAWN_OFFSET;

/// An upper pipe hanging from above and a lower pipe rising from below,
/// sharing one x and separated by a fixed gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    /// Top edge of the upper pipe sprite (negative: it extends above the screen)
    pub upper_y: f32,
    /// Top edge of the lower pipe sprite
    pub lower_y: f32,
    pub x: f32,
    /// Player has been credited for passing this pair
    #[serde(default)]
    pub scored: bool,
    /// This pair has already triggered the spawn of its successor
    #[serde(default)]
    pub spawned_next: bool,
}

impl ObstaclePair {
    pub fn upper_bounds(&self, layout: &Layout) -> Rect {
        Rect::new(self.x, self.upper_y, layout.pipe.width, layout.pipe.height)
    }

    pub fn lower_bounds(&self, layout: &Layout) -> Rect {
        Rect::new(self.x, self.lower_y, layout.pipe.width, layout.pipe.height)
    }

    pub fn mid_x(&self, layout: &Layout) -> f32 {
        self.x + layout.pipe.width / 2.0
    }

    /// Fully scrolled past the left edge
    pub fn is_off_screen(&self, layout: &Layout) -> bool {
        self.x + layout.pipe.width < 0.0
    }
}

/// Exclusive upper bound of the random gap offset
pub fn gap_draw_range(layout: &Layout) -> u32 {
    let span = layout.screen_height - layout.base_height - 1.2 * layout.gap();
    (span.trunc() as i64).max(1) as u32
}

/// Generate a pair just past the right edge of the screen
pub fn generate_pair<R: Rng>(layout: &Layout, rng: &mut R) -> ObstaclePair {
    generate_pair_at(layout, rng, layout.screen_width + PIPE_SPAWN_OFFSET)
}

/// Generate a pair at an explicit x (used for the opening layout)
pub fn generate_pair_at<R: Rng>(layout: &Layout, rng: &mut R, x: f32) -> ObstaclePair {
    let gap = layout.gap();
    let draw = rng.random_range(0..gap_draw_range(layout));
    let lower_y = gap + draw as f32;
    let upper_offset = layout.pipe.height - lower_y + gap;

    ObstaclePair {
        upper_y: -upper_offset,
        lower_y,
        x,
        scored: false,
        spawned_next: false,
    }
}
