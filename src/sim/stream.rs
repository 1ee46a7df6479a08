//! The scrolling pipe stream
//!
//! A FIFO of pipe pairs: new pairs are pushed at the back, off-screen pairs are
//! popped from the front, so front-to-back order is also left-to-right order.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::generator::{ObstaclePair, generate_pair, generate_pair_at};
use super::state::Layout;
use crate::consts::{FIRST_PIPE_OFFSET, MAX_LIVE_PAIRS};

/// What one `advance` did to the stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamChange {
    pub spawned: bool,
    pub evicted: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleStream {
    pairs: VecDeque<ObstaclePair>,
}

impl ObstacleStream {
    pub fn new() -> Self {
        Self {
            pairs: VecDeque::with_capacity(MAX_LIVE_PAIRS),
        }
    }

    /// Opening layout: two pairs, the second half a screen behind the first
    pub fn seeded<R: Rng>(layout: &Layout, rng: &mut R) -> Self {
        let first_x = layout.screen_width + FIRST_PIPE_OFFSET;
        let mut stream = Self::new();
        stream.push(generate_pair_at(layout, rng, first_x));
        stream.push(generate_pair_at(layout, rng, first_x + layout.screen_width / 2.0));
        stream
    }

    pub fn push(&mut self, pair: ObstaclePair) {
        self.pairs.push_back(pair);
        if self.pairs.len() > MAX_LIVE_PAIRS {
            log::warn!("pipe stream holds {} pairs", self.pairs.len());
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ObstaclePair> {
        self.pairs.iter()
    }

    /// Oldest (leftmost) pair. The stream is never empty during play; an
    /// empty stream here is a bug, not a runtime condition.
    pub fn head(&self) -> &ObstaclePair {
        self.pairs
            .front()
            .expect("pipe stream must not be empty during play")
    }

    /// Scroll every pair, then spawn behind the head and evict the head as needed
    pub fn advance<R: Rng>(
        &mut self,
        vel_x: f32,
        spawn_threshold_x: f32,
        layout: &Layout,
        rng: &mut R,
    ) -> StreamChange {
        for pair in self.pairs.iter_mut() {
            pair.x += vel_x;
        }

        let mut change = StreamChange::default();

        // Crossing the threshold, not landing inside (0, threshold): fast
        // streams can step over that window in a single tick
        let head = self.head();
        if !head.spawned_next && head.x < spawn_threshold_x {
            if let Some(head) = self.pairs.front_mut() {
                head.spawned_next = true;
            }
            let pair = generate_pair(layout, rng);
            log::debug!("spawned pipe pair at x={} gap_top={}", pair.x, pair.lower_y);
            self.push(pair);
            change.spawned = true;
        }

        if self.head().is_off_screen(layout) {
            self.pairs.pop_front();
            log::debug!("evicted pipe pair, {} remain", self.pairs.len());
            change.evicted = true;
        }

        change
    }

    /// Credit every unscored pair whose midpoint has reached the player's
    /// midpoint. The window is never narrower than one tick of travel, so a
    /// fast stream cannot skip a pair, and the per-pair flag stops a slow one
    /// from counting it twice. Returns the number of pairs credited.
    pub fn score_crossings(&mut self, player_mid_x: f32, window: f32, layout: &Layout) -> u32 {
        let mut credited = 0;
        for pair in self.pairs.iter_mut().filter(|p| !p.scored) {
            let pipe_mid = pair.mid_x(layout);
            if pipe_mid <= player_mid_x && player_mid_x < pipe_mid + window {
                pair.scored = true;
                credited += 1;
            }
        }
        credited
    }
}
