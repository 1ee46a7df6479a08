//! Game state and core simulation types
//!
//! Everything a session owns lives here: the player, the pipe stream, the
//! seeded RNG and the score.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Collision;
use super::player::PlayerState;
use super::stream::ObstacleStream;
use crate::assets::{AssetBundle, SpriteSize};
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Idle frames until the player presses flap
    Welcome,
    /// Active gameplay
    Playing,
    /// Run ended by a collision (terminal)
    Ended,
}

/// Something that happened during a tick that the outside world may react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Welcome screen dismissed, play begins
    SessionStarted,
    /// Flap impulse applied
    Flapped,
    /// A pipe pair was passed; carries the new score
    Scored { score: u32 },
    /// Run ended
    Collided(Collision),
}

/// Screen geometry and sprite sizes the simulation depends on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Top edge of the base sprite
    pub ground_y: f32,
    pub player: SpriteSize,
    pub pipe: SpriteSize,
    pub base_height: f32,
}

impl Layout {
    pub fn from_assets(assets: &AssetBundle) -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            ground_y: GROUND_Y,
            player: assets.player,
            pipe: assets.pipe,
            base_height: assets.base.height,
        }
    }

    /// Fixed x of the player for the whole session
    pub fn player_x(&self) -> f32 {
        (self.screen_width / 5.0).trunc()
    }

    /// Vertical band between an upper and a lower pipe
    pub fn gap(&self) -> f32 {
        self.screen_height / 3.0
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::from_assets(&AssetBundle::default())
    }
}

/// Physics and scrolling constants, per tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    pub gravity: f32,
    pub max_fall_vel: f32,
    pub min_rise_vel: f32,
    pub flap_impulse: f32,
    pub start_vel: f32,
    pub pipe_vel_x: f32,
    pub spawn_threshold_x: f32,
    pub score_window: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_fall_vel: MAX_FALL_VEL,
            min_rise_vel: MIN_RISE_VEL,
            flap_impulse: FLAP_IMPULSE,
            start_vel: START_VEL,
            pipe_vel_x: PIPE_VEL_X,
            spawn_threshold_x: SPAWN_THRESHOLD_X,
            score_window: SCORE_WINDOW,
        }
    }
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Source of the one random draw per pipe pair
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    /// Ticks spent in `Playing`
    pub time_ticks: u64,
    pub player: PlayerState,
    pub pipes: ObstacleStream,
    pub layout: Layout,
    pub tuning: Tuning,
    /// What ended the run, once it has ended
    pub ended_by: Option<Collision>,
}

impl GameState {
    /// Create a new session in the welcome phase
    pub fn new(seed: u64, assets: &AssetBundle) -> Self {
        Self::with_tuning(seed, assets, Tuning::default())
    }

    pub fn with_tuning(seed: u64, assets: &AssetBundle, tuning: Tuning) -> Self {
        let layout = Layout::from_assets(assets);
        let mut rng = Pcg32::seed_from_u64(seed);
        let pipes = ObstacleStream::seeded(&layout, &mut rng);
        Self {
            seed,
            rng,
            phase: GamePhase::Welcome,
            score: 0,
            time_ticks: 0,
            player: PlayerState::spawn(&layout, &tuning),
            pipes,
            layout,
            tuning,
            ended_by: None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    /// Horizontal midpoint of the player sprite
    pub fn player_mid_x(&self) -> f32 {
        self.player.pos.x + self.layout.player.width / 2.0
    }
}
