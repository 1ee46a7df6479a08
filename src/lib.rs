//! Flappy - a fixed-timestep pipe-gate arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipes, collisions, session state)
//! - `renderer`: Per-tick render descriptor and the presenters that draw it
//! - `scheduler`: Fixed-rate frame pacing
//! - `assets`: Sprite dimensions the simulation and layout depend on
//! - `audio`: Sound effect triggers and sinks
//! - `input`: Logical commands drained once per tick
//! - `settings`: Runtime preferences from a JSON file and command line flags
//! - `app`: Process-level session loop

pub mod app;
pub mod assets;
pub mod audio;
pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use assets::AssetBundle;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation and render rate (ticks per second)
    pub const SIM_HZ: u32 = 32;

    /// Screen dimensions in pixels
    pub const SCREEN_WIDTH: f32 = 289.0;
    pub const SCREEN_HEIGHT: f32 = 511.0;
    /// Top edge of the base sprite
    pub const GROUND_Y: f32 = SCREEN_HEIGHT * 0.8;
    /// Player counts as grounded this many pixels below `GROUND_Y - margin`
    pub const GROUND_MARGIN: f32 = 25.0;

    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 1.0;
    /// Terminal fall velocity
    pub const MAX_FALL_VEL: f32 = 10.0;
    /// Fastest allowed rise
    pub const MIN_RISE_VEL: f32 = -8.0;
    /// Velocity set by a flap
    pub const FLAP_IMPULSE: f32 = -8.0;
    /// Velocity at the first tick of a session (small upward kick)
    pub const START_VEL: f32 = -9.0;

    /// Horizontal pipe velocity per tick
    pub const PIPE_VEL_X: f32 = -4.0;
    /// Head pair spawns its successor once its x drops below this
    pub const SPAWN_THRESHOLD_X: f32 = 5.0;
    /// New pairs appear this far past the right edge
    pub const PIPE_SPAWN_OFFSET: f32 = 10.0;
    /// The first pair of a session starts this far past the right edge
    pub const FIRST_PIPE_OFFSET: f32 = 200.0;
    /// Upper bound on simultaneously live pairs
    pub const MAX_LIVE_PAIRS: usize = 4;

    /// Width of the pipe-midpoint window the player midpoint must fall into
    pub const SCORE_WINDOW: f32 = 4.0;

    /// Vertical placement of HUD elements (fraction of screen height)
    pub const SCORE_Y_FRAC: f32 = 0.12;
    pub const MESSAGE_Y_FRAC: f32 = 0.13;
}
