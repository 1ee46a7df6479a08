//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (pipe stream is front-to-back = left-to-right)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod generator;
pub mod player;
pub mod rect;
pub mod state;
pub mod stream;
pub mod tick;

pub use collision::{Collision, check_collision, detect_collision};
pub use generator::{ObstaclePair, generate_pair};
pub use player::PlayerState;
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState, Layout, Tuning};
pub use stream::{ObstacleStream, StreamChange};
pub use tick::{TickInput, tick};
