//! Render descriptor
//!
//! One `RenderFrame` per tick: an ordered list of sprite placements, back to
//! front. Presenters only need to draw each sprite at its position.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::AssetBundle;
use crate::consts::{MESSAGE_Y_FRAC, SCORE_Y_FRAC};
use crate::sim::{GamePhase, GameState};

/// Sprite identity; each obstacle kind always uses the same image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    Background,
    /// Pipe image rotated 180 degrees
    PipeUpper,
    PipeLower,
    Base,
    Player,
    /// Welcome screen banner
    Message,
    Digit(u8),
}

/// One sprite drawn with its top-left corner at `pos`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub sprite: Sprite,
    pub pos: Vec2,
}

impl Placement {
    pub fn new(sprite: Sprite, x: f32, y: f32) -> Self {
        Self {
            sprite,
            pos: Vec2::new(x, y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub phase: GamePhase,
    pub tick: u64,
    pub score: u32,
    /// Back-to-front draw order
    pub placements: Vec<Placement>,
}

impl RenderFrame {
    /// Build the frame for the current state of a session
    pub fn from_state(state: &GameState, assets: &AssetBundle) -> Self {
        let placements = match state.phase {
            GamePhase::Welcome => welcome_scene(state, assets),
            GamePhase::Playing | GamePhase::Ended => play_scene(state, assets),
        };
        Self {
            phase: state.phase,
            tick: state.time_ticks,
            score: state.score,
            placements,
        }
    }

    /// Placements of one sprite kind, in draw order
    pub fn placements_of(&self, sprite: Sprite) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(move |p| p.sprite == sprite)
    }
}

fn welcome_scene(state: &GameState, assets: &AssetBundle) -> Vec<Placement> {
    let layout = &state.layout;
    let player_y = ((layout.screen_height - assets.player.height) / 2.0).trunc();
    let message_x = ((layout.screen_width - assets.message.width) / 2.0).trunc();
    let message_y = (layout.screen_height * MESSAGE_Y_FRAC).trunc();

    vec![
        Placement::new(Sprite::Background, 0.0, 0.0),
        Placement::new(Sprite::Player, layout.player_x(), player_y),
        Placement::new(Sprite::Message, message_x, message_y),
    ]
}

fn play_scene(state: &GameState, assets: &AssetBundle) -> Vec<Placement> {
    let layout = &state.layout;
    let mut placements = Vec::with_capacity(4 + 2 * state.pipes.len());

    placements.push(Placement::new(Sprite::Background, 0.0, 0.0));
    for pair in state.pipes.iter() {
        placements.push(Placement::new(Sprite::PipeUpper, pair.x, pair.upper_y));
        placements.push(Placement::new(Sprite::PipeLower, pair.x, pair.lower_y));
    }
    placements.push(Placement::new(Sprite::Base, 0.0, layout.ground_y));
    placements.push(Placement {
        sprite: Sprite::Player,
        pos: state.player.pos,
    });
    placements.extend(score_placements(
        state.score,
        assets,
        layout.screen_width,
        layout.screen_height * SCORE_Y_FRAC,
    ));

    placements
}

/// Decimal digits of `score`, most significant first
pub fn score_digits(score: u32) -> Vec<u8> {
    score
        .to_string()
        .bytes()
        .map(|b| b - b'0')
        .collect()
}

/// Digit sprites laid out left to right, centered horizontally
pub fn score_placements(score: u32, assets: &AssetBundle, screen_width: f32, y: f32) -> Vec<Placement> {
    let digits = score_digits(score);
    let width: f32 = digits.iter().map(|&d| assets.digit(d).width).sum();

    let mut x = (screen_width - width) / 2.0;
    digits
        .into_iter()
        .map(|d| {
            let placement = Placement::new(Sprite::Digit(d), x, y);
            x += assets.digit(d).width;
            placement
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};

    #[test]
    fn test_score_digits() {
        assert_eq!(score_digits(0), vec![0]);
        assert_eq!(score_digits(7), vec![7]);
        assert_eq!(score_digits(1024), vec![1, 0, 2, 4]);
    }

    #[test]
    fn test_score_centered() {
        let assets = AssetBundle::default();
        // "10": 16 + 24 = 40 wide, starts at (289 - 40) / 2
        let placed = score_placements(10, &assets, 289.0, 61.0);
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0], Placement::new(Sprite::Digit(1), 124.5, 61.0));
        assert_eq!(placed[1], Placement::new(Sprite::Digit(0), 140.5, 61.0));
    }

    #[test]
    fn test_welcome_frame() {
        let assets = AssetBundle::default();
        let state = GameState::new(1, &assets);
        let frame = RenderFrame::from_state(&state, &assets);

        assert_eq!(frame.phase, GamePhase::Welcome);
        assert_eq!(
            frame.placements,
            vec![
                Placement::new(Sprite::Background, 0.0, 0.0),
                Placement::new(Sprite::Player, 57.0, 243.0),
                Placement::new(Sprite::Message, 52.0, 66.0),
            ]
        );
    }

    #[test]
    fn test_play_frame_order() {
        let assets = AssetBundle::default();
        let mut state = GameState::new(1, &assets);
        tick(&mut state, &TickInput { flap: true });
        tick(&mut state, &TickInput::default());
        let frame = RenderFrame::from_state(&state, &assets);

        let kinds: Vec<Sprite> = frame.placements.iter().map(|p| p.sprite).collect();
        assert_eq!(
            kinds,
            vec![
                Sprite::Background,
                Sprite::PipeUpper,
                Sprite::PipeLower,
                Sprite::PipeUpper,
                Sprite::PipeLower,
                Sprite::Base,
                Sprite::Player,
                Sprite::Digit(0),
            ]
        );

        let base = frame.placements_of(Sprite::Base).next().map(|p| p.pos);
        assert_eq!(base, Some(Vec2::new(0.0, state.layout.ground_y)));
        let player = frame.placements_of(Sprite::Player).next().map(|p| p.pos);
        assert_eq!(player, Some(state.player.pos));
    }

    #[test]
    fn test_frame_serializes() {
        let assets = AssetBundle::default();
        let state = GameState::new(3, &assets);
        let frame = RenderFrame::from_state(&state, &assets);
        let json = serde_json::to_string(&frame).expect("frame should serialize");
        assert!(json.contains("\"Welcome\""));
        let back: RenderFrame = serde_json::from_str(&json).expect("frame should deserialize");
        assert_eq!(back, frame);
    }
}
