//! Audio triggers
//!
//! The simulation only says which sound to play; an `AudioSink` decides how.
//! The bundled manager has no mixer: it logs every trigger and can ring the
//! terminal bell for the important ones.

use std::io::{self, Write};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Flap
    Wing,
    /// Player hit a pipe or the bounds
    Hit,
    /// Passed a pipe pair
    Point,
    /// Run over, follows `Hit`
    Die,
    /// Session started
    Swoosh,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 5] = [
        SoundEffect::Wing,
        SoundEffect::Hit,
        SoundEffect::Point,
        SoundEffect::Die,
        SoundEffect::Swoosh,
    ];

    /// Sounds triggered by a game event, in play order
    pub fn for_event(event: &GameEvent) -> &'static [SoundEffect] {
        match event {
            GameEvent::SessionStarted => &[SoundEffect::Swoosh],
            GameEvent::Flapped => &[SoundEffect::Wing],
            GameEvent::Scored { .. } => &[SoundEffect::Point],
            GameEvent::Collided(_) => &[SoundEffect::Hit, SoundEffect::Die],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Wing => "wing",
            SoundEffect::Hit => "hit",
            SoundEffect::Point => "point",
            SoundEffect::Die => "die",
            SoundEffect::Swoosh => "swoosh",
        }
    }
}

/// Plays sound effects. Fire and forget: playback never fails the game.
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);

    /// Play everything an event triggers
    fn dispatch(&mut self, event: &GameEvent) {
        for &effect in SoundEffect::for_event(event) {
            self.play(effect);
        }
    }
}

/// Audio manager for the game
#[derive(Debug, Default)]
pub struct AudioManager {
    muted: bool,
    /// Ring the terminal bell on hits and points
    bell: bool,
}

impl AudioManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn set_bell(&mut self, bell: bool) {
        self.bell = bell;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn rings_bell(&self, effect: SoundEffect) -> bool {
        !self.muted && self.bell && matches!(effect, SoundEffect::Hit | SoundEffect::Point)
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        log::debug!("sfx {}", effect.as_str());

        // stdout belongs to the presenter
        if self.rings_bell(effect) {
            let mut err = io::stderr();
            let _ = err.write_all(b"\x07").and_then(|_| err.flush());
        }
    }
}

/// Remembers every effect played
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<SoundEffect>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Collision;

    #[test]
    fn test_event_sounds() {
        assert_eq!(SoundEffect::for_event(&GameEvent::Flapped), &[SoundEffect::Wing]);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Scored { score: 3 }),
            &[SoundEffect::Point]
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::Collided(Collision::Ground)),
            &[SoundEffect::Hit, SoundEffect::Die]
        );
    }

    #[test]
    fn test_dispatch_records_in_order() {
        let mut audio = RecordingAudio::default();
        audio.dispatch(&GameEvent::SessionStarted);
        audio.dispatch(&GameEvent::Flapped);
        audio.dispatch(&GameEvent::Collided(Collision::Ceiling));
        assert_eq!(
            audio.played,
            vec![
                SoundEffect::Swoosh,
                SoundEffect::Wing,
                SoundEffect::Hit,
                SoundEffect::Die
            ]
        );
    }

    #[test]
    fn test_mute_silences_bell() {
        let mut audio = AudioManager::new();
        audio.set_bell(true);
        assert!(audio.rings_bell(SoundEffect::Point));
        audio.set_muted(true);
        assert!(audio.is_muted());
        assert!(!audio.rings_bell(SoundEffect::Point));
        assert!(!audio.rings_bell(SoundEffect::Hit));
    }

    #[test]
    fn test_bell_only_for_hits_and_points() {
        let mut audio = AudioManager::new();
        assert!(!audio.rings_bell(SoundEffect::Hit));
        audio.set_bell(true);
        assert!(audio.rings_bell(SoundEffect::Hit));
        assert!(audio.rings_bell(SoundEffect::Point));
        assert!(!audio.rings_bell(SoundEffect::Wing));
    }

    #[test]
    fn test_names_unique() {
        let mut names: Vec<&str> = SoundEffect::ALL.iter().map(|e| e.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SoundEffect::ALL.len());
    }
}
