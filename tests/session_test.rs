//! End-to-end session scenarios through the public API

use flappy::app::App;
use flappy::audio::{AudioSink, RecordingAudio, SoundEffect};
use flappy::consts::MAX_LIVE_PAIRS;
use flappy::input::{Autopilot, Command, ScriptedInput};
use flappy::renderer::{RecordingPresenter, RenderFrame, Sprite};
use flappy::scheduler::{FrameScheduler, ManualClock};
use flappy::sim::{
    Collision, GameEvent, GamePhase, GameState, ObstaclePair, ObstacleStream, TickInput, tick,
};
use flappy::{AssetBundle, Settings};

fn settings(seed: u64, max_ticks: u64) -> Settings {
    Settings {
        seed: Some(seed),
        max_ticks: Some(max_ticks),
        ..Settings::default()
    }
}

fn autopilot_run(seed: u64, ticks: u64) -> (Vec<RenderFrame>, Vec<SoundEffect>) {
    let mut app = App::new(
        AssetBundle::default(),
        settings(seed, ticks),
        RecordingPresenter::default(),
        RecordingAudio::default(),
        Autopilot,
        FrameScheduler::with_clock(32, ManualClock::default()),
    );
    let summary = app.run().expect("run should not fail");
    assert_eq!(summary.ticks, ticks);
    (app.presenter().frames.clone(), app.audio().played.clone())
}

#[test]
fn test_same_seed_same_run() {
    let (frames_a, sounds_a) = autopilot_run(77, 600);
    let (frames_b, sounds_b) = autopilot_run(77, 600);
    assert_eq!(frames_a, frames_b);
    assert_eq!(sounds_a, sounds_b);
}

#[test]
fn test_every_frame_is_well_formed() {
    let (frames, sounds) = autopilot_run(3, 600);
    assert_eq!(frames.len(), 600);
    assert_eq!(sounds.first(), Some(&SoundEffect::Swoosh));

    for frame in &frames {
        assert_eq!(frame.placements.first().map(|p| p.sprite), Some(Sprite::Background));
        let pipes = frame.placements_of(Sprite::PipeUpper).count();
        assert_eq!(pipes, frame.placements_of(Sprite::PipeLower).count());
        assert!(pipes <= MAX_LIVE_PAIRS);
        if frame.phase != GamePhase::Welcome {
            assert_eq!(frame.placements_of(Sprite::Player).count(), 1);
            assert_eq!(frame.placements_of(Sprite::Base).count(), 1);
        }
    }
}

#[test]
fn test_score_then_crash_sounds() {
    let assets = AssetBundle::default();
    let mut state = GameState::new(21, &assets);
    let mut audio = RecordingAudio::default();
    let mut play = |state: &mut GameState, flap: bool| {
        for event in tick(state, &TickInput { flap }) {
            audio.dispatch(&event);
        }
    };

    play(&mut state, true);
    assert_eq!(state.phase, GamePhase::Playing);

    // A single pair with its gap around the player
    let mut pipes = ObstacleStream::new();
    pipes.push(ObstaclePair {
        upper_y: 150.0 - 320.0,
        lower_y: 150.0 + state.layout.gap(),
        x: 120.0,
        scored: false,
        spawned_next: false,
    });
    state.pipes = pipes;
    state.player.pos.y = 200.0;
    state.player.vel_y = 0.0;

    for i in 0..40 {
        play(&mut state, i % 17 == 0);
    }
    assert_eq!(state.score, 1);

    while !state.is_over() {
        play(&mut state, false);
    }
    assert_eq!(state.ended_by, Some(Collision::Ground));

    let played = audio.played;
    assert_eq!(played.first(), Some(&SoundEffect::Swoosh));
    assert_eq!(played.iter().filter(|&&e| e == SoundEffect::Point).count(), 1);
    assert_eq!(played.iter().filter(|&&e| e == SoundEffect::Wing).count(), 3);
    assert_eq!(played[played.len() - 2..], [SoundEffect::Hit, SoundEffect::Die]);
}

#[test]
fn test_crash_frame_then_fresh_welcome() {
    let mut app = App::new(
        AssetBundle::default(),
        settings(9, 35),
        RecordingPresenter::default(),
        RecordingAudio::default(),
        ScriptedInput::new([vec![Command::Flap]]),
        FrameScheduler::with_clock(32, ManualClock::default()),
    );
    let summary = app.run().expect("run should not fail");
    assert_eq!(summary.sessions, 1);

    let frames = &app.presenter().frames;
    let crash = frames
        .iter()
        .position(|f| f.phase == GamePhase::Ended)
        .expect("session should end");
    assert_eq!(frames[crash].tick, 30);
    assert!(frames[crash + 1..].iter().all(|f| f.phase == GamePhase::Welcome));
}

#[test]
fn test_collision_event_carries_cause() {
    let mut state = GameState::new(1, &AssetBundle::default());
    tick(&mut state, &TickInput { flap: true });
    // Flap straight into the ceiling
    let mut cause = None;
    for _ in 0..100 {
        if let Some(GameEvent::Collided(hit)) = tick(&mut state, &TickInput { flap: true })
            .into_iter()
            .find(|e| matches!(e, GameEvent::Collided(_)))
        {
            cause = Some(hit);
            break;
        }
    }
    assert_eq!(cause, Some(Collision::Ceiling));
}
