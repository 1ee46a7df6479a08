//! Fixed timestep simulation tick
//!
//! Core game loop that advances a session deterministically.

use super::collision::detect_collision;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Flap pressed at least once since the previous tick; also starts the
    /// session from the welcome screen
    pub flap: bool,
}

/// Advance the session by one tick and report what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    match state.phase {
        GamePhase::Welcome => {
            if input.flap {
                state.phase = GamePhase::Playing;
                log::info!("Session started (seed {})", state.seed);
                events.push(GameEvent::SessionStarted);
            }
        }
        GamePhase::Playing => play(state, input, &mut events),
        GamePhase::Ended => {}
    }

    events
}

fn play(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    state.time_ticks += 1;

    if state.player.step(input.flap, &state.tuning, &state.layout) {
        events.push(GameEvent::Flapped);
    }

    if let Some(hit) = detect_collision(&state.player, &state.pipes, &state.layout) {
        state.phase = GamePhase::Ended;
        state.ended_by = Some(hit);
        log::info!(
            "Collision {:?} at tick {} (y={:.1}), final score {}",
            hit,
            state.time_ticks,
            state.player.pos.y,
            state.score
        );
        events.push(GameEvent::Collided(hit));
        return;
    }

    let window = state.tuning.score_window.max(state.tuning.pipe_vel_x.abs());
    let player_mid = state.player_mid_x();
    let credited = state.pipes.score_crossings(player_mid, window, &state.layout);
    for _ in 0..credited {
        state.score += 1;
        log::info!("Score {}", state.score);
        events.push(GameEvent::Scored { score: state.score });
    }

    state.pipes.advance(
        state.tuning.pipe_vel_x,
        state.tuning.spawn_threshold_x,
        &state.layout,
        &mut state.rng,
    );

    log::trace!(
        "tick {} y={:.1} vy={:.1} pipes={}",
        state.time_ticks,
        state.player.pos.y,
        state.player.vel_y,
        state.pipes.len()
    );
}
