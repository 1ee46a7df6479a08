//! Process-level game loop
//!
//! Runs sessions back to back: each frame drains input, ticks the session,
//! plays the sounds its events trigger, always presents a frame and then
//! waits out the rest of the frame budget. A finished session is replaced by
//! a fresh one on the welcome screen.

use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::assets::{AssetBundle, AssetError};
use crate::audio::AudioSink;
use crate::input::{InputSource, tick_input, wants_quit};
use crate::renderer::{Presenter, RenderFrame};
use crate::scheduler::{Clock, FrameScheduler, SystemClock};
use crate::settings::{Settings, SettingsError};
use crate::sim::{GameState, tick};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("assets: {0}")]
    Assets(#[from] AssetError),
    #[error("terminal i/o: {0}")]
    Io(#[from] io::Error),
}

/// What happened during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    /// Sessions played to the end
    pub sessions: u64,
    pub best_score: u32,
    /// Stopped by a quit command rather than the tick limit
    pub quit: bool,
}

pub struct App<P, A, I, C: Clock = SystemClock> {
    assets: AssetBundle,
    settings: Settings,
    presenter: P,
    audio: A,
    input: I,
    scheduler: FrameScheduler<C>,
    base_seed: u64,
}

impl<P, A, I, C> App<P, A, I, C>
where
    P: Presenter,
    A: AudioSink,
    I: InputSource,
    C: Clock,
{
    pub fn new(
        assets: AssetBundle,
        settings: Settings,
        presenter: P,
        audio: A,
        input: I,
        scheduler: FrameScheduler<C>,
    ) -> Self {
        let base_seed = settings.session_seed(0, time_seed());
        Self {
            assets,
            settings,
            presenter,
            audio,
            input,
            scheduler,
            base_seed,
        }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn scheduler(&self) -> &FrameScheduler<C> {
        &self.scheduler
    }

    /// Seed of the `index`th session
    pub fn session_seed(&self, index: u64) -> u64 {
        self.base_seed.wrapping_add(index)
    }

    fn new_session(&self, index: u64) -> GameState {
        let seed = self.session_seed(index);
        log::debug!("New session {index} (seed {seed})");
        GameState::new(seed, &self.assets)
    }

    /// Run until quit or the tick limit
    pub fn run(&mut self) -> Result<RunSummary, AppError> {
        let mut summary = RunSummary::default();
        let mut session = 0;
        let mut state = self.new_session(session);

        loop {
            if self.settings.max_ticks.is_some_and(|max| summary.ticks >= max) {
                log::info!("Tick limit reached");
                break;
            }

            let commands = self.input.drain(&state)?;
            if wants_quit(&commands) {
                summary.quit = true;
                break;
            }

            let events = tick(&mut state, &tick_input(&commands));
            summary.ticks += 1;
            for event in &events {
                self.audio.dispatch(event);
            }

            if self.settings.show_fps {
                self.presenter.set_fps(self.scheduler.fps());
            }
            self.presenter
                .present(&RenderFrame::from_state(&state, &self.assets))?;

            if state.is_over() {
                summary.sessions += 1;
                summary.best_score = summary.best_score.max(state.score);
                log::info!(
                    "Session {} over: score {} (best {})",
                    session,
                    state.score,
                    summary.best_score
                );
                session += 1;
                state = self.new_session(session);
            }

            self.scheduler.wait_for_next_frame();
        }

        log::info!(
            "Run finished after {} ticks, {} sessions, best score {}",
            summary.ticks,
            summary.sessions,
            summary.best_score
        );
        Ok(summary)
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}
