//! Player input
//!
//! Every pending input event is drained at the start of a tick and folded
//! into a list of logical commands; nothing carries over to the next tick.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::{GamePhase, GameState, TickInput};

/// Logical actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Space, up arrow, `w` or `k`
    Flap,
    /// Escape or window close
    Quit,
}

/// Anything that can supply this tick's commands
pub trait InputSource {
    /// Drain everything pending. `state` is the session about to be ticked.
    fn drain(&mut self, state: &GameState) -> io::Result<Vec<Command>>;
}

/// Fold a tick's commands into simulation input
pub fn tick_input(commands: &[Command]) -> TickInput {
    TickInput {
        flap: commands.contains(&Command::Flap),
    }
}

pub fn wants_quit(commands: &[Command]) -> bool {
    commands.contains(&Command::Quit)
}

/// Key bindings
pub fn map_key(key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char(' ' | 'w' | 'k') | KeyCode::Up => Some(Command::Flap),
        KeyCode::Esc | KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        _ => None,
    }
}

/// Reads keyboard events from the terminal without blocking
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn drain(&mut self, _state: &GameState) -> io::Result<Vec<Command>> {
        let mut commands = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                commands.extend(map_key(&key));
            }
        }
        Ok(commands)
    }
}

/// Replays a fixed command list per tick, then goes quiet
#[derive(Debug, Default)]
pub struct ScriptedInput {
    ticks: VecDeque<Vec<Command>>,
}

impl ScriptedInput {
    pub fn new(ticks: impl IntoIterator<Item = Vec<Command>>) -> Self {
        Self {
            ticks: ticks.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn drain(&mut self, _state: &GameState) -> io::Result<Vec<Command>> {
        Ok(self.ticks.pop_front().unwrap_or_default())
    }
}

/// Demo player: starts every session and flaps to keep the bird above the
/// next lower pipe
#[derive(Debug, Default)]
pub struct Autopilot;

impl Autopilot {
    /// Distance kept between the bird's feet and the lower pipe
    const CLEARANCE: f32 = 12.0;

    pub fn decide(state: &GameState) -> Option<Command> {
        match state.phase {
            GamePhase::Welcome => Some(Command::Flap),
            GamePhase::Ended => None,
            GamePhase::Playing => {
                let layout = &state.layout;
                let player = &state.player;
                let floor = state
                    .pipes
                    .iter()
                    .find(|p| p.x + layout.pipe.width >= player.pos.x)
                    .map(|p| p.lower_y)
                    .unwrap_or(layout.ground_y);

                let next_bottom = player.pos.y + layout.player.height + player.vel_y + 1.0;
                let falling = player.vel_y >= 0.0;
                (falling && next_bottom > floor - Self::CLEARANCE).then_some(Command::Flap)
            }
        }
    }
}

impl InputSource for Autopilot {
    fn drain(&mut self, state: &GameState) -> io::Result<Vec<Command>> {
        Ok(Self::decide(state).into_iter().collect())
    }
}
