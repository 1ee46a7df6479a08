//! Presentation seam
//!
//! The simulation hands a `RenderFrame` to a `Presenter` once per tick. How
//! the sprites reach a screen is the presenter's business.

pub mod frame;
pub mod headless;
pub mod terminal;

use std::io;

pub use frame::{Placement, RenderFrame, Sprite, score_digits, score_placements};
pub use headless::{JsonLinesPresenter, RecordingPresenter};
pub use terminal::{Canvas, TerminalPresenter};

/// Consumer of render descriptors
pub trait Presenter {
    /// Draw one frame
    fn present(&mut self, frame: &RenderFrame) -> io::Result<()>;

    /// Measured frame rate, for presenters that display it
    fn set_fps(&mut self, _fps: u32) {}
}
