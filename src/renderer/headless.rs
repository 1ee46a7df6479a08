//! Presenters without a screen

use std::io::{self, Write};

use super::{Presenter, RenderFrame};

/// Writes each frame as one JSON object per line
pub struct JsonLinesPresenter<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for JsonLinesPresenter<W> {
    fn present(&mut self, frame: &RenderFrame) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, frame)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

/// Keeps every frame in memory
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub frames: Vec<RenderFrame>,
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, frame: &RenderFrame) -> io::Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}
