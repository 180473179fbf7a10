//! Frame recorder
//!
//! Accumulates the ordered frame sequence. Frames are never coalesced, even
//! when pixel-identical to their predecessor; the encoder handles size.

use crate::{frame::Frame, store::Compressor, AnimError};
use gifos_terminal::Screen;
use tracing::trace;

#[derive(Debug, Default)]
pub struct FrameRecorder {
    frames: Vec<Frame>,
    compressor: Compressor,
}

impl FrameRecorder {
    pub fn new(compressor: Compressor) -> Self {
        Self {
            frames: Vec::new(),
            compressor,
        }
    }

    pub fn compressor(&self) -> Compressor {
        self.compressor
    }

    /// Snapshot the screen and keep it on display for `ticks`
    pub fn hold(&mut self, screen: &Screen, ticks: u32) -> Result<(), AnimError> {
        let frame = Frame::capture(screen, ticks, self.compressor)?;
        trace!(
            "Frame {} held for {ticks} ticks ({} bytes stored)",
            self.frames.len(),
            frame.stored_len()
        );
        self.frames.push(frame);
        Ok(())
    }

    /// Append frames produced elsewhere, in order
    pub fn extend(&mut self, frames: impl IntoIterator<Item = Frame>) {
        self.frames.extend(frames);
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Sum of all frame delays
    pub fn total_ticks(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.delay_ticks())).sum()
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}
