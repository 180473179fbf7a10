//! Recorded frames
//!
//! A frame pairs a compressed RGB snapshot of the screen with the number of
//! ticks it stays on display.

use crate::{store::Compressor, AnimError};
use gifos_terminal::Screen;

/// One timed snapshot of the screen
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    delay_ticks: u32,
    compressor: Compressor,
    data: Vec<u8>,
}

impl Frame {
    /// Capture the current screen (including the cursor block if visible)
    pub fn capture(
        screen: &Screen,
        delay_ticks: u32,
        compressor: Compressor,
    ) -> Result<Self, AnimError> {
        Self::from_rgb(
            screen.width(),
            screen.height(),
            &screen.snapshot(),
            delay_ticks,
            compressor,
        )
    }

    /// Build a frame from packed RGB bytes
    pub fn from_rgb(
        width: u32,
        height: u32,
        rgb: &[u8],
        delay_ticks: u32,
        compressor: Compressor,
    ) -> Result<Self, AnimError> {
        let expected = (width as usize) * (height as usize) * 3;
        if rgb.len() != expected {
            return Err(AnimError::FrameSize(format!(
                "{width}x{height} frame needs {expected} bytes, got {}",
                rgb.len()
            )));
        }

        Ok(Self {
            width,
            height,
            delay_ticks,
            compressor,
            data: compressor.compress(rgb)?,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn delay_ticks(&self) -> u32 {
        self.delay_ticks
    }

    /// Size of the stored (compressed) snapshot
    pub fn stored_len(&self) -> usize {
        self.data.len()
    }

    /// Decompress the snapshot to packed RGB bytes
    pub fn rgb(&self) -> Result<Vec<u8>, AnimError> {
        let rgb = self.compressor.decompress(&self.data)?;
        let expected = (self.width as usize) * (self.height as usize) * 3;
        if rgb.len() != expected {
            return Err(AnimError::CompressionError(format!(
                "snapshot decompressed to {} bytes, expected {expected}",
                rgb.len()
            )));
        }
        Ok(rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::CompressionAlgorithm;
    use gifos_terminal::{GlyphAtlas, Theme};
    use std::sync::Arc;

    #[test]
    fn test_capture_matches_snapshot() {
        let mut screen = Screen::new(
            80,
            20,
            Arc::new(Theme::default()),
            Arc::new(GlyphAtlas::new(1)),
        )
        .unwrap();
        screen.write("hi");

        for algorithm in [
            CompressionAlgorithm::None,
            CompressionAlgorithm::Lz4,
            CompressionAlgorithm::Zstd,
        ] {
            let frame = Frame::capture(&screen, 7, Compressor::new(algorithm)).unwrap();
            assert_eq!(frame.delay_ticks(), 7);
            assert_eq!((frame.width(), frame.height()), (80, 20));
            assert_eq!(frame.rgb().unwrap(), screen.snapshot());
        }
    }

    #[test]
    fn test_wrong_length_is_rejected() {
        let result = Frame::from_rgb(2, 2, &[0; 5], 1, Compressor::default());
        assert!(matches!(result, Err(AnimError::FrameSize(_))));
    }
}
