//! Decode encoded animations back into full frames for comparison

use anyhow::{anyhow, Result};
use std::io::Read;

#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// Delay in centiseconds
    pub delay: u16,
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    /// Full canvas after applying this frame, packed RGB
    pub rgb: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct DecodedAnimation {
    pub width: u16,
    pub height: u16,
    pub palette: Vec<u8>,
    pub looping: bool,
    pub frames: Vec<DecodedFrame>,
}

impl DecodedAnimation {
    /// Decode a GIF, compositing every frame onto a persistent canvas
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut options = gif::DecodeOptions::new();
        options.set_color_output(gif::ColorOutput::Indexed);
        let mut decoder = options.read_info(reader)?;

        let width = decoder.width();
        let height = decoder.height();
        let palette = decoder
            .global_palette()
            .ok_or_else(|| anyhow!("animation has no global palette"))?
            .to_vec();

        let stride = usize::from(width);
        let mut canvas = vec![0u8; stride * usize::from(height)];
        let mut frames = Vec::new();

        while let Some(frame) = decoder.read_next_frame()? {
            let frame_width = usize::from(frame.width);
            for (row, chunk) in frame.buffer.chunks_exact(frame_width).enumerate() {
                let start = (usize::from(frame.top) + row) * stride + usize::from(frame.left);
                canvas[start..start + frame_width].copy_from_slice(chunk);
            }

            let rgb = canvas
                .iter()
                .flat_map(|&i| {
                    let i = usize::from(i) * 3;
                    [palette[i], palette[i + 1], palette[i + 2]]
                })
                .collect();

            frames.push(DecodedFrame {
                delay: frame.delay,
                left: frame.left,
                top: frame.top,
                width: frame.width,
                height: frame.height,
                rgb,
            });
        }

        Ok(Self {
            width,
            height,
            palette,
            looping: false,
            frames,
        })
    }

    /// Decode from bytes, also detecting the loop extension
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut animation = Self::from_reader(bytes)?;
        animation.looping = bytes.windows(11).any(|w| w == b"NETSCAPE2.0");
        Ok(animation)
    }

    pub fn from_path(path: &std::path::Path) -> Result<Self> {
        Self::from_bytes(&std::fs::read(path)?)
    }

    pub fn total_delay(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.delay)).sum()
    }
}
