//! Animated GIF encoder
//!
//! Two passes over the recorded frames: the first builds the global palette
//! from a histogram of every snapshot, the second indexes each snapshot,
//! diffs it against its predecessor and writes the patch with its delay.

use std::borrow::Cow;
use std::io::Write;

use gif::{DisposalMethod, Repeat};
use tracing::{debug, info};

use crate::{
    diff::FrameDelta,
    frame::Frame,
    palette::{Histogram, Palette, MAX_COLORS},
    timing::TickScale,
    AnimError,
};

/// Summary of one encode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodeStats {
    pub frames: usize,
    pub palette_colors: usize,
    pub lossless_palette: bool,
    /// Pixels a full-frame encoding would have written
    pub full_pixels: u64,
    /// Pixels actually written after differencing
    pub written_pixels: u64,
    /// Sum of frame delays in centiseconds
    pub total_centiseconds: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct AnimationEncoder {
    tick_scale: TickScale,
    looping: bool,
    max_colors: usize,
}

impl Default for AnimationEncoder {
    fn default() -> Self {
        Self::new(TickScale::default(), true)
    }
}

impl AnimationEncoder {
    pub fn new(tick_scale: TickScale, looping: bool) -> Self {
        Self {
            tick_scale,
            looping,
            max_colors: MAX_COLORS,
        }
    }

    /// Limit the palette size (clamped to `[1, 256]`)
    pub fn with_max_colors(mut self, max_colors: usize) -> Self {
        self.max_colors = max_colors.clamp(1, MAX_COLORS);
        self
    }

    /// Encode `frames` into `writer`
    pub fn encode<W: Write>(&self, frames: &[Frame], writer: W) -> Result<EncodeStats, AnimError> {
        let (width, height) = Self::dimensions(frames)?;
        let palette = self.build_palette(frames)?;
        debug!(
            "Palette: {} colors ({})",
            palette.len(),
            if palette.is_lossless() {
                "exact"
            } else {
                "quantized"
            }
        );

        let mut encoder = gif::Encoder::new(writer, width, height, &palette.to_rgb_bytes())?;
        if self.looping {
            encoder.set_repeat(Repeat::Infinite)?;
        }

        let mut stats = EncodeStats {
            frames: frames.len(),
            palette_colors: palette.len(),
            lossless_palette: palette.is_lossless(),
            ..EncodeStats::default()
        };
        let mut indexer = palette.indexer();
        let mut clock = self.tick_scale.clock();
        let mut previous: Option<Vec<u8>> = None;

        for frame in frames {
            let indices = indexer.index_rgb(&frame.rgb()?);
            let delta = FrameDelta::generate(
                previous.as_deref(),
                &indices,
                u32::from(width),
                u32::from(height),
            );
            let delay = clock.next_delay(frame.delay_ticks());

            let gif_frame = gif::Frame {
                left: delta.left as u16,
                top: delta.top as u16,
                width: delta.width as u16,
                height: delta.height as u16,
                delay,
                dispose: DisposalMethod::Keep,
                buffer: Cow::Borrowed(&delta.indices),
                ..gif::Frame::default()
            };
            encoder.write_frame(&gif_frame)?;

            stats.full_pixels += u64::from(width) * u64::from(height);
            stats.written_pixels += delta.area() as u64;
            stats.total_centiseconds += u64::from(delay);
            previous = Some(indices);
        }

        let mut writer = encoder.into_inner()?;
        writer.flush()?;

        info!(
            "Encoded {} frames, {} of {} pixels written, {} ms total",
            stats.frames,
            stats.written_pixels,
            stats.full_pixels,
            stats.total_centiseconds * 10
        );

        Ok(stats)
    }

    /// Common frame size, validated against the GIF limits
    fn dimensions(frames: &[Frame]) -> Result<(u16, u16), AnimError> {
        let first = frames.first().ok_or_else(|| {
            AnimError::InvalidSequence("no frames recorded, nothing to play back".to_string())
        })?;

        if let Some(other) = frames
            .iter()
            .find(|f| f.width() != first.width() || f.height() != first.height())
        {
            return Err(AnimError::FrameSize(format!(
                "frame of {}x{} in a {}x{} sequence",
                other.width(),
                other.height(),
                first.width(),
                first.height()
            )));
        }

        let width = u16::try_from(first.width()).ok();
        let height = u16::try_from(first.height()).ok();
        match (width, height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Ok((w, h)),
            _ => Err(AnimError::FrameSize(format!(
                "{}x{} is outside the GIF size range",
                first.width(),
                first.height()
            ))),
        }
    }

    fn build_palette(&self, frames: &[Frame]) -> Result<Palette, AnimError> {
        let mut histogram = Histogram::new();
        for frame in frames {
            histogram.add_rgb(&frame.rgb()?);
        }
        Ok(Palette::from_histogram(&histogram, self.max_colors))
    }
}
