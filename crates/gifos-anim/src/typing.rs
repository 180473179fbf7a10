//! Typing animation
//!
//! Emits text in small chunks, capturing a frame after each chunk so the
//! result looks like someone typing. Time is purely logical: every chunk is
//! held for the speed class's fixed number of ticks.

use crate::{frame::Frame, store::Compressor, AnimError};
use gifos_terminal::Screen;

/// Characters emitted per frame and the delay of each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingProfile {
    pub chars_per_frame: usize,
    pub delay_ticks: u32,
}

/// Named typing speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpeedClass {
    Slow,
    #[default]
    Normal,
    Fast,
    Rapid,
    Custom {
        chars_per_frame: usize,
        delay_ticks: u32,
    },
}

impl SpeedClass {
    pub fn profile(self) -> TypingProfile {
        let (chars_per_frame, delay_ticks) = match self {
            SpeedClass::Slow => (1, 8),
            SpeedClass::Normal => (1, 5),
            SpeedClass::Fast => (1, 2),
            SpeedClass::Rapid => (4, 1),
            SpeedClass::Custom {
                chars_per_frame,
                delay_ticks,
            } => (chars_per_frame.max(1), delay_ticks),
        };

        TypingProfile {
            chars_per_frame,
            delay_ticks,
        }
    }
}

/// Type `text` onto the screen, returning one frame per emitted chunk
pub fn type_text(
    screen: &mut Screen,
    text: &str,
    speed: SpeedClass,
    compressor: Compressor,
) -> Result<Vec<Frame>, AnimError> {
    let profile = speed.profile();
    let chars: Vec<char> = text.chars().collect();
    let mut frames = Vec::with_capacity(chars.len().div_ceil(profile.chars_per_frame));

    for chunk in chars.chunks(profile.chars_per_frame) {
        for &c in chunk {
            screen.write_char(c);
        }
        frames.push(Frame::capture(screen, profile.delay_ticks, compressor)?);
    }

    Ok(frames)
}
