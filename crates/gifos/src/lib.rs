//! GifOS: scripted terminal animations
//!
//! Drives a virtual terminal through an ordered script of print, cursor,
//! typing, image and hold instructions, then encodes the recorded frames as
//! a looping GIF.

pub mod assets;
pub mod cli;
pub mod config;
pub mod instruction;
pub mod profile;
pub mod renderer;

pub use instruction::{Instruction, Script};
pub use renderer::{RenderOptions, Renderer};

pub use gifos_anim::{CompressionAlgorithm, SpeedClass, TickScale};
pub use gifos_terminal::{Color, CursorTarget, Rect, Theme};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Session closed: the animation has already been encoded")]
    SessionClosed,

    #[error("Image decode failure: {0}")]
    DecodeFailure(#[from] image::ImageError),

    #[error(transparent)]
    Terminal(#[from] gifos_terminal::TerminalError),

    #[error(transparent)]
    Anim(#[from] gifos_anim::AnimError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Whether the error means there was nothing to encode
    pub fn is_invalid_sequence(&self) -> bool {
        matches!(
            self,
            RenderError::Anim(gifos_anim::AnimError::InvalidSequence(_))
        )
    }
}
