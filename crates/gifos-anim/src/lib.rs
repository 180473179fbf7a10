//! Frame recording and GIF encoding for GifOS
//!
//! Captures timed snapshots of a terminal screen (compressed in memory), and
//! turns the recorded sequence into a looping, palette-indexed animated GIF
//! using frame differencing.

pub mod diff;
pub mod encoder;
pub mod frame;
pub mod palette;
pub mod recorder;
pub mod store;
pub mod timing;
pub mod typing;

pub use diff::FrameDelta;
pub use encoder::{AnimationEncoder, EncodeStats};
pub use frame::Frame;
pub use palette::Palette;
pub use recorder::FrameRecorder;
pub use store::{CompressionAlgorithm, Compressor};
pub use timing::{DelayClock, TickScale};
pub use typing::{type_text, SpeedClass, TypingProfile};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnimError {
    #[error("Invalid sequence: {0}")]
    InvalidSequence(String),

    #[error("Frame size error: {0}")]
    FrameSize(String),

    #[error("Compression error: {0}")]
    CompressionError(String),

    #[error("GIF encoding error: {0}")]
    Gif(#[from] gif::EncodingError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
