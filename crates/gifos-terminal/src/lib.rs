//! Virtual terminal for GifOS
//!
//! Provides a pixel framebuffer driven by a character-cell cursor, with
//! bitmap glyphs, themes and image compositing. Snapshots of the screen are
//! handed to the animation crate for recording and encoding.

pub mod compositor;
pub mod framebuffer;
pub mod glyph;
pub mod screen;
pub mod theme;

pub use compositor::Rect;
pub use framebuffer::{Color, FrameBuffer};
pub use glyph::{Glyph, GlyphAtlas};
pub use screen::{Cursor, CursorTarget, Screen};
pub use theme::Theme;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerminalError {
    #[error("Terminal size error: {0}")]
    SizeError(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}
