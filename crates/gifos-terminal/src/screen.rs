//! Cursor and text layout
//!
//! A `Screen` owns the pixel frame buffer and a character-cell cursor on top
//! of it. Text is rasterized cell by cell; scrolling, wrapping and clearing
//! operate on whole cell rows.

use std::sync::Arc;

use image::RgbImage;
use tracing::debug;

use crate::{
    compositor::{self, Rect},
    framebuffer::FrameBuffer,
    glyph::GlyphAtlas,
    theme::Theme,
    TerminalError,
};

const TAB_WIDTH: u32 = 8;

/// Cursor state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: u32,

    /// Column in `[0, cols]`; `cols` means the next printable wraps first
    pub column: u32,

    pub visible: bool,

    pub highlighted: bool,
}

/// Explicit cursor destinations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorTarget {
    /// Start of the current row
    Home,
    /// Start of the last row
    LastRow,
    /// Start of row `n`, clamped to the last row
    Row(u32),
}

/// Terminal screen
#[derive(Debug, Clone)]
pub struct Screen {
    framebuffer: FrameBuffer,
    atlas: Arc<GlyphAtlas>,
    theme: Arc<Theme>,
    cursor: Cursor,
    cols: u32,
    rows: u32,
}

impl Screen {
    /// Create a screen of `width × height` pixels
    pub fn new(
        width: u32,
        height: u32,
        theme: Arc<Theme>,
        atlas: Arc<GlyphAtlas>,
    ) -> Result<Self, TerminalError> {
        let cols = width / atlas.cell_width();
        let rows = height / atlas.cell_height();
        if cols == 0 || rows == 0 {
            return Err(TerminalError::SizeError(format!(
                "{width}x{height} pixels cannot hold a single {}x{} cell",
                atlas.cell_width(),
                atlas.cell_height()
            )));
        }

        debug!("Screen {width}x{height} px, {cols}x{rows} cells");

        Ok(Self {
            framebuffer: FrameBuffer::new(width, height, theme.background),
            atlas,
            theme,
            cursor: Cursor::default(),
            cols,
            rows,
        })
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn width(&self) -> u32 {
        self.framebuffer.width()
    }

    pub fn height(&self) -> u32 {
        self.framebuffer.height()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn atlas(&self) -> &GlyphAtlas {
        &self.atlas
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Write text at the cursor
    pub fn write(&mut self, text: &str) {
        for c in text.chars() {
            self.write_char(c);
        }
    }

    /// Write a single character at the cursor
    pub fn write_char(&mut self, c: char) {
        match c {
            '\n' => self.newline(),
            '\r' => self.cursor.column = 0,
            '\t' => {
                let next_stop = (self.cursor.column / TAB_WIDTH + 1) * TAB_WIDTH;
                let spaces = next_stop.min(self.cols) - self.cursor.column.min(self.cols);
                for _ in 0..spaces.max(1) {
                    self.write_char(' ');
                }
            }
            c if c.is_control() => {}
            c => {
                if self.cursor.column >= self.cols {
                    self.newline();
                }
                self.draw_glyph(c, self.cursor.row, self.cursor.column);
                self.cursor.column += 1;
            }
        }
    }

    /// Move cursor to the start of the next row, scrolling on the last row
    fn newline(&mut self) {
        self.cursor.column = 0;
        if self.cursor.row + 1 >= self.rows {
            self.scroll_up();
        } else {
            self.cursor.row += 1;
        }
    }

    /// Scroll text area up by one cell row
    fn scroll_up(&mut self) {
        let cell_height = self.atlas.cell_height();
        self.framebuffer
            .scroll_up(self.rows * cell_height, cell_height, self.theme.background);
    }

    fn draw_glyph(&mut self, c: char, row: u32, column: u32) {
        let cell_width = self.atlas.cell_width();
        let cell_height = self.atlas.cell_height();
        let x0 = column * cell_width;
        let y0 = row * cell_height;

        self.framebuffer
            .fill_rect(x0, y0, cell_width, cell_height, self.theme.background);

        let glyph = self.atlas.glyph(c);
        if glyph.is_blank() {
            return;
        }

        let color = if self.cursor.highlighted {
            self.theme.highlight
        } else {
            self.theme.foreground
        };
        let scale = self.atlas.scale();
        let top = y0 + self.atlas.baseline_offset();

        for gy in 0..crate::glyph::GLYPH_SIZE {
            for gx in 0..crate::glyph::GLYPH_SIZE {
                if glyph.is_set(gx, gy) {
                    self.framebuffer
                        .fill_rect(x0 + gx * scale, top + gy * scale, scale, scale, color);
                }
            }
        }
    }

    /// Move the cursor to an explicit target
    pub fn move_cursor(&mut self, target: CursorTarget) {
        match target {
            CursorTarget::Home => self.cursor.column = 0,
            CursorTarget::LastRow => {
                self.cursor.row = self.rows - 1;
                self.cursor.column = 0;
            }
            CursorTarget::Row(row) => {
                if row >= self.rows {
                    debug!("Cursor row {row} outside [0, {}), clamping", self.rows);
                }
                self.cursor.row = row.min(self.rows - 1);
                self.cursor.column = 0;
            }
        }
    }

    /// Blank the current cell row; the cursor does not move
    pub fn clear_line(&mut self) {
        let cell_height = self.atlas.cell_height();
        self.framebuffer.fill_rect(
            0,
            self.cursor.row * cell_height,
            self.framebuffer.width(),
            cell_height,
            self.theme.background,
        );
    }

    /// Blank the whole screen and home the cursor to (0, 0)
    pub fn clear_screen(&mut self) {
        self.framebuffer.fill(self.theme.background);
        self.cursor.row = 0;
        self.cursor.column = 0;
    }

    /// Toggle highlighting for subsequent writes
    pub fn set_highlight(&mut self, highlighted: bool) {
        self.cursor.highlighted = highlighted;
    }

    /// Toggle the cursor block in snapshots
    pub fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor.visible = visible;
    }

    /// Composite an image; a rect fully outside the screen is ignored
    pub fn draw_image(&mut self, rect: Rect, image: &RgbImage) {
        if !compositor::draw_image(&mut self.framebuffer, rect, image) {
            debug!("Image rect {rect:?} does not overlap the screen, skipping");
        }
    }

    /// Pixel rectangle of the cursor cell; a pending wrap shows on the last column
    fn cursor_cell(&self) -> (u32, u32, u32, u32) {
        let column = self.cursor.column.min(self.cols - 1);
        let cell_width = self.atlas.cell_width();
        let cell_height = self.atlas.cell_height();
        (
            column * cell_width,
            self.cursor.row * cell_height,
            cell_width,
            cell_height,
        )
    }

    /// Packed RGB snapshot of the screen, with the cursor block when visible
    pub fn snapshot(&self) -> Vec<u8> {
        let mut bytes = self.framebuffer.to_rgb_bytes();
        if !self.cursor.visible {
            return bytes;
        }

        let (x0, y0, width, height) = self.cursor_cell();
        let stride = self.framebuffer.width() as usize;
        let background = self.theme.background;
        let foreground = self.theme.foreground;

        for y in y0..y0 + height {
            for x in x0..x0 + width {
                let Some(pixel) = self.framebuffer.pixel(x, y) else {
                    continue;
                };
                let inverse = if pixel == background {
                    foreground
                } else {
                    background
                };
                let offset = ((y as usize) * stride + x as usize) * 3;
                bytes[offset..offset + 3].copy_from_slice(&inverse.to_array());
            }
        }

        bytes
    }

    /// Text drawn in a cell, recognized by comparing its pixels against the
    /// rendering of every atlas glyph in the foreground or highlight color.
    pub fn cell_char(&self, row: u32, column: u32) -> Option<char> {
        if row >= self.rows || column >= self.cols {
            return None;
        }

        let ink_colors = [self.theme.foreground, self.theme.highlight];
        let x0 = column * self.atlas.cell_width();
        let y0 = row * self.atlas.cell_height() + self.atlas.baseline_offset();
        let scale = self.atlas.scale();

        (' '..='~').find(|&c| {
            let glyph = self.atlas.glyph(c);
            (0..crate::glyph::GLYPH_SIZE).all(|gy| {
                (0..crate::glyph::GLYPH_SIZE).all(|gx| {
                    let pixel = self.framebuffer.pixel(x0 + gx * scale, y0 + gy * scale);
                    let lit = pixel.is_some_and(|p| ink_colors.contains(&p));
                    lit == glyph.is_set(gx, gy)
                })
            })
        })
    }

    /// Text of a whole row, trailing blanks trimmed
    pub fn row_text(&self, row: u32) -> String {
        let text: String = (0..self.cols)
            .map(|column| self.cell_char(row, column).unwrap_or('\u{fffd}'))
            .collect();
        text.trim_end().to_string()
    }

    /// Whether every pixel has the background color
    pub fn is_blank(&self) -> bool {
        let background = self.theme.background;
        self.framebuffer.pixels().iter().all(|&p| p == background)
    }
}
