//! Pixel frame buffer
//!
//! Manages the 2D grid of RGB pixels that make up the visible terminal image

use crate::TerminalError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared euclidean distance in RGB space
    pub fn distance_sq(self, other: Color) -> u32 {
        let dr = i32::from(self.r) - i32::from(other.r);
        let dg = i32::from(self.g) - i32::from(other.g);
        let db = i32::from(self.b) - i32::from(other.b);
        (dr * dr + dg * dg + db * db) as u32
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Self::rgb(rgb[0], rgb[1], rgb[2])
    }
}

impl FromStr for Color {
    type Err = TerminalError;

    /// Parse `#rrggbb` (the leading `#` is optional)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(TerminalError::InvalidColor(s.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| TerminalError::InvalidColor(s.to_string()))
        };

        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = TerminalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Frame buffer containing the terminal image
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    /// Width in pixels
    width: u32,

    /// Height in pixels
    height: u32,

    /// Pixels in row-major order
    pixels: Vec<Color>,
}

impl FrameBuffer {
    /// Create a new frame buffer filled with `fill`
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Get pixel at position
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Set pixel at position, ignoring coordinates outside the buffer
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Fill the whole buffer
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Fill a rectangle, clipped to the buffer
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        if x >= x_end || y >= y_end {
            return;
        }

        for row in y..y_end {
            let start = self.index(x, row);
            let end = self.index(x_end, row);
            self.pixels[start..end].fill(color);
        }
    }

    /// Scroll the band of rows `[0, band_height)` up by `n` pixel rows,
    /// filling the uncovered rows at the bottom of the band with `fill`
    pub fn scroll_up(&mut self, band_height: u32, n: u32, fill: Color) {
        let band_height = band_height.min(self.height);
        if n == 0 {
            return;
        }
        if n >= band_height {
            self.fill_rect(0, 0, self.width, band_height, fill);
            return;
        }

        let row_len = self.width as usize;
        let band = (band_height as usize) * row_len;
        let shift = (n as usize) * row_len;
        self.pixels[..band].rotate_left(shift);

        let clear_start = band - shift;
        self.pixels[clear_start..band].fill(fill);
    }

    /// Get all pixels
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Flatten to packed RGB bytes
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&pixel.to_array());
        }
        bytes
    }
}
