//! Fixed-width bitmap glyphs
//!
//! Glyphs come from the 8x8 font8x8 tables (basic ASCII, Latin-1, box
//! drawing and block elements). Characters outside those tables render as
//! `?`. Each glyph is scaled by an integer factor and centered vertically in a
//! cell that is one glyph row taller at the top and at the bottom.

use font8x8::{UnicodeFonts, BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, LATIN_FONTS};

/// Glyph width and height in font pixels
pub const GLYPH_SIZE: u32 = 8;

/// Blank font rows above and below each glyph inside a cell
const LINE_PADDING: u32 = 1;

const FALLBACK: char = '?';

/// An 8x8 bitmap, one byte per row, bit 0 is the leftmost pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    rows: [u8; 8],
}

impl Glyph {
    pub const fn new(rows: [u8; 8]) -> Self {
        Self { rows }
    }

    /// Whether the font pixel at (x, y) is set
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x >= GLYPH_SIZE || y >= GLYPH_SIZE {
            return false;
        }
        (self.rows[y as usize] >> x) & 1 == 1
    }

    /// Whether the glyph has no pixels at all (e.g. space)
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(|&row| row == 0)
    }
}

/// Immutable lookup table from characters to glyphs
#[derive(Debug, Clone)]
pub struct GlyphAtlas {
    /// Integer scale factor applied to every font pixel
    scale: u32,

    /// Pre-resolved printable ASCII range
    ascii: [Glyph; 128],

    fallback: Glyph,
}

impl Default for GlyphAtlas {
    fn default() -> Self {
        Self::new(1)
    }
}

impl GlyphAtlas {
    /// Create an atlas with the given scale (minimum 1)
    pub fn new(scale: u32) -> Self {
        let fallback = BASIC_FONTS
            .get(FALLBACK)
            .map(Glyph::new)
            .unwrap_or(Glyph::new([0; 8]));

        let mut ascii = [fallback; 128];
        for (code, slot) in ascii.iter_mut().enumerate() {
            if let Some(rows) = BASIC_FONTS.get(char::from(code as u8)) {
                *slot = Glyph::new(rows);
            }
        }

        Self {
            scale: scale.max(1),
            ascii,
            fallback,
        }
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Cell width in screen pixels
    pub fn cell_width(&self) -> u32 {
        GLYPH_SIZE * self.scale
    }

    /// Cell height in screen pixels
    pub fn cell_height(&self) -> u32 {
        (GLYPH_SIZE + 2 * LINE_PADDING) * self.scale
    }

    /// Vertical offset of the glyph inside its cell, in screen pixels
    pub fn baseline_offset(&self) -> u32 {
        LINE_PADDING * self.scale
    }

    /// Look up the glyph for `c`, falling back to `?`
    pub fn glyph(&self, c: char) -> Glyph {
        if c.is_ascii() {
            return self.ascii[c as usize];
        }

        LATIN_FONTS
            .get(c)
            .or_else(|| BOX_FONTS.get(c))
            .or_else(|| BLOCK_FONTS.get(c))
            .map(Glyph::new)
            .unwrap_or(self.fallback)
    }

    /// Whether the character has its own glyph
    pub fn contains(&self, c: char) -> bool {
        if c.is_ascii() {
            return BASIC_FONTS.get(c).is_some();
        }
        LATIN_FONTS.get(c).is_some() || BOX_FONTS.get(c).is_some() || BLOCK_FONTS.get(c).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_metrics_scale() {
        let atlas = GlyphAtlas::new(2);
        assert_eq!(atlas.cell_width(), 16);
        assert_eq!(atlas.cell_height(), 20);
        assert_eq!(atlas.baseline_offset(), 2);

        // Scale is never zero
        assert_eq!(GlyphAtlas::new(0).cell_width(), 8);
    }

    #[test]
    fn test_space_is_blank() {
        let atlas = GlyphAtlas::default();
        assert!(atlas.glyph(' ').is_blank());
        assert!(!atlas.glyph('A').is_blank());
    }

    #[test]
    fn test_unknown_char_falls_back() {
        let atlas = GlyphAtlas::default();
        assert!(!atlas.contains('日'));
        assert_eq!(atlas.glyph('日'), atlas.glyph('?'));
    }

    #[test]
    fn test_box_drawing_supported() {
        let atlas = GlyphAtlas::default();
        assert!(atlas.contains('─'));
        assert_ne!(atlas.glyph('─'), atlas.glyph('?'));
    }
}
