//! Global color palette
//!
//! Built from a frequency histogram of every recorded frame. When the union
//! of colors fits the GIF limit the palette is exact. Otherwise the most
//! frequent colors (terminal background and text) are kept verbatim and the
//! rest of the histogram is reduced with a frequency-weighted median cut.
//! Colors that are not in the palette map to their nearest entry.

use gifos_terminal::Color;
use std::collections::HashMap;

/// Maximum palette entries in a GIF color table
pub const MAX_COLORS: usize = 256;

/// Colors covering at least 1/ANCHOR_SHARE of all pixels are kept exactly
const ANCHOR_SHARE: u64 = 100;

/// Upper bound on exactly-kept colors when quantizing
const MAX_ANCHORS: usize = 16;

/// Pixel counts per color
#[derive(Debug, Default, Clone)]
pub struct Histogram {
    counts: HashMap<Color, u64>,
    total: u64,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every pixel of a packed RGB buffer
    pub fn add_rgb(&mut self, rgb: &[u8]) {
        for px in rgb.chunks_exact(3) {
            *self.counts.entry(Color::rgb(px[0], px[1], px[2])).or_insert(0) += 1;
        }
        self.total += (rgb.len() / 3) as u64;
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Entries by descending count, ties broken by color value
    fn sorted(&self) -> Vec<(Color, u64)> {
        let mut entries: Vec<(Color, u64)> = self.counts.iter().map(|(&c, &n)| (c, n)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries
    }
}

/// An indexed color table
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Color>,
    exact: HashMap<Color, u8>,
    lossless: bool,
}

impl Palette {
    /// Build a palette of at most `max_colors` (clamped to `[1, 256]`) entries
    pub fn from_histogram(histogram: &Histogram, max_colors: usize) -> Self {
        let max_colors = max_colors.clamp(1, MAX_COLORS);
        let entries = histogram.sorted();

        if entries.len() <= max_colors {
            let colors: Vec<Color> = entries.iter().map(|&(c, _)| c).collect();
            return Self::from_colors(colors, true);
        }

        let anchor_limit = MAX_ANCHORS.min(max_colors - 1);
        let threshold = (histogram.total() / ANCHOR_SHARE).max(1);
        let anchors = entries
            .iter()
            .take(anchor_limit)
            .take_while(|&&(_, n)| n >= threshold)
            .count();

        let mut colors: Vec<Color> = entries[..anchors].iter().map(|&(c, _)| c).collect();
        colors.extend(median_cut(&entries[anchors..], max_colors - anchors));
        Self::from_colors(colors, false)
    }

    fn from_colors(colors: Vec<Color>, lossless: bool) -> Self {
        let mut exact = HashMap::with_capacity(colors.len());
        for (i, &color) in colors.iter().enumerate() {
            exact.entry(color).or_insert(i as u8);
        }
        Self {
            colors,
            exact,
            lossless,
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Whether every histogram color has its own entry
    pub fn is_lossless(&self) -> bool {
        self.lossless
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn color(&self, index: u8) -> Option<Color> {
        self.colors.get(usize::from(index)).copied()
    }

    /// Packed RGB color table
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| c.to_array()).collect()
    }

    /// Nearest entry by squared RGB distance; lowest index wins ties
    pub fn nearest(&self, color: Color) -> u8 {
        if let Some(&index) = self.exact.get(&color) {
            return index;
        }

        let mut best = 0usize;
        let mut best_distance = u32::MAX;
        for (i, &candidate) in self.colors.iter().enumerate() {
            let distance = candidate.distance_sq(color);
            if distance < best_distance {
                best = i;
                best_distance = distance;
            }
        }
        best as u8
    }

    /// Mapper with a memo for colors outside the palette
    pub fn indexer(&self) -> Indexer<'_> {
        Indexer {
            palette: self,
            memo: HashMap::new(),
        }
    }
}

/// Maps colors to palette indices, remembering nearest-color lookups
#[derive(Debug)]
pub struct Indexer<'a> {
    palette: &'a Palette,
    memo: HashMap<Color, u8>,
}

impl Indexer<'_> {
    pub fn index(&mut self, color: Color) -> u8 {
        if let Some(&index) = self.palette.exact.get(&color) {
            return index;
        }
        let palette = self.palette;
        *self
            .memo
            .entry(color)
            .or_insert_with(|| palette.nearest(color))
    }

    /// Index a packed RGB buffer
    pub fn index_rgb(&mut self, rgb: &[u8]) -> Vec<u8> {
        rgb.chunks_exact(3)
            .map(|px| self.index(Color::rgb(px[0], px[1], px[2])))
            .collect()
    }
}

fn channel(color: Color, axis: usize) -> u8 {
    match axis {
        0 => color.r,
        1 => color.g,
        _ => color.b,
    }
}

/// Widest channel of a box and its range
fn widest_axis(entries: &[(Color, u64)]) -> (usize, u8) {
    (0..3)
        .map(|axis| {
            let (lo, hi) = entries.iter().fold((u8::MAX, u8::MIN), |(lo, hi), &(c, _)| {
                let v = channel(c, axis);
                (lo.min(v), hi.max(v))
            });
            (axis, hi.saturating_sub(lo))
        })
        .fold((0, 0), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        })
}

/// Frequency-weighted mean color of a box
fn weighted_mean(entries: &[(Color, u64)]) -> Color {
    let total: u64 = entries.iter().map(|&(_, n)| n).sum::<u64>().max(1);
    let sum = |axis: usize| -> u8 {
        let s: u64 = entries
            .iter()
            .map(|&(c, n)| u64::from(channel(c, axis)) * n)
            .sum();
        ((s + total / 2) / total) as u8
    };
    Color::rgb(sum(0), sum(1), sum(2))
}

/// Reduce `entries` to at most `slots` colors
fn median_cut(entries: &[(Color, u64)], slots: usize) -> Vec<Color> {
    if entries.is_empty() || slots == 0 {
        return Vec::new();
    }

    let mut boxes: Vec<Vec<(Color, u64)>> = vec![entries.to_vec()];

    while boxes.len() < slots {
        // Split the box with the widest channel range, heaviest box on ties
        let candidate = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.len() > 1)
            .map(|(i, b)| {
                let (axis, range) = widest_axis(b);
                let weight: u64 = b.iter().map(|&(_, n)| n).sum();
                (i, axis, range, weight)
            })
            .max_by(|a, b| a.2.cmp(&b.2).then(a.3.cmp(&b.3)).then(b.0.cmp(&a.0)));

        let Some((index, axis, _, weight)) = candidate else {
            break;
        };

        let mut entries = boxes.swap_remove(index);
        entries.sort_by(|a, b| channel(a.0, axis).cmp(&channel(b.0, axis)).then(a.0.cmp(&b.0)));

        let half = weight.div_ceil(2);
        let mut acc = 0u64;
        let mut split = entries.len() / 2;
        for (i, &(_, n)) in entries.iter().enumerate() {
            acc += n;
            if acc >= half {
                split = i + 1;
                break;
            }
        }
        let split = split.clamp(1, entries.len() - 1);

        let upper = entries.split_off(split);
        boxes.push(entries);
        boxes.push(upper);
    }

    boxes.iter().map(|b| weighted_mean(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_of(colors: &[(Color, usize)]) -> Vec<u8> {
        colors
            .iter()
            .flat_map(|&(c, n)| std::iter::repeat(c.to_array()).take(n).flatten())
            .collect()
    }

    #[test]
    fn test_small_histogram_is_exact() {
        let mut histogram = Histogram::new();
        histogram.add_rgb(&rgb_of(&[
            (Color::BLACK, 10),
            (Color::WHITE, 3),
            (Color::rgb(1, 2, 3), 5),
        ]));

        let palette = Palette::from_histogram(&histogram, MAX_COLORS);
        assert!(palette.is_lossless());
        assert_eq!(
            palette.colors(),
            &[Color::BLACK, Color::rgb(1, 2, 3), Color::WHITE]
        );
        assert_eq!(palette.nearest(Color::WHITE), 2);
    }

    #[test]
    fn test_overflow_keeps_dominant_colors_exact() {
        let background = Color::rgb(0x11, 0x11, 0x11);
        let foreground = Color::rgb(0xcc, 0xcc, 0xcc);

        let mut histogram = Histogram::new();
        histogram.add_rgb(&rgb_of(&[(background, 50_000), (foreground, 5_000)]));
        // A gradient with far more colors than the palette holds
        let gradient: Vec<u8> = (0..4096u32)
            .flat_map(|i| [(i % 256) as u8, (i / 16) as u8, 128])
            .collect();
        histogram.add_rgb(&gradient);

        let palette = Palette::from_histogram(&histogram, MAX_COLORS);
        assert!(!palette.is_lossless());
        assert!(palette.len() <= MAX_COLORS);
        assert_eq!(palette.color(palette.nearest(background)), Some(background));
        assert_eq!(palette.color(palette.nearest(foreground)), Some(foreground));
    }

    #[test]
    fn test_palette_is_deterministic() {
        let gradient: Vec<u8> = (0..3000u32)
            .flat_map(|i| [(i * 7 % 256) as u8, (i * 13 % 256) as u8, (i % 256) as u8])
            .collect();

        let build = || {
            let mut histogram = Histogram::new();
            histogram.add_rgb(&gradient);
            Palette::from_histogram(&histogram, 64).to_rgb_bytes()
        };
        assert_eq!(build(), build());
        assert!(build().len() <= 64 * 3);
    }

    #[test]
    fn test_indexer_uses_nearest_for_unknown() {
        let palette = Palette::from_colors(vec![Color::BLACK, Color::WHITE], true);
        let mut indexer = palette.indexer();

        assert_eq!(indexer.index(Color::rgb(10, 10, 10)), 0);
        assert_eq!(indexer.index(Color::rgb(240, 250, 245)), 1);
        assert_eq!(indexer.index_rgb(&[0, 0, 0, 255, 255, 255]), vec![0, 1]);
    }

    #[test]
    fn test_single_slot_palette() {
        let mut histogram = Histogram::new();
        histogram.add_rgb(&rgb_of(&[(Color::BLACK, 2), (Color::WHITE, 2)]));
        let palette = Palette::from_histogram(&histogram, 1);
        assert_eq!(palette.len(), 1);
    }
}
