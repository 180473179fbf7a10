//! Image compositing
//!
//! Blits pre-decoded, pre-sized RGB images onto the frame buffer. No
//! resampling happens here; the image is copied pixel for pixel.

use crate::framebuffer::{Color, FrameBuffer};
use image::RgbImage;

/// Destination rectangle in framebuffer pixels. The origin may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanning `[x0, x1) × [y0, y1)`; inverted corners give an empty rect
    pub fn from_corners(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1.saturating_sub(x0).clamp(0, i64::from(u32::MAX)) as u32,
            height: y1.saturating_sub(y0).clamp(0, i64::from(u32::MAX)) as u32,
        }
    }

    pub fn right(&self) -> i64 {
        self.x.saturating_add(i64::from(self.width))
    }

    pub fn bottom(&self) -> i64 {
        self.y.saturating_add(i64::from(self.height))
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Intersection with another rectangle, if any area remains
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        let rect = Rect::from_corners(x0, y0, x1, y1);
        (!rect.is_empty()).then_some(rect)
    }
}

/// Copy `image` into `rect` of the frame buffer.
///
/// The image is anchored at the rect origin; only the overlap of the image,
/// the rect and the buffer is written. Returns `false` when nothing was drawn.
pub fn draw_image(fb: &mut FrameBuffer, rect: Rect, image: &RgbImage) -> bool {
    let bounds = Rect::new(0, 0, fb.width(), fb.height());
    let image_area = Rect::new(rect.x, rect.y, image.width(), image.height());

    let Some(target) = rect
        .intersect(&bounds)
        .and_then(|clipped| clipped.intersect(&image_area))
    else {
        return false;
    };

    for y in target.y..target.bottom() {
        for x in target.x..target.right() {
            // All coordinates are inside both the buffer and the image here
            let src = image.get_pixel((x - rect.x) as u32, (y - rect.y) as u32);
            fb.set_pixel(x as u32, y as u32, Color::from(src.0));
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    const RED: Color = Color::rgb(255, 0, 0);

    fn red_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([255, 0, 0]))
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, -5, 10, 10);
        assert_eq!(a.intersect(&b), Some(Rect::new(5, 0, 5, 5)));
        assert_eq!(a.intersect(&Rect::new(10, 0, 5, 5)), None);
    }

    #[test]
    fn test_extreme_coordinates_saturate() {
        let far = Rect::new(i64::MAX - 1, i64::MAX, 4, 4);
        assert_eq!(far.right(), i64::MAX);
        assert_eq!(far.bottom(), i64::MAX);
        assert!(Rect::from_corners(i64::MAX, 0, i64::MIN, 1).is_empty());
        assert_eq!(Rect::from_corners(i64::MIN, 0, i64::MAX, 1).width, u32::MAX);
    }

    #[test]
    fn test_partial_overlap_is_clipped() {
        let mut fb = FrameBuffer::new(4, 4, Color::BLACK);
        let drawn = draw_image(&mut fb, Rect::new(-1, 2, 3, 3), &red_image(3, 3));

        assert!(drawn);
        assert_eq!(fb.pixel(0, 2), Some(RED));
        assert_eq!(fb.pixel(1, 3), Some(RED));
        assert_eq!(fb.pixel(2, 2), Some(Color::BLACK));
        assert_eq!(fb.pixel(0, 1), Some(Color::BLACK));
    }

    #[test]
    fn test_rect_larger_than_image_copies_image_only() {
        let mut fb = FrameBuffer::new(4, 4, Color::BLACK);
        draw_image(&mut fb, Rect::new(0, 0, 4, 4), &red_image(2, 1));

        let red = fb.pixels().iter().filter(|&&p| p == RED).count();
        assert_eq!(red, 2);
    }

    #[test]
    fn test_fully_outside_is_noop() {
        let mut fb = FrameBuffer::new(4, 4, Color::BLACK);
        let before = fb.clone();

        assert!(!draw_image(&mut fb, Rect::new(10, 10, 2, 2), &red_image(2, 2)));
        assert!(!draw_image(&mut fb, Rect::new(-3, 0, 3, 3), &red_image(3, 3)));
        assert!(!draw_image(&mut fb, Rect::new(i64::MAX - 1, 0, 4, 4), &red_image(4, 4)));
        assert!(!draw_image(&mut fb, Rect::new(0, i64::MAX, 4, 4), &red_image(4, 4)));
        assert!(!draw_image(&mut fb, Rect::new(i64::MIN, i64::MIN, 4, 4), &red_image(4, 4)));
        assert_eq!(fb, before);
    }
}
