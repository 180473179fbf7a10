//! Image assets
//!
//! Decoding and resizing happen here, before images reach the compositor,
//! which only ever copies pixels.

use std::path::Path;

use gifos_terminal::Rect;
use image::{imageops::FilterType, ImageFormat, RgbImage};
use tracing::debug;

use crate::RenderError;

/// Decode PNG bytes, falling back to any other format the decoder recognizes
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, RenderError> {
    let image = match image::load_from_memory_with_format(bytes, ImageFormat::Png) {
        Ok(image) => image,
        Err(png_err) => {
            debug!("Not a PNG ({png_err}), guessing format");
            image::load_from_memory(bytes)?
        }
    };
    Ok(image.to_rgb8())
}

/// Read and decode an image file
pub fn load_image(path: &Path) -> Result<RgbImage, RenderError> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}

/// Resize to `width` pixels wide, keeping the aspect ratio
pub fn fit_width(image: &RgbImage, width: u32) -> RgbImage {
    let width = width.max(1);
    if image.width() == 0 || image.height() == 0 {
        return RgbImage::new(width, 1);
    }

    let ratio = f64::from(image.width()) / f64::from(image.height());
    let height = ((f64::from(width) / ratio) as u32).max(1);
    image::imageops::resize(image, width, height, FilterType::Lanczos3)
}

/// Corner of the screen an image is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Destination rect for `image` placed `margin` pixels away from a corner
pub fn place(corner: Corner, margin: u32, screen: (u32, u32), image: &RgbImage) -> Rect {
    let (screen_width, screen_height) = (i64::from(screen.0), i64::from(screen.1));
    let (width, height) = (i64::from(image.width()), i64::from(image.height()));
    let margin = i64::from(margin);

    let x = match corner {
        Corner::TopLeft | Corner::BottomLeft => margin,
        Corner::TopRight | Corner::BottomRight => screen_width - width - margin,
    };
    let y = match corner {
        Corner::TopLeft | Corner::TopRight => margin,
        Corner::BottomLeft | Corner::BottomRight => screen_height - height - margin,
    };

    Rect::new(x, y, image.width(), image.height())
}
