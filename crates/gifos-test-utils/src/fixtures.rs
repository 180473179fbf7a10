use anyhow::Result;
use image::{ImageFormat, Rgb, RgbImage};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestFixtures {
    temp_dir: TempDir,
}

impl TestFixtures {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn create_test_file(&self, name: &str, content: &[u8]) -> Result<PathBuf> {
        let file_path = self.temp_dir.path().join(name);
        std::fs::write(&file_path, content)?;
        Ok(file_path)
    }

    /// Write a PNG to the fixture directory
    pub fn create_test_png(&self, name: &str, image: &RgbImage) -> Result<PathBuf> {
        let file_path = self.temp_dir.path().join(name);
        image.save_with_format(&file_path, ImageFormat::Png)?;
        Ok(file_path)
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

// Common test data
pub mod data {
    use super::*;

    pub fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(rgb))
    }

    /// Horizontal red gradient with a blue stripe every 8th row
    pub fn striped_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let red = ((x * 255) / width.max(1)) as u8;
            if y % 8 == 0 {
                Rgb([red, 0, 255])
            } else {
                Rgb([red, 40, 40])
            }
        })
    }

    pub fn png_bytes(image: &RgbImage) -> Vec<u8> {
        let mut bytes = std::io::Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, ImageFormat::Png)
            .expect("PNG encoding of a test image");
        bytes.into_inner()
    }
}
