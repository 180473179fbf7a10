//! In-memory snapshot compression
//!
//! A boot sequence easily records hundreds of full-screen snapshots, so each
//! one is kept compressed until the encoder needs it. Supports Zstd, LZ4 or
//! no compression at all.

use crate::AnimError;
use serde::Deserialize;
use std::io::{Read, Write};

/// Compression algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum CompressionAlgorithm {
    /// Store raw RGB bytes
    #[cfg_attr(feature = "clap", value(name = "none"))]
    None,
    /// LZ4 compression (faster, lower ratio)
    #[default]
    #[cfg_attr(feature = "clap", value(name = "lz4"))]
    Lz4,
    /// Zstandard compression (better ratio, slightly slower)
    #[cfg_attr(feature = "clap", value(name = "zstd"))]
    Zstd,
}

/// Compressor wrapper supporting multiple algorithms
#[derive(Debug, Clone, Copy)]
pub struct Compressor {
    algorithm: CompressionAlgorithm,
    compression_level: i32,
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(CompressionAlgorithm::default())
    }
}

impl Compressor {
    /// Create a new compressor with specified algorithm
    pub fn new(algorithm: CompressionAlgorithm) -> Self {
        Self {
            algorithm,
            compression_level: match algorithm {
                CompressionAlgorithm::Zstd => 3, // Default zstd level
                _ => 0,
            },
        }
    }

    pub fn algorithm(&self) -> CompressionAlgorithm {
        self.algorithm
    }

    /// Compress data
    pub fn compress(&self, data: &[u8]) -> Result<Vec<u8>, AnimError> {
        match self.algorithm {
            CompressionAlgorithm::None => Ok(data.to_vec()),
            CompressionAlgorithm::Lz4 => Ok(lz4_flex::compress_prepend_size(data)),
            CompressionAlgorithm::Zstd => self.compress_zstd(data),
        }
    }

    /// Decompress data
    pub fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, AnimError> {
        match self.algorithm {
            CompressionAlgorithm::None => Ok(data.to_vec()),
            CompressionAlgorithm::Lz4 => lz4_flex::decompress_size_prepended(data).map_err(|e| {
                AnimError::CompressionError(format!("LZ4 decompression failed: {e}"))
            }),
            CompressionAlgorithm::Zstd => self.decompress_zstd(data),
        }
    }

    fn compress_zstd(&self, data: &[u8]) -> Result<Vec<u8>, AnimError> {
        let mut encoder = zstd::Encoder::new(Vec::new(), self.compression_level).map_err(|e| {
            AnimError::CompressionError(format!("Failed to create zstd encoder: {e}"))
        })?;

        encoder.write_all(data).map_err(|e| {
            AnimError::CompressionError(format!("Failed to write to zstd encoder: {e}"))
        })?;

        encoder.finish().map_err(|e| {
            AnimError::CompressionError(format!("Failed to finish zstd encoding: {e}"))
        })
    }

    fn decompress_zstd(&self, data: &[u8]) -> Result<Vec<u8>, AnimError> {
        let mut decoder = zstd::Decoder::new(data).map_err(|e| {
            AnimError::CompressionError(format!("Failed to create zstd decoder: {e}"))
        })?;

        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed).map_err(|e| {
            AnimError::CompressionError(format!("Failed to decompress zstd data: {e}"))
        })?;

        Ok(decompressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen_like_data() -> Vec<u8> {
        // Mostly background with a few "glyph" runs
        let mut data = vec![17u8; 3 * 830 * 20];
        for i in (0..data.len()).step_by(97) {
            data[i] = 204;
        }
        data
    }

    #[test]
    fn test_zstd_compression() {
        let compressor = Compressor::new(CompressionAlgorithm::Zstd);
        let data = screen_like_data();

        let compressed = compressor.compress(&data).unwrap();
        assert!(compressed.len() < data.len());

        let decompressed = compressor.decompress(&compressed).unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn test_lz4_compression() {
        let compressor = Compressor::new(CompressionAlgorithm::Lz4);
        let data = screen_like_data();

        let compressed = compressor.compress(&data).unwrap();
        assert!(compressed.len() < data.len());

        let decompressed = compressor.decompress(&compressed).unwrap();
        assert_eq!(decompressed, data);
    }

    #[test]
    fn test_none_is_identity() {
        let compressor = Compressor::new(CompressionAlgorithm::None);
        let data = b"raw pixels".to_vec();
        assert_eq!(compressor.compress(&data).unwrap(), data);
    }

    #[test]
    fn test_corrupt_lz4_is_an_error() {
        let compressor = Compressor::new(CompressionAlgorithm::Lz4);
        // Claims 1 MiB of output but carries no payload
        let corrupted = [0x00, 0x00, 0x10, 0x00, 0xff];
        assert!(matches!(
            compressor.decompress(&corrupted),
            Err(AnimError::CompressionError(_))
        ));
    }
}
