//! Frame differencing
//!
//! Each frame after the first is stored as the bounding rectangle of the
//! palette indices that changed since the previous frame. Disposal is "keep",
//! so applying the patch over the previous canvas reproduces the full frame.

/// A rectangular patch of palette indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameDelta {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,

    /// Indices in row-major order, `width * height` long
    pub indices: Vec<u8>,
}

impl FrameDelta {
    /// Patch covering the whole frame
    pub fn full(current: &[u8], width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            width,
            height,
            indices: current.to_vec(),
        }
    }

    /// Generate the patch turning `previous` into `current`.
    ///
    /// Without a previous frame the patch is the full frame. An unchanged
    /// frame yields a 1x1 patch that rewrites the top-left pixel, so the frame
    /// still exists in the container and carries its delay.
    pub fn generate(previous: Option<&[u8]>, current: &[u8], width: u32, height: u32) -> Self {
        let Some(previous) = previous.filter(|p| p.len() == current.len()) else {
            return Self::full(current, width, height);
        };

        let stride = width as usize;
        let mut min_x = usize::MAX;
        let mut min_y = usize::MAX;
        let mut max_x = 0usize;
        let mut max_y = 0usize;

        for (y, (old_row, new_row)) in previous
            .chunks_exact(stride)
            .zip(current.chunks_exact(stride))
            .enumerate()
        {
            if old_row == new_row {
                continue;
            }

            // Rows usually differ in a short run; find its extent
            let first = old_row.iter().zip(new_row).position(|(a, b)| a != b);
            let last = old_row.iter().zip(new_row).rposition(|(a, b)| a != b);
            if let (Some(first), Some(last)) = (first, last) {
                min_x = min_x.min(first);
                max_x = max_x.max(last);
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }

        if min_x == usize::MAX {
            return Self {
                left: 0,
                top: 0,
                width: 1,
                height: 1,
                indices: vec![current[0]],
            };
        }

        let patch_width = max_x - min_x + 1;
        let mut indices = Vec::with_capacity(patch_width * (max_y - min_y + 1));
        for y in min_y..=max_y {
            let row_start = y * stride;
            indices.extend_from_slice(&current[row_start + min_x..=row_start + max_x]);
        }

        Self {
            left: min_x as u32,
            top: min_y as u32,
            width: patch_width as u32,
            height: (max_y - min_y + 1) as u32,
            indices,
        }
    }

    /// Number of pixels stored in the patch
    pub fn area(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}
