//! RGBA pixel buffer passed between filters.
//!
//! Pixels are stored as an `(height, width, 4)` array of `u8` with channels in
//! `R, G, B, A` order, the same layout the filters index with `[[y, x, c]]`.

use ndarray::{Array3, ArrayView3};

use crate::error::{FilterError, Result};

/// Channels per pixel.
pub const CHANNELS: usize = 4;

/// A rectangular grid of RGBA pixels.
///
/// Filters take a `&PixelBuffer` and return a new one; the input is never
/// modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Array3<u8>,
}

impl PixelBuffer {
    /// Create a transparent black buffer.
    pub fn new(width: usize, height: usize) -> Self {
        PixelBuffer {
            data: Array3::zeros((height, width, CHANNELS)),
        }
    }

    /// Create a buffer where every pixel has the same RGBA value.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        let data = Array3::from_shape_fn((height, width, CHANNELS), |(_, _, c)| rgba[c]);
        PixelBuffer { data }
    }

    /// Wrap row-major RGBA bytes (as produced by an image decoder).
    ///
    /// # Errors
    /// `DimensionMismatch` if `data.len() != width * height * 4`, including
    /// dimensions whose byte count does not fit in `usize`.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = rgba_len(width, height);
        if data.len() != expected {
            return Err(FilterError::DimensionMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        let data = Array3::from_shape_vec((height, width, CHANNELS), data).map_err(|_| {
            FilterError::DimensionMismatch {
                width,
                height,
                expected,
                actual: expected,
            }
        })?;
        Ok(PixelBuffer { data })
    }

    /// Wrap an `(height, width, 4)` array.
    ///
    /// # Errors
    /// `DimensionMismatch` if the last axis is not 4 channels wide.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (height, width, channels) = data.dim();
        if channels != CHANNELS {
            return Err(FilterError::DimensionMismatch {
                width,
                height,
                expected: rgba_len(width, height),
                actual: data.len(),
            });
        }
        Ok(PixelBuffer { data })
    }

    /// Wrap filter output whose shape was derived from a valid input.
    pub(crate) fn from_filter_output(data: Array3<u8>) -> Self {
        debug_assert_eq!(data.dim().2, CHANNELS, "filter produced a non-RGBA buffer");
        PixelBuffer { data }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.pixel_count() == 0
    }

    /// RGBA value at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some([
            self.data[[y, x, 0]],
            self.data[[y, x, 1]],
            self.data[[y, x, 2]],
            self.data[[y, x, 3]],
        ])
    }

    /// Read-only `(height, width, 4)` view of the pixels.
    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    /// Unwrap the underlying `(height, width, 4)` array.
    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    /// Row-major RGBA bytes, ready for an image encoder.
    pub fn into_raw(self) -> Vec<u8> {
        if !self.data.is_standard_layout() {
            return self.data.iter().copied().collect();
        }
        let len = self.data.len();
        let (mut raw, offset) = self.data.into_raw_vec_and_offset();
        // Contiguous elements sit at [offset, offset + len) of the owned vec
        raw.drain(..offset.unwrap_or(0));
        raw.truncate(len);
        raw
    }
}

/// Byte count of a `width x height` RGBA image, `usize::MAX` on overflow.
///
/// No allocation can hold `usize::MAX` bytes, so an overflowing size never
/// matches a real buffer length.
fn rgba_len(width: usize, height: usize) -> usize {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .unwrap_or(usize::MAX)
}
