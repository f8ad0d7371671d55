//! Pixelate filter: flatten square blocks to their average color.
//!
//! Blocks start at `(0, 0)` and advance by `block_size` on both axes. Blocks on
//! the right and bottom edges are clipped to the image, so their average only
//! covers the pixels that actually exist.
//!
//! Each of R, G, B and A is averaged independently and rounded half-up:
//! `(sum + count / 2) / count`.

use std::ops::RangeInclusive;

use ndarray::{s, Array3, ArrayView3};
use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::error::{FilterError, Result};

/// Reference UI range for the block size.
pub const BLOCK_SIZE_RANGE: RangeInclusive<i32> = 1..=50;

/// Pixelate a buffer with square blocks of `block_size` pixels.
///
/// # Errors
/// `InvalidParameter` if `block_size <= 0`.
pub fn pixelate(buffer: &PixelBuffer, block_size: i32) -> Result<PixelBuffer> {
    if block_size <= 0 {
        return Err(FilterError::invalid(
            "block_size",
            format!("must be positive, got {block_size}"),
        ));
    }
    log::debug!(
        "pixelate {}x{} block_size={}",
        buffer.width(),
        buffer.height(),
        block_size
    );

    let output = pixelate_u8(buffer.view(), block_size as usize);
    Ok(PixelBuffer::from_filter_output(output))
}

/// Pixelate an `(height, width, 4)` RGBA array.
///
/// `block_size` must be at least 1.
pub fn pixelate_u8(input: ArrayView3<u8>, block_size: usize) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, channels));
    if height == 0 || width == 0 {
        return output;
    }

    let block_rows = height.div_ceil(block_size);
    let block_cols = width.div_ceil(block_size);

    // Averages for one row of blocks at a time, computed in parallel
    let averages: Vec<Vec<[u8; 4]>> = (0..block_rows)
        .into_par_iter()
        .map(|by| {
            let y0 = by * block_size;
            let y1 = (y0 + block_size).min(height);
            (0..block_cols)
                .map(|bx| {
                    let x0 = bx * block_size;
                    let x1 = (x0 + block_size).min(width);
                    block_average(input, y0, y1, x0, x1)
                })
                .collect()
        })
        .collect();

    for (by, row) in averages.iter().enumerate() {
        let y0 = by * block_size;
        let y1 = (y0 + block_size).min(height);
        for (bx, color) in row.iter().enumerate() {
            let x0 = bx * block_size;
            let x1 = (x0 + block_size).min(width);
            for (c, &value) in color.iter().enumerate() {
                output.slice_mut(s![y0..y1, x0..x1, c]).fill(value);
            }
        }
    }

    output
}

/// Rounded mean of each channel over the clipped block `[y0, y1) x [x0, x1)`.
fn block_average(input: ArrayView3<u8>, y0: usize, y1: usize, x0: usize, x1: usize) -> [u8; 4] {
    let count = ((y1 - y0) * (x1 - x0)) as u64;
    let mut color = [0u8; 4];
    for (c, out) in color.iter_mut().enumerate() {
        let sum: u64 = input
            .slice(s![y0..y1, x0..x1, c])
            .iter()
            .map(|&v| v as u64)
            .sum();
        // Round half-up; mean of u8 values never exceeds 255
        *out = ((sum + count / 2) / count) as u8;
    }
    color
}
