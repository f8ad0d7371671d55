//! Filter modules for retro image effects.
//!
//! ## Format
//!
//! Every filter works on a [`PixelBuffer`]: `(height, width, 4)` RGBA, `u8`
//! per channel. Output always has the input's dimensions.
//!
//! ## Architecture
//!
//! - **Copy-in/copy-out** - filters borrow their input and allocate the output
//! - **Validate first** - bad parameters fail before any pixel work
//! - **Thread-safe** - rayon for row/block parallelism where order doesn't matter
//!
//! ## Filters
//!
//! - **grayscale**: truncated channel mean
//! - **pixelate**: block averaging with clipped edge blocks
//! - **crt**: scanlines, red channel shift, noise, vignette
//!
//! Chaining is up to the caller; [`pixel_art`] runs the grayscale → pixelate chain.

pub mod core;
pub mod crt;
pub mod grayscale;
pub mod pixelate;

use crate::buffer::PixelBuffer;
use crate::error::{FilterError, Result};

/// Grayscale the buffer, then pixelate the result.
///
/// # Errors
/// `InvalidParameter` if `block_size <= 0`; checked before the grayscale pass.
pub fn pixel_art(buffer: &PixelBuffer, block_size: i32) -> Result<PixelBuffer> {
    if block_size <= 0 {
        return Err(FilterError::invalid(
            "block_size",
            format!("must be positive, got {block_size}"),
        ));
    }
    let gray = grayscale::grayscale(buffer);
    pixelate::pixelate(&gray, block_size)
}
