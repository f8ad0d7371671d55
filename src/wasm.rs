//! WebAssembly exports for the image filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images travel
//! as flat RGBA byte arrays (`ImageData.data` layout) with explicit width and
//! height. Invalid parameters or mismatched lengths throw a JS error.

use wasm_bindgen::prelude::*;

use crate::buffer::PixelBuffer;
use crate::error::FilterError;
use crate::filters::crt::crt_effect;
use crate::filters::grayscale::grayscale;
use crate::filters::pixel_art;
use crate::filters::pixelate::pixelate;

impl From<FilterError> for JsValue {
    fn from(err: FilterError) -> JsValue {
        JsError::new(&err.to_string()).into()
    }
}

// ============================================================================
// Grayscale Filter
// ============================================================================

/// Convert RGBA bytes to grayscale (truncated channel mean).
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// Flat array of RGBA bytes with grayscale values
#[wasm_bindgen]
pub fn grayscale_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    let input = PixelBuffer::from_raw(width, height, data.to_vec())?;
    Ok(grayscale(&input).into_raw())
}

// ============================================================================
// Pixelate Filter
// ============================================================================

/// Pixelate RGBA bytes with square blocks of `block_size` pixels.
#[wasm_bindgen]
pub fn pixelate_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    block_size: i32,
) -> Result<Vec<u8>, JsValue> {
    let input = PixelBuffer::from_raw(width, height, data.to_vec())?;
    Ok(pixelate(&input, block_size)?.into_raw())
}

/// Grayscale then pixelate, as one call.
#[wasm_bindgen]
pub fn pixel_art_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    block_size: i32,
) -> Result<Vec<u8>, JsValue> {
    let input = PixelBuffer::from_raw(width, height, data.to_vec())?;
    Ok(pixel_art(&input, block_size)?.into_raw())
}

// ============================================================================
// CRT Filter
// ============================================================================

/// Apply the CRT effect to RGBA bytes.
///
/// # Arguments
/// * `scanline_intensity` - Scanline strength (0.0-1.0)
/// * `color_shift` - Red channel shift in pixels (>= 0)
/// * `noise_amount` - Noise spread on the 0-255 scale (>= 0)
#[wasm_bindgen]
pub fn crt_effect_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    scanline_intensity: f32,
    color_shift: i32,
    noise_amount: f32,
) -> Result<Vec<u8>, JsValue> {
    let input = PixelBuffer::from_raw(width, height, data.to_vec())?;
    Ok(crt_effect(&input, scanline_intensity, color_shift, noise_amount)?.into_raw())
}
