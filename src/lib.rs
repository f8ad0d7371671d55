//! Image Transformer
//!
//! Retro image filters on raw RGBA pixel buffers, with optional Python
//! bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! A [`PixelBuffer`] holds `width * height` pixels, 4 `u8` channels each, in
//! `R, G, B, A` order. Decoding and encoding images is left to the caller.
//!
//! ## Filters
//! - [`grayscale`] - truncated channel mean, alpha preserved
//! - [`pixelate`] - block averaging, edge blocks clipped to the image
//! - [`crt_effect`] - scanlines, red channel shift, noise and vignette
//!
//! Every filter borrows its input and returns a new buffer with the same
//! dimensions. Filters can be chained by feeding one output into the next.
//!
//! ```
//! use image_transformer::{grayscale, pixelate, PixelBuffer};
//!
//! let red = PixelBuffer::filled(4, 4, [255, 0, 0, 255]);
//! let gray = grayscale(&red);
//! assert_eq!(gray.pixel(0, 0), Some([85, 85, 85, 255]));
//!
//! let blocky = pixelate(&gray, 2).unwrap();
//! assert_eq!(blocky.width(), 4);
//! ```

pub mod buffer;
pub mod error;
pub mod filters;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use buffer::PixelBuffer;
pub use error::{FilterError, Result};
pub use filters::crt::{crt_effect, crt_effect_with, CrtSettings};
pub use filters::grayscale::grayscale;
pub use filters::pixel_art;
pub use filters::pixelate::pixelate;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::buffer::PixelBuffer;
    use crate::error::FilterError;
    use crate::filters::crt::{self, CrtSettings};
    use crate::filters::{self as filters_mod, grayscale as grayscale_mod, pixelate as pixelate_mod};

    impl From<FilterError> for PyErr {
        fn from(err: FilterError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    fn to_buffer(image: PyReadonlyArray3<'_, u8>) -> PyResult<PixelBuffer> {
        Ok(PixelBuffer::from_array(image.as_array().to_owned())?)
    }

    // ========================================================================
    // Grayscale Filter
    // ========================================================================

    /// Convert an RGBA u8 image to grayscale (truncated channel mean).
    ///
    /// Output is RGBA with R=G=B=(r+g+b)//3, alpha preserved.
    #[pyfunction]
    pub fn grayscale<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let buffer = to_buffer(image)?;
        let result = grayscale_mod::grayscale(&buffer);
        Ok(result.into_array().into_pyarray(py))
    }

    // ========================================================================
    // Pixelate Filter
    // ========================================================================

    /// Pixelate an RGBA u8 image.
    ///
    /// # Arguments
    /// * `image` - Input image (height, width, 4)
    /// * `block_size` - Block edge length in pixels, must be positive
    #[pyfunction]
    #[pyo3(signature = (image, block_size=10))]
    pub fn pixelate<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        block_size: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let buffer = to_buffer(image)?;
        let result = pixelate_mod::pixelate(&buffer, block_size)?;
        Ok(result.into_array().into_pyarray(py))
    }

    /// Grayscale then pixelate.
    #[pyfunction]
    #[pyo3(signature = (image, block_size=10))]
    pub fn pixel_art<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        block_size: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let buffer = to_buffer(image)?;
        let result = filters_mod::pixel_art(&buffer, block_size)?;
        Ok(result.into_array().into_pyarray(py))
    }

    // ========================================================================
    // CRT Filter
    // ========================================================================

    /// Apply the CRT effect to an RGBA u8 image.
    ///
    /// # Arguments
    /// * `image` - Input image (height, width, 4)
    /// * `scanline_intensity` - Scanline strength (0.0-1.0)
    /// * `color_shift` - Red channel shift in pixels (>= 0)
    /// * `noise_amount` - Noise spread on the 0-255 scale (>= 0)
    /// * `seed` - Optional seed for reproducible noise
    #[pyfunction]
    #[pyo3(signature = (image, scanline_intensity=0.3, color_shift=2, noise_amount=10.0, seed=None))]
    pub fn crt_effect<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        scanline_intensity: f32,
        color_shift: i32,
        noise_amount: f32,
        seed: Option<u64>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let buffer = to_buffer(image)?;
        let settings = CrtSettings::new(scanline_intensity, color_shift, noise_amount);
        let result = match seed {
            Some(seed) => crt::crt_effect_with(&buffer, &settings, &mut StdRng::seed_from_u64(seed))?,
            None => crt::crt_effect_with(&buffer, &settings, &mut rand::rng())?,
        };
        Ok(result.into_array().into_pyarray(py))
    }

    /// Image Transformer Rust extension module
    #[pymodule]
    pub fn image_transformer(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(grayscale, m)?)?;
        m.add_function(wrap_pyfunction!(pixelate, m)?)?;
        m.add_function(wrap_pyfunction!(pixel_art, m)?)?;
        m.add_function(wrap_pyfunction!(crt_effect, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::image_transformer;
