//! Grayscale conversion filter.
//!
//! Gray is the plain arithmetic mean of R, G and B with integer
//! truncation: `(r + g + b) / 3`. Pure red `(255, 0, 0)` becomes 85.
//!
//! Alpha is always preserved.

use ndarray::{Array3, ArrayView3};

use crate::buffer::PixelBuffer;

/// Convert a buffer to grayscale by averaging its color channels.
///
/// Output has R=G=B=`(r + g + b) / 3` (truncated toward zero), alpha preserved.
pub fn grayscale(buffer: &PixelBuffer) -> PixelBuffer {
    log::debug!("grayscale {}x{}", buffer.width(), buffer.height());
    PixelBuffer::from_filter_output(grayscale_average_u8(buffer.view()))
}

/// Grayscale on an `(height, width, 4)` RGBA array.
///
/// # Arguments
/// * `input` - 3D array view of shape (height, width, 4) with RGBA u8 values (0-255)
///
/// # Returns
/// New array with the truncated channel mean in RGB, alpha preserved
pub fn grayscale_average_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, 4));

    for y in 0..height {
        for x in 0..width {
            let r = input[[y, x, 0]] as u16;
            let g = input[[y, x, 1]] as u16;
            let b = input[[y, x, 2]] as u16;

            // Max 765 / 3 = 255, always fits
            let gray = ((r + g + b) / 3) as u8;

            output[[y, x, 0]] = gray;
            output[[y, x, 1]] = gray;
            output[[y, x, 2]] = gray;
            output[[y, x, 3]] = input[[y, x, 3]];
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(rgba: [u8; 4]) -> PixelBuffer {
        PixelBuffer::filled(1, 1, rgba)
    }

    #[test]
    fn test_grayscale_red_truncates() {
        let result = grayscale(&single([255, 0, 0, 255]));
        assert_eq!(result.pixel(0, 0), Some([85, 85, 85, 255]));
    }

    #[test]
    fn test_grayscale_truncates_not_rounds() {
        // 4 / 3 = 1.33 and 5 / 3 = 1.67 both truncate to 1
        assert_eq!(grayscale(&single([1, 1, 2, 255])).pixel(0, 0), Some([1, 1, 1, 255]));
        assert_eq!(grayscale(&single([1, 2, 2, 255])).pixel(0, 0), Some([1, 1, 1, 255]));
    }

    #[test]
    fn test_grayscale_white_stays_white() {
        let result = grayscale(&single([255, 255, 255, 255]));
        assert_eq!(result.pixel(0, 0), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_grayscale_weights_channels_equally() {
        // Perceptual weights would make green much brighter than blue
        let green = grayscale(&single([0, 255, 0, 255]));
        let blue = grayscale(&single([0, 0, 255, 255]));
        assert_eq!(green.pixel(0, 0), Some([85, 85, 85, 255]));
        assert_eq!(green, blue);
    }

    #[test]
    fn test_grayscale_preserves_alpha() {
        let result = grayscale(&single([128, 64, 32, 100]));
        assert_eq!(result.pixel(0, 0), Some([74, 74, 74, 100]));
    }

    #[test]
    fn test_grayscale_channels_equal_and_idempotent() {
        let data: Vec<u8> = (0..5 * 3 * 4).map(|i| (i * 37 % 256) as u8).collect();
        let buffer = PixelBuffer::from_raw(5, 3, data).unwrap();

        let once = grayscale(&buffer);
        let twice = grayscale(&once);

        assert_eq!(once, twice);
        for y in 0..3 {
            for x in 0..5 {
                let [r, g, b, _] = once.pixel(x, y).unwrap();
                assert_eq!(r, g);
                assert_eq!(g, b);
            }
        }
    }

    #[test]
    fn test_grayscale_empty_buffer() {
        let result = grayscale(&PixelBuffer::new(0, 0));
        assert!(result.is_empty());
        assert_eq!(result.width(), 0);
        assert_eq!(result.height(), 0);
    }

    #[test]
    fn test_grayscale_does_not_touch_input() {
        let buffer = single([10, 20, 30, 40]);
        let _ = grayscale(&buffer);
        assert_eq!(buffer.pixel(0, 0), Some([10, 20, 30, 40]));
    }
}
