//! CRT monitor emulation.
//!
//! Four stages run in a fixed order on an `f32` working copy of the image,
//! each reading what the previous one wrote:
//!
//! 1. **Scanlines** - row `y` scales R, G, B by `1 - sin(y * 0.1) * intensity`.
//!    The factor is signed, so some rows are brightened.
//! 2. **Channel shift** - red at column `x` takes the (post-scanline) red from
//!    `x + shift` in the same row. The last `shift` columns keep their own red.
//! 3. **Noise** - one uniform sample in `[-amount/2, amount/2)` per pixel,
//!    added to R, G and B alike.
//! 4. **Vignette** - black radial gradient, transparent at the centre and 70%
//!    opaque at radius `width / 2` and beyond, composited with "over".
//!
//! Alpha is untouched by stages 1-3. Values are rounded and clamped to
//! `[0, 255]` only when the output is written.

use std::ops::RangeInclusive;

use ndarray::{Array3, ArrayView3, ArrayViewMut2, Axis};
use rand::Rng;
use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::error::{FilterError, Result};
use crate::filters::core::{blend_over, to_channel_u8};

/// Row frequency of the scanline pattern.
const SCANLINE_FREQUENCY: f64 = 0.1;

/// Vignette opacity at (and beyond) radius `width / 2`.
const VIGNETTE_MAX_OPACITY: f32 = 0.7;

/// Reference UI range for scanline intensity.
pub const SCANLINE_INTENSITY_RANGE: RangeInclusive<f32> = 0.0..=1.0;
/// Reference UI range for the red channel shift.
pub const COLOR_SHIFT_RANGE: RangeInclusive<i32> = 0..=10;
/// Reference UI range for noise amount.
pub const NOISE_AMOUNT_RANGE: RangeInclusive<f32> = 0.0..=50.0;

/// Parameters of the CRT effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrtSettings {
    /// Scanline strength, 0.0-1.0.
    pub scanline_intensity: f32,
    /// Red channel displacement in pixels, >= 0.
    pub color_shift: i32,
    /// Width of the uniform noise distribution on the 0-255 scale, >= 0.
    pub noise_amount: f32,
}

impl Default for CrtSettings {
    fn default() -> Self {
        CrtSettings {
            scanline_intensity: 0.3,
            color_shift: 2,
            noise_amount: 10.0,
        }
    }
}

impl CrtSettings {
    pub fn new(scanline_intensity: f32, color_shift: i32, noise_amount: f32) -> Self {
        CrtSettings {
            scanline_intensity,
            color_shift,
            noise_amount,
        }
    }

    pub fn with_scanline_intensity(mut self, scanline_intensity: f32) -> Self {
        self.scanline_intensity = scanline_intensity;
        self
    }

    pub fn with_color_shift(mut self, color_shift: i32) -> Self {
        self.color_shift = color_shift;
        self
    }

    pub fn with_noise_amount(mut self, noise_amount: f32) -> Self {
        self.noise_amount = noise_amount;
        self
    }

    /// Check every parameter against its valid domain.
    ///
    /// UI ranges are not enforced here; only the mathematical domain is.
    pub fn validate(&self) -> Result<()> {
        if !SCANLINE_INTENSITY_RANGE.contains(&self.scanline_intensity) {
            return Err(FilterError::invalid(
                "scanline_intensity",
                format!("must be within [0, 1], got {}", self.scanline_intensity),
            ));
        }
        if self.color_shift < 0 {
            return Err(FilterError::invalid(
                "color_shift",
                format!("must not be negative, got {}", self.color_shift),
            ));
        }
        if !(self.noise_amount >= 0.0 && self.noise_amount.is_finite()) {
            return Err(FilterError::invalid(
                "noise_amount",
                format!("must be a finite non-negative number, got {}", self.noise_amount),
            ));
        }
        Ok(())
    }
}

/// Apply the CRT effect using the thread-local random generator for noise.
///
/// # Errors
/// `InvalidParameter` if `scanline_intensity` is outside `[0, 1]`,
/// `color_shift` is negative, or `noise_amount` is negative or not finite.
pub fn crt_effect(
    buffer: &PixelBuffer,
    scanline_intensity: f32,
    color_shift: i32,
    noise_amount: f32,
) -> Result<PixelBuffer> {
    let settings = CrtSettings::new(scanline_intensity, color_shift, noise_amount);
    crt_effect_with(buffer, &settings, &mut rand::rng())
}

/// Apply the CRT effect with an explicit noise source.
///
/// A seeded generator makes the output reproducible.
pub fn crt_effect_with<R: Rng>(
    buffer: &PixelBuffer,
    settings: &CrtSettings,
    rng: &mut R,
) -> Result<PixelBuffer> {
    settings.validate()?;
    log::debug!(
        "crt_effect {}x{} scanline_intensity={} color_shift={} noise_amount={}",
        buffer.width(),
        buffer.height(),
        settings.scanline_intensity,
        settings.color_shift,
        settings.noise_amount
    );

    let mut work = to_working(buffer.view());
    let shift = settings.color_shift as usize;
    apply_scanlines_and_shift(&mut work, settings.scanline_intensity, shift);
    apply_noise(&mut work, settings.noise_amount, rng);
    apply_vignette(&mut work);

    Ok(PixelBuffer::from_filter_output(work.mapv(to_channel_u8)))
}

fn to_working(input: ArrayView3<u8>) -> Array3<f32> {
    input.mapv(|v| v as f32)
}

/// Scanline factor for row `y`. Negative values brighten the row.
///
/// The phase is computed in `f64`; `f32` drifts visibly on tall images.
pub fn scanline_factor(y: usize, intensity: f32) -> f32 {
    ((y as f64 * SCANLINE_FREQUENCY).sin() * intensity as f64) as f32
}

/// Stages 1 and 2. Rows are independent, so they run in parallel.
fn apply_scanlines_and_shift(work: &mut Array3<f32>, intensity: f32, shift: usize) {
    work.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            scanline_row(&mut row, y, intensity);
            shift_red_row(&mut row, shift);
        });
}

fn scanline_row(row: &mut ArrayViewMut2<f32>, y: usize, intensity: f32) {
    let scale = 1.0 - scanline_factor(y, intensity);
    for mut px in row.axis_iter_mut(Axis(0)) {
        px[0] *= scale;
        px[1] *= scale;
        px[2] *= scale;
    }
}

/// Left to right, so each read sees the current row state.
fn shift_red_row(row: &mut ArrayViewMut2<f32>, shift: usize) {
    if shift == 0 {
        return;
    }
    let width = row.dim().0;
    for x in 0..width.saturating_sub(shift) {
        row[[x, 0]] = row[[x + shift, 0]];
    }
}

/// Stage 3. Sequential so a seeded generator gives a stable pixel order.
fn apply_noise<R: Rng>(work: &mut Array3<f32>, amount: f32, rng: &mut R) {
    if amount == 0.0 {
        return;
    }
    for mut px in work.lanes_mut(Axis(2)) {
        let noise = (rng.random::<f32>() - 0.5) * amount;
        px[0] += noise;
        px[1] += noise;
        px[2] += noise;
    }
}

/// Opacity of the vignette at distance `distance` for an image `width` wide.
pub fn vignette_opacity(distance: f32, width: usize) -> f32 {
    let radius = width as f32 / 2.0;
    if radius <= 0.0 {
        return 0.0;
    }
    VIGNETTE_MAX_OPACITY * (distance / radius).min(1.0)
}

/// Stage 4. Distances are measured from pixel centres.
fn apply_vignette(work: &mut Array3<f32>) {
    let (height, width, _) = work.dim();
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;

    work.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            let dy = y as f32 + 0.5 - cy;
            for (x, mut px) in row.axis_iter_mut(Axis(0)).enumerate() {
                let dx = x as f32 + 0.5 - cx;
                let opacity = vignette_opacity((dx * dx + dy * dy).sqrt(), width);

                let mut pixel = [px[0], px[1], px[2], px[3]];
                blend_over(&mut pixel, 0.0, 0.0, 0.0, opacity);
                px[0] = pixel[0];
                px[1] = pixel[1];
                px[2] = pixel[2];
                px[3] = pixel[3];
            }
        });
}
