//! Core utilities shared by the filters.
//!
//! - Final channel write (round + clamp)
//! - Porter-Duff "over" compositing on `f32` working pixels

/// Convert a working channel value to `u8`.
///
/// Rounds to nearest, then clamps to `[0, 255]`. This is the only place
/// working values are clamped.
#[inline]
pub fn to_channel_u8(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Blend a color onto a working pixel using Porter-Duff "over".
///
/// `dst` holds R, G, B, A on the 0-255 scale (unclamped working values).
/// Source color is 0-255, `src_a` is an opacity in 0.0-1.0.
#[inline]
pub fn blend_over(dst: &mut [f32; 4], src_r: f32, src_g: f32, src_b: f32, src_a: f32) {
    if src_a <= 0.0 {
        return;
    }
    if src_a >= 1.0 {
        dst[0] = src_r;
        dst[1] = src_g;
        dst[2] = src_b;
        dst[3] = 255.0;
        return;
    }

    let dst_a = dst[3] / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    if out_a > 0.0 {
        dst[0] = (src_r * src_a + dst[0] * dst_a * (1.0 - src_a)) / out_a;
        dst[1] = (src_g * src_a + dst[1] * dst_a * (1.0 - src_a)) / out_a;
        dst[2] = (src_b * src_a + dst[2] * dst_a * (1.0 - src_a)) / out_a;
        dst[3] = out_a * 255.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_to_channel_u8_rounds_and_clamps() {
        assert_eq!(to_channel_u8(127.5), 128);
        assert_eq!(to_channel_u8(127.49), 127);
        assert_eq!(to_channel_u8(-12.0), 0);
        assert_eq!(to_channel_u8(300.0), 255);
        assert_eq!(to_channel_u8(f32::NAN), 0);
    }

    #[test]
    fn test_blend_over_opaque_dst() {
        let mut px = [200.0, 100.0, 50.0, 255.0];
        blend_over(&mut px, 0.0, 0.0, 0.0, 0.5);

        assert_relative_eq!(px[0], 100.0, epsilon = 1e-3);
        assert_relative_eq!(px[1], 50.0, epsilon = 1e-3);
        assert_relative_eq!(px[2], 25.0, epsilon = 1e-3);
        assert_relative_eq!(px[3], 255.0, epsilon = 1e-3);
    }

    #[test]
    fn test_blend_over_transparent_dst() {
        let mut px = [200.0, 100.0, 50.0, 0.0];
        blend_over(&mut px, 0.0, 0.0, 0.0, 0.7);

        // Source fully determines the result
        assert_relative_eq!(px[0], 0.0, epsilon = 1e-3);
        assert_relative_eq!(px[3], 0.7 * 255.0, epsilon = 1e-3);
    }

    #[test]
    fn test_blend_over_zero_alpha_is_noop() {
        let mut px = [1.0, 2.0, 3.0, 4.0];
        blend_over(&mut px, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(px, [1.0, 2.0, 3.0, 4.0]);
    }
}
