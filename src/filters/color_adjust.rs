//! Brightness and contrast remapping.
//!
//! A pointwise operation that doesn't require spatial context. Works on
//! grayscale and RGB buffers alike; channels never interact.

use crate::buffer::PixelBuffer;
use crate::error::{FilterError, Result};

// ============================================================================
// Brightness / Contrast
// ============================================================================

/// Linear remap `clamp(alpha * v + beta, 0, 255)` of every sample.
///
/// # Arguments
/// * `input` - Image with 1 or 3 channels
/// * `alpha` - Contrast multiplier (1.0 = no change)
/// * `beta` - Brightness offset added after scaling (0 = no change)
///
/// # Returns
/// Adjusted image with same shape
pub fn adjust_brightness_contrast(input: &PixelBuffer, alpha: f64, beta: i32) -> Result<PixelBuffer> {
    if !alpha.is_finite() {
        return Err(FilterError::invalid("alpha", format!("must be finite, got {}", alpha)));
    }

    let lut = brightness_contrast_lut(alpha, beta);
    Ok(input.map_lut(&lut))
}

/// Lookup table for [`adjust_brightness_contrast`]. 8-bit input has only 256
/// possible values, so the arithmetic runs once per level instead of per sample.
pub fn brightness_contrast_lut(alpha: f64, beta: i32) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (level, out) in lut.iter_mut().enumerate() {
        let v = alpha * level as f64 + beta as f64;
        *out = v.round().clamp(0.0, 255.0) as u8;
    }
    lut
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> PixelBuffer {
        let samples: Vec<u8> = (0..=255).collect();
        PixelBuffer::from_raw(16, 16, 1, samples).unwrap()
    }

    #[test]
    fn test_identity() {
        let img = ramp();
        let result = adjust_brightness_contrast(&img, 1.0, 0).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_demo_parameters() {
        // alpha 1.2, beta 30: 100 -> 150, 200 -> 270 saturates
        let img = PixelBuffer::from_raw(3, 1, 1, vec![0, 100, 200]).unwrap();
        let result = adjust_brightness_contrast(&img, 1.2, 30).unwrap();
        assert_eq!(result.as_slice(), &[30, 150, 255]);
    }

    #[test]
    fn test_negative_offset_saturates_at_zero() {
        let img = PixelBuffer::from_raw(2, 1, 1, vec![10, 100]).unwrap();
        let result = adjust_brightness_contrast(&img, 1.0, -50).unwrap();
        assert_eq!(result.as_slice(), &[0, 50]);
    }

    #[test]
    fn test_output_in_range_and_monotonic() {
        let img = ramp();
        for &alpha in &[0.0, 0.25, 1.0, 1.7, 4.0] {
            for &beta in &[-300, -64, 0, 64, 300] {
                let result = adjust_brightness_contrast(&img, alpha, beta).unwrap();
                let out = result.as_slice();
                // u8 already bounds the range; check monotonicity for alpha > 0
                if alpha > 0.0 {
                    assert!(out.windows(2).all(|w| w[0] <= w[1]), "alpha={} beta={}", alpha, beta);
                }
            }
        }
    }

    #[test]
    fn test_channels_independent() {
        let img = PixelBuffer::from_raw(1, 1, 3, vec![10, 20, 30]).unwrap();
        let result = adjust_brightness_contrast(&img, 2.0, 1).unwrap();
        assert_eq!(result.as_slice(), &[21, 41, 61]);
    }

    #[test]
    fn test_rejects_non_finite_alpha() {
        let img = ramp();
        assert!(matches!(
            adjust_brightness_contrast(&img, f64::NAN, 0),
            Err(FilterError::InvalidParameter { name: "alpha", .. })
        ));
        assert!(adjust_brightness_contrast(&img, f64::INFINITY, 0).is_err());
    }
}
