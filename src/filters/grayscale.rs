//! Grayscale conversion filter.
//!
//! Reduces an RGB buffer to a single luminance channel, the step that feeds
//! histogram equalization. Defaults to ITU-R BT.601 luma coefficients.

use crate::buffer::PixelBuffer;
use crate::error::Result;

/// ITU-R BT.601 luma coefficients
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// RGB channel weights for grayscale conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayscaleWeights {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Default for GrayscaleWeights {
    fn default() -> Self {
        Self {
            r: LUMA_R,
            g: LUMA_G,
            b: LUMA_B,
        }
    }
}

impl GrayscaleWeights {
    /// BT.601 luma (default)
    pub fn bt601() -> Self {
        Self::default()
    }

    /// BT.709 luminosity
    pub fn bt709() -> Self {
        Self { r: 0.2126, g: 0.7152, b: 0.0722 }
    }

    /// Simple average (R+G+B)/3
    pub fn average() -> Self {
        Self { r: 1.0 / 3.0, g: 1.0 / 3.0, b: 1.0 / 3.0 }
    }

    /// Create custom weights (normalized automatically)
    pub fn custom(r: f32, g: f32, b: f32) -> Self {
        let sum = (r + g + b).abs().max(0.001);
        Self {
            r: r / sum,
            g: g / sum,
            b: b / sum,
        }
    }
}

/// Convert an image to a single luminance channel.
///
/// A grayscale input is returned as a copy.
///
/// # Arguments
/// * `input` - Image with 1 or 3 (RGB) channels
/// * `weights` - Channel weights
///
/// # Returns
/// Single-channel image with the same width and height
pub fn to_grayscale(input: &PixelBuffer, weights: GrayscaleWeights) -> Result<PixelBuffer> {
    if input.is_grayscale() {
        return Ok(input.clone());
    }

    let samples: Vec<u8> = input
        .as_slice()
        .chunks_exact(3)
        .map(|px| {
            let gray = weights.r * px[0] as f32 + weights.g * px[1] as f32 + weights.b * px[2] as f32;
            gray.round().clamp(0.0, 255.0) as u8
        })
        .collect();

    PixelBuffer::from_raw(input.width(), input.height(), 1, samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(r: u8, g: u8, b: u8) -> PixelBuffer {
        PixelBuffer::from_raw(1, 1, 3, vec![r, g, b]).unwrap()
    }

    #[test]
    fn test_grayscale_red() {
        let result = to_grayscale(&pixel(255, 0, 0), GrayscaleWeights::default()).unwrap();
        assert_eq!(result.channels(), 1);
        // 0.299 * 255 ≈ 76
        assert_eq!(result.get(0, 0, 0), Some(76));
    }

    #[test]
    fn test_grayscale_green_bt709() {
        let result = to_grayscale(&pixel(0, 255, 0), GrayscaleWeights::bt709()).unwrap();
        // 0.7152 * 255 ≈ 182
        assert_eq!(result.get(0, 0, 0), Some(182));
    }

    #[test]
    fn test_grayscale_white_stays_white() {
        for weights in [GrayscaleWeights::bt601(), GrayscaleWeights::bt709(), GrayscaleWeights::average()] {
            let result = to_grayscale(&pixel(255, 255, 255), weights).unwrap();
            assert_eq!(result.get(0, 0, 0), Some(255));
        }
    }

    #[test]
    fn test_custom_weights_normalized() {
        let w = GrayscaleWeights::custom(2.0, 1.0, 1.0);
        assert!((w.r - 0.5).abs() < 1e-6);
        assert!((w.r + w.g + w.b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_grayscale_input_is_copied() {
        let img = PixelBuffer::from_raw(2, 1, 1, vec![3, 200]).unwrap();
        assert_eq!(to_grayscale(&img, GrayscaleWeights::default()).unwrap(), img);
    }

    #[test]
    fn test_keeps_dimensions() {
        let img = PixelBuffer::filled(5, 2, 3, 40).unwrap();
        let result = to_grayscale(&img, GrayscaleWeights::default()).unwrap();
        assert_eq!((result.width(), result.height()), (5, 2));
        assert!(result.as_slice().iter().all(|&v| v == 40));
    }
}
