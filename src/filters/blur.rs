//! Blur filters: Gaussian and box blur.
//!
//! Both are presets over [`super::convolve::apply_kernel`] and inherit its
//! replicate border handling. Kernel sizes are validated before any kernel
//! or output buffer is allocated.

use crate::buffer::PixelBuffer;
use crate::error::{FilterError, Result};

use super::convolve::{apply_kernel, Kernel};

/// Box blur sizes a caller may choose from.
pub const BOX_BLUR_SIZES: [i32; 2] = [3, 5];

/// Check a requested box blur size against [`BOX_BLUR_SIZES`].
pub fn validate_box_blur_size(kernel_size: i32) -> Result<()> {
    if !BOX_BLUR_SIZES.contains(&kernel_size) {
        return Err(FilterError::invalid(
            "kernel_size",
            format!("box blur supports sizes 3 or 5, got {}", kernel_size),
        ));
    }
    Ok(())
}

/// Apply Gaussian blur.
///
/// # Arguments
/// * `input` - Image with 1 or 3 channels
/// * `kernel_size` - Odd side length; sigma is derived from it
///
/// # Returns
/// Blurred image with same shape
pub fn gaussian_blur(input: &PixelBuffer, kernel_size: i32) -> Result<PixelBuffer> {
    let kernel = Kernel::gaussian(kernel_size)?;
    apply_kernel(input, &kernel)
}

/// Apply box blur (uniform average over a square window).
///
/// # Arguments
/// * `input` - Image with 1 or 3 channels
/// * `kernel_size` - 3 or 5; any other size is rejected
///
/// # Returns
/// Blurred image with same shape
pub fn box_blur(input: &PixelBuffer, kernel_size: i32) -> Result<PixelBuffer> {
    validate_box_blur_size(kernel_size)?;
    let kernel = Kernel::box_filter(kernel_size)?;
    apply_kernel(input, &kernel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn impulse(size: usize) -> PixelBuffer {
        let mut samples = vec![0u8; size * size];
        samples[(size / 2) * size + size / 2] = 255;
        PixelBuffer::from_raw(size, size, 1, samples).unwrap()
    }

    #[test]
    fn test_box_blur_accepts_three_and_five() {
        let img = PixelBuffer::filled(4, 4, 3, 77).unwrap();
        assert_eq!(box_blur(&img, 3).unwrap(), img);
        assert_eq!(box_blur(&img, 5).unwrap(), img);
    }

    #[test]
    fn test_box_blur_rejects_other_sizes() {
        let img = PixelBuffer::filled(4, 4, 1, 10).unwrap();
        for size in [7, 1, 4, 0, -3, 9] {
            assert!(matches!(
                box_blur(&img, size),
                Err(FilterError::InvalidParameter { name: "kernel_size", .. })
            ));
        }
    }

    #[test]
    fn test_validate_box_blur_size() {
        assert!(validate_box_blur_size(3).is_ok());
        assert!(validate_box_blur_size(5).is_ok());
        assert!(matches!(
            validate_box_blur_size(7),
            Err(FilterError::InvalidParameter { name: "kernel_size", .. })
        ));
    }

    #[test]
    fn test_box_blur_spreads_impulse() {
        let result = box_blur(&impulse(5), 3).unwrap();
        // 255 / 9 = 28.3
        assert_eq!(result.get(2, 2, 0), Some(28));
        assert_eq!(result.get(1, 1, 0), Some(28));
        assert_eq!(result.get(0, 0, 0), Some(0));
    }

    #[test]
    fn test_gaussian_blur_rejects_even_size() {
        let img = PixelBuffer::filled(4, 4, 1, 10).unwrap();
        assert!(gaussian_blur(&img, 4).is_err());
        assert!(gaussian_blur(&img, 0).is_err());
    }

    #[test]
    fn test_gaussian_blur_size_one_is_identity() {
        let img = impulse(3);
        assert_eq!(gaussian_blur(&img, 1).unwrap(), img);
    }

    #[test]
    fn test_larger_gaussian_blurs_more() {
        let img = impulse(9);
        let peak3 = gaussian_blur(&img, 3).unwrap().get(4, 4, 0).unwrap();
        let peak7 = gaussian_blur(&img, 7).unwrap().get(4, 4, 0).unwrap();
        assert!(peak7 < peak3, "peak7={} peak3={}", peak7, peak3);
        assert!(peak3 < 255);
    }

    #[test]
    fn test_gaussian_blur_preserves_constant_color() {
        let img = PixelBuffer::from_raw(2, 2, 3, [10u8, 120, 250].repeat(4)).unwrap();
        assert_eq!(gaussian_blur(&img, 7).unwrap(), img);
    }
}
