//! Sharpen filter.
//!
//! Boosts each pixel against its four direct neighbors with the classic
//! 3x3 kernel (center 5, edges -1). Edge pixels use replicate padding.

use crate::buffer::PixelBuffer;
use crate::error::Result;

use super::convolve::{apply_kernel, Kernel};

/// Apply the fixed 3x3 sharpening kernel.
pub fn sharpen(input: &PixelBuffer) -> Result<PixelBuffer> {
    apply_kernel(input, &Kernel::sharpen())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_region_unchanged() {
        let img = PixelBuffer::filled(4, 4, 3, 128).unwrap();
        assert_eq!(sharpen(&img).unwrap(), img);
    }

    #[test]
    fn test_enhances_edge() {
        // Vertical step 100 | 200
        let row = [100u8, 100, 200, 200];
        let img = PixelBuffer::from_raw(4, 3, 1, row.repeat(3)).unwrap();
        let result = sharpen(&img).unwrap();

        // Dark side of the edge gets darker, bright side brighter
        assert_eq!(result.get(1, 1, 0), Some(0));
        assert_eq!(result.get(1, 2, 0), Some(255));
        // Replicated border columns stay flat
        assert_eq!(result.get(1, 0, 0), Some(100));
        assert_eq!(result.get(1, 3, 0), Some(200));
    }

    #[test]
    fn test_keeps_shape() {
        let img = PixelBuffer::new(5, 2, 3).unwrap();
        let result = sharpen(&img).unwrap();
        assert_eq!((result.width(), result.height(), result.channels()), (5, 2, 3));
    }
}
