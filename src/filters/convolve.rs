//! 2D convolution with square, odd-sized kernels.
//!
//! ## Border Handling
//!
//! Pixels outside the image are replaced by the nearest edge pixel
//! (replicate padding): a neighborhood coordinate is clamped into
//! `0..width` and `0..height` before sampling. A kernel whose weights sum
//! to 1 therefore leaves a constant image unchanged, edges included.
//!
//! ## Performance
//!
//! Output rows are computed in parallel with Rayon. Every row only reads
//! the input, so results match a serial pass exactly.

use ndarray::{arr2, Array2};
use rayon::prelude::*;

use crate::buffer::PixelBuffer;
use crate::error::{FilterError, Result};

/// Largest kernel side length accepted from a caller.
pub const MAX_KERNEL_SIZE: i32 = 255;

/// Check a requested kernel side length. Must be odd and in `1..=MAX_KERNEL_SIZE`.
pub fn validate_kernel_size(size: i32) -> Result<usize> {
    if size <= 0 {
        return Err(FilterError::invalid(
            "kernel_size",
            format!("must be positive, got {}", size),
        ));
    }
    if size > MAX_KERNEL_SIZE {
        return Err(FilterError::invalid(
            "kernel_size",
            format!("must be at most {}, got {}", MAX_KERNEL_SIZE, size),
        ));
    }
    if size % 2 == 0 {
        return Err(FilterError::invalid(
            "kernel_size",
            format!("must be odd, got {}", size),
        ));
    }
    Ok(size as usize)
}

/// Square convolution kernel with an odd side length.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: Array2<f32>,
}

impl Kernel {
    /// Build a kernel from `size * size` row-major weights.
    pub fn new(size: i32, weights: Vec<f32>) -> Result<Self> {
        let side = validate_kernel_size(size)?;
        if weights.len() != side * side {
            return Err(FilterError::invalid(
                "weights",
                format!("expected {} weights for a {}x{} kernel, got {}", side * side, side, side, weights.len()),
            ));
        }
        let weights = Array2::from_shape_vec((side, side), weights)
            .map_err(|e| FilterError::invalid("weights", e.to_string()))?;
        Self::from_array(weights)
    }

    /// Wrap an existing weight matrix.
    pub fn from_array(weights: Array2<f32>) -> Result<Self> {
        let (rows, cols) = weights.dim();
        if rows != cols {
            return Err(FilterError::invalid(
                "weights",
                format!("kernel must be square, got {}x{}", rows, cols),
            ));
        }
        validate_kernel_size(i32::try_from(rows).unwrap_or(0))?;
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(FilterError::invalid("weights", "weights must be finite"));
        }
        Ok(Self { weights })
    }

    /// 3x3 sharpening kernel:
    ///
    /// ```text
    ///  0 -1  0
    /// -1  5 -1
    ///  0 -1  0
    /// ```
    pub fn sharpen() -> Self {
        Self {
            weights: arr2(&[[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]]),
        }
    }

    /// Uniform kernel with weight `1 / size²`.
    pub fn box_filter(size: i32) -> Result<Self> {
        let side = validate_kernel_size(size)?;
        let w = 1.0 / (side * side) as f32;
        Ok(Self {
            weights: Array2::from_elem((side, side), w),
        })
    }

    /// Normalized 2D Gaussian of the given side length.
    ///
    /// Sigma is derived from the size as `0.3 * ((size - 1) / 2 - 1) + 0.8`,
    /// so a larger kernel always blurs more.
    pub fn gaussian(size: i32) -> Result<Self> {
        let side = validate_kernel_size(size)?;
        let k1d = gaussian_kernel_1d(side, sigma_for_size(side));

        let mut weights = Array2::<f32>::zeros((side, side));
        for y in 0..side {
            for x in 0..side {
                weights[[y, x]] = k1d[y] * k1d[x];
            }
        }
        Ok(Self { weights })
    }

    pub fn size(&self) -> usize {
        self.weights.dim().0
    }

    pub fn weights(&self) -> &Array2<f32> {
        &self.weights
    }

    pub fn sum(&self) -> f32 {
        self.weights.sum()
    }
}

/// Gaussian sigma implied by a kernel side length.
pub fn sigma_for_size(size: usize) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Generate a normalized 1D Gaussian of `size` taps.
pub fn gaussian_kernel_1d(size: usize, sigma: f32) -> Vec<f32> {
    let half = (size / 2) as f32;

    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    // Normalize
    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    kernel
}

/// Convolve every channel of `input` with `kernel`.
///
/// Output samples are rounded and saturated to 0-255.
pub fn apply_kernel(input: &PixelBuffer, kernel: &Kernel) -> Result<PixelBuffer> {
    let (height, width, channels) = input.view().dim();
    let src = input.view();
    let weights = kernel.weights();
    let half = (kernel.size() / 2) as isize;

    let mut output_flat = vec![0u8; height * width * channels];
    output_flat
        .par_chunks_mut(width * channels)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0.0f32;
                    for ((ky, kx), &w) in weights.indexed_iter() {
                        let sy = (y as isize + ky as isize - half).clamp(0, height as isize - 1) as usize;
                        let sx = (x as isize + kx as isize - half).clamp(0, width as isize - 1) as usize;
                        sum += src[[sy, sx, c]] as f32 * w;
                    }
                    row[x * channels + c] = sum.round().clamp(0.0, 255.0) as u8;
                }
            }
        });

    PixelBuffer::from_raw(width, height, channels, output_flat)
}
