//! Pixel transforms.
//!
//! ## Supported Formats
//!
//! Every filter accepts a [`PixelBuffer`](crate::PixelBuffer) with 1 or 3
//! channels of 8-bit samples. Histogram equalization is the exception: it is
//! defined for grayscale only, so color input goes through
//! [`grayscale::to_grayscale`] first.
//!
//! ## Architecture
//!
//! All filters follow these principles:
//! - **Pure** - the input is borrowed, a new buffer is returned
//! - **Saturating** - results are rounded and clamped to 0-255, never wrapped
//! - **Validate first** - parameters are checked before any allocation
//!
//! ## Filter Categories
//!
//! - **Pointwise**: brightness/contrast, histogram equalization, grayscale
//! - **Convolution**: sharpen, Gaussian blur, box blur
//! - **Noise**: additive Gaussian noise

pub mod blur;
pub mod color_adjust;
pub mod convolve;
pub mod grayscale;
pub mod histogram;
pub mod noise;
pub mod sharpen;
