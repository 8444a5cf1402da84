//! Pixel buffer shared by all transforms.
//!
//! ## Layout
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W, 1) | u8 | Single luminance channel, 0-255 |
//! | RGB8 | (H, W, 3) | u8 | Red, green, blue, 0-255 |
//!
//! Samples are stored row-major. Transforms borrow the input and always
//! return a freshly allocated buffer.

use ndarray::{Array3, ArrayView3};

use crate::error::{FilterError, Result};

/// An 8-bit image with one or three channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Array3<u8>,
}

impl PixelBuffer {
    /// Zero-filled buffer.
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self> {
        Self::filled(width, height, channels, 0)
    }

    /// Buffer with every sample set to `value`.
    pub fn filled(width: usize, height: usize, channels: usize, value: u8) -> Result<Self> {
        validate_shape(width, height, channels)?;
        Ok(Self {
            data: Array3::from_elem((height, width, channels), value),
        })
    }

    /// Wrap interleaved row-major samples.
    pub fn from_raw(width: usize, height: usize, channels: usize, samples: Vec<u8>) -> Result<Self> {
        validate_shape(width, height, channels)?;
        let expected = width * height * channels;
        if samples.len() != expected {
            return Err(FilterError::invalid(
                "samples",
                format!("expected {} bytes for {}x{}x{}, got {}", expected, width, height, channels, samples.len()),
            ));
        }
        let data = Array3::from_shape_vec((height, width, channels), samples)
            .map_err(|e| FilterError::invalid("samples", e.to_string()))?;
        Ok(Self { data })
    }

    /// Wrap an existing (height, width, channels) array.
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let (height, width, channels) = data.dim();
        validate_shape(width, height, channels)?;
        if data.is_standard_layout() {
            Ok(Self { data })
        } else {
            Ok(Self {
                data: data.as_standard_layout().into_owned(),
            })
        }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    pub fn is_grayscale(&self) -> bool {
        self.channels() == 1
    }

    /// Sample at (row, col, channel), `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<u8> {
        self.data.get([row, col, channel]).copied()
    }

    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    /// Interleaved samples in row-major order.
    pub fn as_slice(&self) -> &[u8] {
        // Constructors only produce standard-layout arrays.
        self.data.as_slice().unwrap_or_default()
    }

    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data.into_raw_vec_and_offset().0
    }

    /// Apply `f` to every sample, producing a new buffer of the same shape.
    pub fn map_samples(&self, f: impl Fn(u8) -> u8) -> Self {
        Self {
            data: self.data.mapv(f),
        }
    }

    /// Remap every sample through a 256-entry lookup table.
    pub fn map_lut(&self, lut: &[u8; 256]) -> Self {
        self.map_samples(|v| lut[v as usize])
    }
}

fn validate_shape(width: usize, height: usize, channels: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(FilterError::invalid(
            "dimensions",
            format!("width and height must be positive, got {}x{}", width, height),
        ));
    }
    if channels != 1 && channels != 3 {
        return Err(FilterError::invalid(
            "channels",
            format!("expected 1 or 3 channels, got {}", channels),
        ));
    }
    Ok(())
}
