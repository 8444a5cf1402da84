//! Histogram equalization for grayscale images.
//!
//! Intensities are remapped through the normalized cumulative distribution
//! of the image's own histogram, spreading the occupied levels over 0-255.
//! Color images must be converted with [`super::grayscale::to_grayscale`]
//! first.

use tracing::warn;

use crate::buffer::PixelBuffer;
use crate::error::{FilterError, Result};

/// Frequency counts and running totals for one grayscale image.
#[derive(Debug, Clone)]
pub struct HistogramTable {
    pub counts: [u32; 256],
    pub cdf: [u32; 256],
}

impl HistogramTable {
    /// Count the samples of a single-channel buffer.
    pub fn from_grayscale(input: &PixelBuffer) -> Result<Self> {
        if !input.is_grayscale() {
            return Err(FilterError::UnsupportedInputShape {
                channels: input.channels(),
            });
        }

        let mut counts = [0u32; 256];
        for &v in input.view().iter() {
            counts[v as usize] += 1;
        }

        let mut cdf = [0u32; 256];
        let mut running = 0u32;
        for (acc, &count) in cdf.iter_mut().zip(counts.iter()) {
            running += count;
            *acc = running;
        }

        Ok(Self { counts, cdf })
    }

    pub fn total(&self) -> u32 {
        self.cdf[255]
    }

    /// Cumulative count at the first occupied level.
    pub fn cdf_min(&self) -> u32 {
        self.cdf.iter().copied().find(|&c| c > 0).unwrap_or(0)
    }

    /// Level mapping `(cdf[i] - cdf_min) * 255 / (total - cdf_min)`.
    ///
    /// Returns `None` when every pixel shares one level and the denominator
    /// would be zero.
    pub fn equalization_lut(&self) -> Option<[u8; 256]> {
        let total = self.total() as u64;
        let cdf_min = self.cdf_min() as u64;
        if total == cdf_min {
            return None;
        }

        let range = total - cdf_min;
        let mut lut = [0u8; 256];
        for (out, &c) in lut.iter_mut().zip(self.cdf.iter()) {
            // Levels below the first occupied one never occur in the image.
            let c = (c as u64).max(cdf_min);
            *out = ((c - cdf_min) * 255 / range) as u8;
        }
        Some(lut)
    }
}

/// Equalize the histogram of a grayscale image.
///
/// # Errors
/// * `UnsupportedInputShape` - input has more than one channel
/// * `DegenerateInput` - input is a single constant intensity
pub fn equalize_histogram(input: &PixelBuffer) -> Result<PixelBuffer> {
    let table = match HistogramTable::from_grayscale(input) {
        Ok(table) => table,
        Err(err) => {
            warn!(
                channels = input.channels(),
                "histogram equalization works only on grayscale images"
            );
            return Err(err);
        }
    };

    match table.equalization_lut() {
        Some(lut) => Ok(input.map_lut(&lut)),
        None => {
            warn!("histogram equalization skipped: image has a single intensity");
            Err(FilterError::DegenerateInput {
                reason: "image has a single intensity level",
            })
        }
    }
}
