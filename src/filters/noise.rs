//! Additive Gaussian noise.
//!
//! Every sample of every channel receives an independent draw from
//! N(mean, stddev²); the sum is rounded and saturated to 0-255.
//!
//! The default entry point seeds from OS entropy, so two runs differ.
//! Pass an explicit seed or RNG for reproducible output.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::{FilterError, Result};

/// Mean and standard deviation of the noise distribution, in sample units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseParameters {
    pub mean: f64,
    pub stddev: f64,
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self { mean: 0.0, stddev: 30.0 }
    }
}

impl NoiseParameters {
    pub fn new(mean: f64, stddev: f64) -> Self {
        Self { mean, stddev }
    }

    /// Both values must be finite. A negative stddev describes the same
    /// distribution as its absolute value and is accepted.
    pub fn validate(&self) -> Result<()> {
        if !self.mean.is_finite() {
            return Err(FilterError::invalid("mean", format!("must be finite, got {}", self.mean)));
        }
        if !self.stddev.is_finite() {
            return Err(FilterError::invalid("stddev", format!("must be finite, got {}", self.stddev)));
        }
        Ok(())
    }
}

/// Draw one standard normal sample using the Box-Muller transform.
fn next_gaussian<R: Rng>(rng: &mut R) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-12);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Add Gaussian noise using an entropy-seeded generator.
pub fn add_gaussian_noise(input: &PixelBuffer, mean: f64, stddev: f64) -> Result<PixelBuffer> {
    let params = NoiseParameters::new(mean, stddev);
    params.validate()?;
    let mut rng = StdRng::from_entropy();
    add_gaussian_noise_with_rng(input, params, &mut rng)
}

/// Add Gaussian noise with a fixed seed (reproducible).
pub fn add_gaussian_noise_seeded(input: &PixelBuffer, params: NoiseParameters, seed: u64) -> Result<PixelBuffer> {
    let mut rng = StdRng::seed_from_u64(seed);
    add_gaussian_noise_with_rng(input, params, &mut rng)
}

/// Add Gaussian noise drawing from `rng`.
///
/// # Arguments
/// * `input` - Image with 1 or 3 channels
/// * `params` - Noise mean and standard deviation
/// * `rng` - Any random source
///
/// # Returns
/// Noisy image with same shape
pub fn add_gaussian_noise_with_rng<R: Rng>(
    input: &PixelBuffer,
    params: NoiseParameters,
    rng: &mut R,
) -> Result<PixelBuffer> {
    params.validate()?;

    let NoiseParameters { mean, stddev } = params;
    let samples: Vec<u8> = input
        .as_slice()
        .iter()
        .map(|&v| {
            let noisy = v as f64 + mean + stddev * next_gaussian(rng);
            noisy.round().clamp(0.0, 255.0) as u8
        })
        .collect();

    PixelBuffer::from_raw(input.width(), input.height(), input.channels(), samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient() -> PixelBuffer {
        let samples: Vec<u8> = (0..48u32).map(|i| (i * 5) as u8).collect();
        PixelBuffer::from_raw(4, 4, 3, samples).unwrap()
    }

    #[test]
    fn test_zero_stddev_applies_mean_uniformly() {
        let img = PixelBuffer::from_raw(4, 1, 1, vec![0, 100, 200, 250]).unwrap();
        let result = add_gaussian_noise(&img, 10.0, 0.0).unwrap();
        assert_eq!(result.as_slice(), &[10, 110, 210, 255]);
    }

    #[test]
    fn test_zero_noise_is_identity() {
        let img = gradient();
        assert_eq!(add_gaussian_noise(&img, 0.0, 0.0).unwrap(), img);
    }

    #[test]
    fn test_negative_mean_saturates_at_zero() {
        let img = PixelBuffer::from_raw(2, 1, 1, vec![5, 60]).unwrap();
        let result = add_gaussian_noise(&img, -20.0, 0.0).unwrap();
        assert_eq!(result.as_slice(), &[0, 40]);
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let img = gradient();
        let params = NoiseParameters::new(0.0, 30.0);
        let a = add_gaussian_noise_seeded(&img, params, 12345).unwrap();
        let b = add_gaussian_noise_seeded(&img, params, 12345).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, img);
    }

    #[test]
    fn test_noise_statistics() {
        let img = PixelBuffer::filled(64, 64, 1, 128).unwrap();
        let params = NoiseParameters::new(5.0, 10.0);
        let result = add_gaussian_noise_seeded(&img, params, 7).unwrap();

        let n = result.as_slice().len() as f64;
        let diffs: Vec<f64> = result.as_slice().iter().map(|&v| v as f64 - 128.0).collect();
        let mean = diffs.iter().sum::<f64>() / n;
        let var = diffs.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;

        assert!((mean - 5.0).abs() < 1.0, "mean {}", mean);
        assert!((var.sqrt() - 10.0).abs() < 1.0, "stddev {}", var.sqrt());
    }

    #[test]
    fn test_rejects_non_finite_parameters() {
        let img = gradient();
        assert!(matches!(
            add_gaussian_noise(&img, f64::NAN, 1.0),
            Err(FilterError::InvalidParameter { name: "mean", .. })
        ));
        assert!(matches!(
            add_gaussian_noise(&img, 0.0, f64::INFINITY),
            Err(FilterError::InvalidParameter { name: "stddev", .. })
        ));
    }
}
