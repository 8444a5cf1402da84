//! Enhance Rust Core
//!
//! Pixel-transform engine for an interactive image enhancement tool:
//! brightness/contrast remapping, histogram equalization, convolution
//! (sharpen, Gaussian blur, box blur) and additive Gaussian noise.
//! Python bindings via PyO3 and WASM bindings for JavaScript are available
//! behind the `python` and `wasm` features.
//!
//! ## Image Format
//! Transforms operate on [`PixelBuffer`], an 8-bit (0-255) image with:
//! - **Grayscale**: (height, width, 1) - single channel
//! - **RGB**: (height, width, 3) - 3 color channels
//!
//! Loading, saving and displaying images is left to the caller; the engine
//! only sees decoded buffers.
//!
//! ## Errors
//! Every operation returns [`Result`]. Parameters are validated before any
//! output is allocated, and no transform modifies its input.

pub mod buffer;
pub mod dispatch;
pub mod error;
pub mod filters;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use buffer::PixelBuffer;
pub use dispatch::{
    default_session, dispatch, dispatch_lenient, dispatch_or_passthrough, Operation, Outcome,
    TransformParams, TransformRequest,
};
pub use error::{FilterError, Result};
pub use filters::convolve::Kernel;
pub use filters::grayscale::GrayscaleWeights;
pub use filters::histogram::HistogramTable;
pub use filters::noise::NoiseParameters;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::dispatch::{dispatch_lenient, TransformParams, TransformRequest};
    use crate::filters::{blur, color_adjust, grayscale, histogram, noise, sharpen as sharpen_mod};
    use crate::{FilterError, GrayscaleWeights, PixelBuffer};

    impl From<FilterError> for PyErr {
        fn from(err: FilterError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    fn to_buffer(image: PyReadonlyArray3<'_, u8>) -> PyResult<PixelBuffer> {
        Ok(PixelBuffer::from_array(image.as_array().to_owned())?)
    }

    fn to_numpy<'py>(py: Python<'py>, buffer: PixelBuffer) -> Bound<'py, PyArray3<u8>> {
        buffer.into_array().into_pyarray(py)
    }

    // ========================================================================
    // Pointwise
    // ========================================================================

    #[pyfunction]
    #[pyo3(signature = (image, alpha=1.2, beta=30))]
    pub fn brightness_contrast<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        alpha: f64,
        beta: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = to_buffer(image)?;
        let result = color_adjust::adjust_brightness_contrast(&input, alpha, beta)?;
        Ok(to_numpy(py, result))
    }

    /// Equalize a (H, W, 1) image. Raises ValueError for color or constant input.
    #[pyfunction]
    pub fn equalize_histogram<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = to_buffer(image)?;
        let result = histogram::equalize_histogram(&input)?;
        Ok(to_numpy(py, result))
    }

    #[pyfunction]
    #[pyo3(signature = (image, r_weight=0.299, g_weight=0.587, b_weight=0.114))]
    pub fn to_grayscale<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        r_weight: f32,
        g_weight: f32,
        b_weight: f32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = to_buffer(image)?;
        let weights = GrayscaleWeights::custom(r_weight, g_weight, b_weight);
        let result = grayscale::to_grayscale(&input, weights)?;
        Ok(to_numpy(py, result))
    }

    // ========================================================================
    // Convolution
    // ========================================================================

    #[pyfunction]
    #[pyo3(signature = (image, kernel_size=7))]
    pub fn gaussian_blur<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        kernel_size: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = to_buffer(image)?;
        let result = blur::gaussian_blur(&input, kernel_size)?;
        Ok(to_numpy(py, result))
    }

    #[pyfunction]
    #[pyo3(signature = (image, kernel_size=3))]
    pub fn box_blur<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        kernel_size: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = to_buffer(image)?;
        let result = blur::box_blur(&input, kernel_size)?;
        Ok(to_numpy(py, result))
    }

    #[pyfunction]
    pub fn sharpen<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = to_buffer(image)?;
        let result = sharpen_mod::sharpen(&input)?;
        Ok(to_numpy(py, result))
    }

    // ========================================================================
    // Noise
    // ========================================================================

    #[pyfunction]
    #[pyo3(signature = (image, mean=0.0, stddev=30.0, seed=None))]
    pub fn add_gaussian_noise<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        mean: f64,
        stddev: f64,
        seed: Option<u64>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = to_buffer(image)?;
        let result = match seed {
            Some(seed) => noise::add_gaussian_noise_seeded(&input, noise::NoiseParameters::new(mean, stddev), seed)?,
            None => noise::add_gaussian_noise(&input, mean, stddev)?,
        };
        Ok(to_numpy(py, result))
    }

    // ========================================================================
    // Dispatcher
    // ========================================================================

    /// Apply an operation by id, e.g. `apply_transform(img, "box-blur", kernel_size=5)`.
    ///
    /// An image the operation cannot handle is returned unchanged; bad
    /// parameters raise `ValueError`.
    #[pyfunction]
    #[pyo3(signature = (image, operation, alpha=1.2, beta=30, kernel_size=None, mean=0.0, stddev=30.0))]
    #[allow(clippy::too_many_arguments)]
    pub fn apply_transform<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        operation: &str,
        alpha: f64,
        beta: i32,
        kernel_size: Option<i32>,
        mean: f64,
        stddev: f64,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let params = TransformParams {
            alpha,
            beta,
            kernel_size,
            mean,
            stddev,
        };
        let request = TransformRequest::from_parts(operation, &params)?;
        let input = to_buffer(image)?;
        let result = dispatch_lenient(&request, &input)?;
        Ok(to_numpy(py, result))
    }

    #[pymodule]
    pub fn enhance_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Pointwise
        m.add_function(wrap_pyfunction!(brightness_contrast, m)?)?;
        m.add_function(wrap_pyfunction!(equalize_histogram, m)?)?;
        m.add_function(wrap_pyfunction!(to_grayscale, m)?)?;

        // Convolution
        m.add_function(wrap_pyfunction!(gaussian_blur, m)?)?;
        m.add_function(wrap_pyfunction!(box_blur, m)?)?;
        m.add_function(wrap_pyfunction!(sharpen, m)?)?;

        // Noise
        m.add_function(wrap_pyfunction!(add_gaussian_noise, m)?)?;

        // Dispatcher
        m.add_function(wrap_pyfunction!(apply_transform, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::enhance_rust;
