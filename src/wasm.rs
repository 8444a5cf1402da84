//! WebAssembly exports for the transform engine.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images travel
//! as flat, row-major byte arrays of length `width * height * channels`
//! with 1 (gray) or 3 (RGB) channels. Errors surface as JS exceptions
//! carrying the error message.

use wasm_bindgen::prelude::*;

use crate::dispatch::{dispatch_lenient, TransformRequest};
use crate::filters::{blur, color_adjust, grayscale, histogram, noise, sharpen};
use crate::{FilterError, GrayscaleWeights, PixelBuffer};

fn js_error(err: FilterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_buffer(data: &[u8], width: usize, height: usize, channels: usize) -> Result<PixelBuffer, JsValue> {
    PixelBuffer::from_raw(width, height, channels, data.to_vec()).map_err(js_error)
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Apply a JSON-encoded request, e.g. `{"operation": "blur", "kernel_size": 5}`.
///
/// Inputs the operation cannot handle (color or constant images for
/// equalization) come back unchanged; bad parameters throw.
#[wasm_bindgen]
pub fn apply_transform_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    request_json: &str,
) -> Result<Vec<u8>, JsValue> {
    let request: TransformRequest =
        serde_json::from_str(request_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let input = to_buffer(data, width, height, channels)?;
    let result = dispatch_lenient(&request, &input).map_err(js_error)?;
    Ok(result.into_raw())
}

// ============================================================================
// Pointwise
// ============================================================================

#[wasm_bindgen]
pub fn brightness_contrast_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    alpha: f64,
    beta: i32,
) -> Result<Vec<u8>, JsValue> {
    let input = to_buffer(data, width, height, channels)?;
    let result = color_adjust::adjust_brightness_contrast(&input, alpha, beta).map_err(js_error)?;
    Ok(result.into_raw())
}

/// Equalize a single-channel image.
#[wasm_bindgen]
pub fn equalize_histogram_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    let input = to_buffer(data, width, height, 1)?;
    let result = histogram::equalize_histogram(&input).map_err(js_error)?;
    Ok(result.into_raw())
}

/// Convert RGB to a single BT.601 luma channel.
#[wasm_bindgen]
pub fn to_grayscale_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    let input = to_buffer(data, width, height, 3)?;
    let result = grayscale::to_grayscale(&input, GrayscaleWeights::default()).map_err(js_error)?;
    Ok(result.into_raw())
}

// ============================================================================
// Convolution
// ============================================================================

#[wasm_bindgen]
pub fn gaussian_blur_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel_size: i32,
) -> Result<Vec<u8>, JsValue> {
    let input = to_buffer(data, width, height, channels)?;
    let result = blur::gaussian_blur(&input, kernel_size).map_err(js_error)?;
    Ok(result.into_raw())
}

#[wasm_bindgen]
pub fn box_blur_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    kernel_size: i32,
) -> Result<Vec<u8>, JsValue> {
    let input = to_buffer(data, width, height, channels)?;
    let result = blur::box_blur(&input, kernel_size).map_err(js_error)?;
    Ok(result.into_raw())
}

#[wasm_bindgen]
pub fn sharpen_wasm(data: &[u8], width: usize, height: usize, channels: usize) -> Result<Vec<u8>, JsValue> {
    let input = to_buffer(data, width, height, channels)?;
    let result = sharpen::sharpen(&input).map_err(js_error)?;
    Ok(result.into_raw())
}

// ============================================================================
// Noise
// ============================================================================

/// Add Gaussian noise with an explicit seed (JS supplies its own entropy).
#[wasm_bindgen]
pub fn add_gaussian_noise_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    mean: f64,
    stddev: f64,
    seed: u64,
) -> Result<Vec<u8>, JsValue> {
    let input = to_buffer(data, width, height, channels)?;
    let params = noise::NoiseParameters::new(mean, stddev);
    let result = noise::add_gaussian_noise_seeded(&input, params, seed).map_err(js_error)?;
    Ok(result.into_raw())
}
