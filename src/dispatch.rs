//! Operation selection.
//!
//! Maps an operation id plus a parameter set onto one of the filters. There is
//! no state between calls: each dispatch is a function of
//! (request, input) to (output | error).
//!
//! Requests can be built from loose parts (an id string and
//! [`TransformParams`], as a menu or command line supplies them) or
//! deserialized directly:
//!
//! ```
//! use enhance_rust::TransformRequest;
//!
//! let request: TransformRequest =
//!     serde_json::from_str(r#"{"operation": "box-blur", "kernel_size": 5}"#).unwrap();
//! assert_eq!(request, TransformRequest::BoxBlur { kernel_size: 5 });
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::buffer::PixelBuffer;
use crate::error::{FilterError, Result};
use crate::filters::blur::{box_blur, gaussian_blur, validate_box_blur_size};
use crate::filters::color_adjust::adjust_brightness_contrast;
use crate::filters::convolve::validate_kernel_size;
use crate::filters::histogram::equalize_histogram;
use crate::filters::noise::{add_gaussian_noise, NoiseParameters};
use crate::filters::sharpen::sharpen;

/// Operation ids a caller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    BrightnessContrast,
    HistogramEqualize,
    Blur,
    Sharpen,
    Noise,
    BoxBlur,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::BrightnessContrast,
        Operation::HistogramEqualize,
        Operation::Blur,
        Operation::Sharpen,
        Operation::Noise,
        Operation::BoxBlur,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Operation::BrightnessContrast => "brightness-contrast",
            Operation::HistogramEqualize => "histogram-equalize",
            Operation::Blur => "blur",
            Operation::Sharpen => "sharpen",
            Operation::Noise => "noise",
            Operation::BoxBlur => "box-blur",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Operation {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        let id = s.trim();
        Operation::ALL
            .into_iter()
            .find(|op| op.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| FilterError::invalid("operation", format!("unknown operation `{}`", id)))
    }
}

/// Loose parameter set, as collected by a prompt or command line.
///
/// Missing fields fall back to the defaults of the classic demo run:
/// alpha 1.2, beta 30, Gaussian kernel 7, box kernel 3, noise N(0, 30).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParams {
    pub alpha: f64,
    pub beta: i32,
    pub kernel_size: Option<i32>,
    pub mean: f64,
    pub stddev: f64,
}

pub const DEFAULT_BLUR_KERNEL: i32 = 7;
pub const DEFAULT_BOX_KERNEL: i32 = 3;

impl Default for TransformParams {
    fn default() -> Self {
        let noise = NoiseParameters::default();
        Self {
            alpha: 1.2,
            beta: 30,
            kernel_size: None,
            mean: noise.mean,
            stddev: noise.stddev,
        }
    }
}

/// A fully parameterized operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "kebab-case")]
pub enum TransformRequest {
    BrightnessContrast { alpha: f64, beta: i32 },
    HistogramEqualize,
    Blur { kernel_size: i32 },
    Sharpen,
    Noise { mean: f64, stddev: f64 },
    BoxBlur { kernel_size: i32 },
}

impl TransformRequest {
    /// Parse an operation id and pick the parameters it needs.
    pub fn from_parts(operation: &str, params: &TransformParams) -> Result<Self> {
        Ok(Self::for_operation(operation.parse()?, params))
    }

    pub fn for_operation(operation: Operation, params: &TransformParams) -> Self {
        match operation {
            Operation::BrightnessContrast => TransformRequest::BrightnessContrast {
                alpha: params.alpha,
                beta: params.beta,
            },
            Operation::HistogramEqualize => TransformRequest::HistogramEqualize,
            Operation::Blur => TransformRequest::Blur {
                kernel_size: params.kernel_size.unwrap_or(DEFAULT_BLUR_KERNEL),
            },
            Operation::Sharpen => TransformRequest::Sharpen,
            Operation::Noise => TransformRequest::Noise {
                mean: params.mean,
                stddev: params.stddev,
            },
            Operation::BoxBlur => TransformRequest::BoxBlur {
                kernel_size: params.kernel_size.unwrap_or(DEFAULT_BOX_KERNEL),
            },
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            TransformRequest::BrightnessContrast { .. } => Operation::BrightnessContrast,
            TransformRequest::HistogramEqualize => Operation::HistogramEqualize,
            TransformRequest::Blur { .. } => Operation::Blur,
            TransformRequest::Sharpen => Operation::Sharpen,
            TransformRequest::Noise { .. } => Operation::Noise,
            TransformRequest::BoxBlur { .. } => Operation::BoxBlur,
        }
    }

    /// Check parameter ranges without touching any image.
    pub fn validate(&self) -> Result<()> {
        match *self {
            TransformRequest::BrightnessContrast { alpha, .. } => {
                if !alpha.is_finite() {
                    return Err(FilterError::invalid("alpha", format!("must be finite, got {}", alpha)));
                }
            }
            TransformRequest::Blur { kernel_size } => {
                validate_kernel_size(kernel_size)?;
            }
            TransformRequest::BoxBlur { kernel_size } => {
                validate_box_blur_size(kernel_size)?;
            }
            TransformRequest::Noise { mean, stddev } => {
                NoiseParameters::new(mean, stddev).validate()?;
            }
            TransformRequest::HistogramEqualize | TransformRequest::Sharpen => {}
        }
        Ok(())
    }

    fn apply(&self, input: &PixelBuffer) -> Result<PixelBuffer> {
        match *self {
            TransformRequest::BrightnessContrast { alpha, beta } => adjust_brightness_contrast(input, alpha, beta),
            TransformRequest::HistogramEqualize => equalize_histogram(input),
            TransformRequest::Blur { kernel_size } => gaussian_blur(input, kernel_size),
            TransformRequest::Sharpen => sharpen(input),
            TransformRequest::Noise { mean, stddev } => add_gaussian_noise(input, mean, stddev),
            TransformRequest::BoxBlur { kernel_size } => box_blur(input, kernel_size),
        }
    }
}

/// Result of a lenient dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The transform ran.
    Applied(PixelBuffer),
    /// The transform refused the input; `image` is a copy of it.
    Unchanged { image: PixelBuffer, reason: FilterError },
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn image(&self) -> &PixelBuffer {
        match self {
            Outcome::Applied(image) | Outcome::Unchanged { image, .. } => image,
        }
    }

    pub fn into_image(self) -> PixelBuffer {
        match self {
            Outcome::Applied(image) | Outcome::Unchanged { image, .. } => image,
        }
    }
}

/// Run one operation. Every refusal comes back as an `Err`.
pub fn dispatch(request: &TransformRequest, input: &PixelBuffer) -> Result<PixelBuffer> {
    debug!(
        operation = %request.operation(),
        width = input.width(),
        height = input.height(),
        channels = input.channels(),
        "dispatching transform"
    );

    if let Err(err) = request.validate() {
        warn!(operation = %request.operation(), error = %err, "rejected transform request");
        return Err(err);
    }

    request.apply(input).inspect_err(|err| {
        warn!(operation = %request.operation(), error = %err, "transform failed");
    })
}

/// Run one operation, passing the input through when it is refused for
/// shape or degenerate-content reasons. Invalid parameters remain errors.
pub fn dispatch_or_passthrough(request: &TransformRequest, input: &PixelBuffer) -> Result<Outcome> {
    match dispatch(request, input) {
        Ok(image) => Ok(Outcome::Applied(image)),
        Err(reason) if reason.preserves_input() => Ok(Outcome::Unchanged {
            image: input.clone(),
            reason,
        }),
        Err(err) => Err(err),
    }
}

/// Like [`dispatch_or_passthrough`], but flattened to the output image for
/// bindings that hand back pixels only. A passthrough is logged with its reason.
pub fn dispatch_lenient(request: &TransformRequest, input: &PixelBuffer) -> Result<PixelBuffer> {
    let outcome = dispatch_or_passthrough(request, input)?;
    if let Outcome::Unchanged { reason, .. } = &outcome {
        warn!(operation = %request.operation(), reason = %reason, "returning input unchanged");
    }
    Ok(outcome.into_image())
}

/// The demo sequence: brightness/contrast, equalization, blur, sharpen, noise,
/// each with its default parameters.
pub fn default_session() -> Vec<TransformRequest> {
    let params = TransformParams::default();
    [
        Operation::BrightnessContrast,
        Operation::HistogramEqualize,
        Operation::Blur,
        Operation::Sharpen,
        Operation::Noise,
    ]
    .into_iter()
    .map(|op| TransformRequest::for_operation(op, &params))
    .collect()
}
