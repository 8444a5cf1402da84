//! Error taxonomy shared by every transform and the dispatcher.

use thiserror::Error;

/// Recoverable failure of a pixel transform.
///
/// Validation happens before any output buffer is allocated, so an error
/// never comes with a partially written image.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    /// Malformed or out-of-policy parameter (even kernel size, zero dimension, ...).
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The operation is not defined for this channel layout.
    #[error("unsupported input shape: {channels} channel(s)")]
    UnsupportedInputShape { channels: usize },

    /// The input carries no information the operation can work with.
    #[error("degenerate input: {reason}")]
    DegenerateInput { reason: &'static str },
}

impl FilterError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        FilterError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Whether the legacy policy hands the input back unchanged for this error.
    ///
    /// Shape and degenerate-input refusals keep a pipeline running; invalid
    /// parameters abort the operation.
    pub fn preserves_input(&self) -> bool {
        matches!(
            self,
            FilterError::UnsupportedInputShape { .. } | FilterError::DegenerateInput { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_parameter() {
        let err = FilterError::invalid("kernel_size", "must be odd, got 4");
        assert_eq!(
            err.to_string(),
            "invalid parameter `kernel_size`: must be odd, got 4"
        );
    }

    #[test]
    fn test_preserves_input_policy() {
        assert!(FilterError::UnsupportedInputShape { channels: 3 }.preserves_input());
        assert!(FilterError::DegenerateInput { reason: "constant image" }.preserves_input());
        assert!(!FilterError::invalid("alpha", "not finite").preserves_input());
    }
}
