use thiserror::Error;

/// Structurally invalid parameter input. Out-of-range numeric values are
/// never reported here; they are clamped at the store boundary instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("field `{field}` expects 1 or {expected} values, got {got}")]
    BatchShape {
        field: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("field `{field}` must be a finite number")]
    NonFinite { field: &'static str },
}

/// Mismatched module wiring or an invalid engine configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("{0} must be positive")]
    NonPositive(&'static str),
    #[error("mixer wired for {expected} inputs, got {got}")]
    InputCountMismatch { expected: usize, got: usize },
    #[error("buffer shape mismatch: expected {expected_batch}x{expected_samples}, got {got_batch}x{got_samples}")]
    ShapeMismatch {
        expected_batch: usize,
        expected_samples: usize,
        got_batch: usize,
        got_samples: usize,
    },
    #[error("mixer weight {index} is negative ({weight})")]
    NegativeWeight { index: usize, weight: f32 },
}

/// A render aborted mid-flight. No partial buffer is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("non-finite sample at voice {batch}, sample {index}")]
    NonFiniteSample { batch: usize, index: usize },
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
