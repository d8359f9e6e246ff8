use std::error::Error;
use std::fmt;

use crate::api_connection::ApiConnectionError;

/// Failures of the generation pipeline. Every variant carries (or renders to) a
/// human-readable message; nothing here is fatal to the process, callers degrade
/// to partial results.
#[derive(Debug)]
pub enum PipelineError {
    /// No ingredients supplied; checked before any network call.
    EmptyInput,
    /// The model returned a blank payload.
    ModelEmptyResponse,
    /// The payload did not parse as the expected shape.
    MalformedResponse(String),
    /// Scan input was not a `data:<mime>;base64,<payload>` string.
    InvalidImageFormat,
    /// Upstream signalled quota exhaustion; carries the upstream message.
    QuotaExceeded(String),
    /// All image attempts were consumed without a usable result.
    ImageGenerationFailed,
    /// Transport or API failure, wrapped with a human-readable message.
    Upstream {
        message: String,
        source: ApiConnectionError,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::EmptyInput => {
                write!(f, "Please provide at least one ingredient.")
            }
            PipelineError::ModelEmptyResponse => {
                write!(f, "The AI model returned an empty response. Please try again.")
            }
            PipelineError::MalformedResponse(detail) => {
                write!(f, "The AI model returned an invalid format: {}", detail)
            }
            PipelineError::InvalidImageFormat => write!(f, "Invalid image format."),
            PipelineError::QuotaExceeded(message) => write!(f, "{}", message),
            PipelineError::ImageGenerationFailed => {
                write!(f, "Failed to create image after multiple retries.")
            }
            PipelineError::Upstream { message, .. } => write!(f, "{}", message),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Upstream { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl PipelineError {
    /// Wraps a transport/API failure with the caller's message, or a default
    /// rendering of the underlying error when none is supplied.
    pub fn upstream(source: ApiConnectionError, message: Option<&str>) -> Self {
        let message = match message {
            Some(m) => m.to_string(),
            None => source.to_string(),
        };
        PipelineError::Upstream { message, source }
    }
}
