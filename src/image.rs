use std::time::Duration;

use tracing::{debug, warn};

use crate::api_connection::endpoints::{GenerateImagesRequest, IMAGE_MODEL};
use crate::api_connection::{ApiConnectionError, ImageModel};
use crate::error::PipelineError;
use crate::prompt::image_prompt;
use crate::retry::{doubling_backoff, retry};

pub const MAX_ATTEMPTS: u32 = 3;
pub const BASE_DELAY: Duration = Duration::from_millis(1000);

/// True when the error signals quota exhaustion: HTTP 429, or a Google error
/// body carrying `status: "RESOURCE_EXHAUSTED"` or `code: 429`. Waiting does
/// not cure these, so the retry loop gives up immediately.
pub fn is_quota_error(err: &ApiConnectionError) -> bool {
    match err {
        ApiConnectionError::ApiError { status, error_body } => {
            if *status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return true;
            }
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(error_body) {
                let detail = value.get("error").unwrap_or(&value);
                if detail.get("status").and_then(|s| s.as_str()) == Some("RESOURCE_EXHAUSTED") {
                    return true;
                }
                if detail.get("code").and_then(serde_json::Value::as_u64) == Some(429) {
                    return true;
                }
            }
            error_body.contains("RESOURCE_EXHAUSTED")
        }
        _ => false,
    }
}

/// Pulls the upstream `error.message` out of a quota failure for display.
fn quota_message(err: &ApiConnectionError) -> String {
    if let ApiConnectionError::ApiError { error_body, .. } = err {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(error_body) {
            let detail = value.get("error").unwrap_or(&value);
            if let Some(message) = detail.get("message").and_then(|m| m.as_str()) {
                return message.to_string();
            }
        }
    }
    "You have exceeded your API quota.".to_string()
}

/// Image-generation client: up to three attempts with 1000/2000ms backoff and
/// an immediate abort on quota exhaustion.
pub struct ImageGenerator<M> {
    backend: M,
    model: String,
    max_attempts: u32,
    base_delay: Duration,
    quota_check: fn(&ApiConnectionError) -> bool,
}

impl<M: ImageModel> ImageGenerator<M> {
    pub fn new(backend: M) -> Self {
        ImageGenerator {
            backend,
            model: IMAGE_MODEL.to_string(),
            max_attempts: MAX_ATTEMPTS,
            base_delay: BASE_DELAY,
            quota_check: is_quota_error,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Replaces the quota classifier; used by tests and callers with
    /// provider-specific error bodies.
    pub fn with_quota_check(mut self, quota_check: fn(&ApiConnectionError) -> bool) -> Self {
        self.quota_check = quota_check;
        self
    }

    /// Generates one illustrative image and returns it as a
    /// `data:<mime>;base64,...` URI.
    pub async fn generate_image(
        &self,
        recipe_name: &str,
        description: &str,
    ) -> Result<String, PipelineError> {
        let prompt = image_prompt(recipe_name, description);

        let result = retry(
            |attempt| {
                debug!(recipe_name, attempt, "requesting image");
                self.attempt(&prompt)
            },
            self.max_attempts,
            doubling_backoff(self.base_delay),
            |err| (self.quota_check)(err),
        )
        .await;

        match result {
            Ok(url) => Ok(url),
            Err(err) if (self.quota_check)(&err) => {
                warn!(recipe_name, "image generation hit quota, not retrying");
                Err(PipelineError::QuotaExceeded(quota_message(&err)))
            }
            Err(err) => {
                warn!(recipe_name, %err, "image generation exhausted retries");
                Err(PipelineError::ImageGenerationFailed)
            }
        }
    }

    async fn attempt(&self, prompt: &str) -> Result<String, ApiConnectionError> {
        let request = GenerateImagesRequest::single(prompt);
        let response = self.backend.generate_images(&self.model, request).await?;

        let prediction = response.predictions.into_iter().next().ok_or_else(|| {
            ApiConnectionError::ApiError {
                status: reqwest::StatusCode::NO_CONTENT,
                error_body: "No image was generated by the API.".to_string(),
            }
        })?;

        let mime = prediction
            .mime_type
            .unwrap_or_else(|| "image/jpeg".to_string());
        Ok(format!(
            "data:{};base64,{}",
            mime, prediction.bytes_base64_encoded
        ))
    }
}
