use tracing::debug;

use crate::api_connection::endpoints::{
    Content, GenerateContentRequest, GenerationConfig, Part, TEXT_MODEL,
};
use crate::api_connection::TextModel;
use crate::error::PipelineError;
use crate::prompt::{ingredient_scan_prompt, ingredient_scan_schema, Language};

/// Splits a `data:<mime>;base64,<payload>` URI into mime type and payload.
/// Only image mime types are accepted.
fn parse_data_uri(image_data: &str) -> Result<(&str, &str), PipelineError> {
    let rest = image_data
        .strip_prefix("data:")
        .ok_or(PipelineError::InvalidImageFormat)?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or(PipelineError::InvalidImageFormat)?;
    if !mime.starts_with("image/") || mime.len() <= "image/".len() || payload.is_empty() {
        return Err(PipelineError::InvalidImageFormat);
    }
    Ok((mime, payload))
}

/// Single-attempt client for identifying ingredients in a photo.
pub struct IngredientScanner<M> {
    backend: M,
    model: String,
}

impl<M: TextModel> IngredientScanner<M> {
    pub fn new(backend: M) -> Self {
        IngredientScanner {
            backend,
            model: TEXT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Identifies the food ingredients visible in a base64 data-URI image.
    /// The format check happens before any network call.
    pub async fn identify_ingredients(
        &self,
        image_data: &str,
        language: Language,
        error_message: Option<&str>,
    ) -> Result<Vec<String>, PipelineError> {
        let (mime, payload) = parse_data_uri(image_data)?;
        debug!(mime, "scanning image for ingredients");

        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::inline_data(mime, payload),
                Part::text(ingredient_scan_prompt(language)),
            ])],
            system_instruction: None,
            generation_config: Some(GenerationConfig::json_with_schema(
                ingredient_scan_schema(),
            )),
        };

        let response = self
            .backend
            .generate_content(&self.model, request)
            .await
            .map_err(|e| PipelineError::upstream(e, error_message))?;

        let text = response.text().map(str::trim).unwrap_or_default();
        if text.is_empty() {
            return Err(PipelineError::ModelEmptyResponse);
        }

        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| PipelineError::MalformedResponse(e.to_string()))?;
        let items = value.as_array().ok_or_else(|| {
            PipelineError::MalformedResponse("expected an array of ingredient names".to_string())
        })?;
        items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    PipelineError::MalformedResponse(
                        "expected every ingredient to be a string".to_string(),
                    )
                })
            })
            .collect()
    }
}
