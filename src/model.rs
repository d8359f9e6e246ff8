use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// One ingredient line of a recipe. `is_staple` is true only for pantry items
/// the model added beyond the user's list, which is permitted solely in the
/// third recipe of a batch.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRef {
    pub quantity: String,
    pub name: String,
    pub is_staple: bool,
}

/// Per-serving macros as magnitude+unit strings, e.g. "30g".
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NutritionInfo {
    pub protein: String,
    pub carbs: String,
    pub fats: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    #[serde(rename = "Very Easy")]
    VeryEasy,
    Easy,
    Medium,
    Hard,
    Expert,
}

/// A recipe as produced by the generative model; no identity yet.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub recipe_name: String,
    pub description: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: u32,
    pub calories: u32,
    pub difficulty: Difficulty,
    pub health_tip: String,
    pub nutrition: NutritionInfo,
    pub ingredients: Vec<IngredientRef>,
    pub instructions: Vec<String>,
}

/// A draft with a client-assigned id and, once resolved, an image URL (either a
/// generated data URI or a local fallback).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    #[serde(flatten)]
    pub draft: RecipeDraft,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Recipe {
    pub fn from_draft(id: String, draft: RecipeDraft) -> Self {
        Recipe {
            id,
            draft,
            image_url: None,
        }
    }
}

/// Encodes a recipe for embedding in a URL query parameter: JSON, then
/// URL-safe base64.
pub fn encode_recipe_for_url(recipe: &Recipe) -> Result<String, PipelineError> {
    let json = serde_json::to_string(recipe)
        .map_err(|e| PipelineError::MalformedResponse(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json.as_bytes()))
}

/// Inverse of [`encode_recipe_for_url`]; the round trip is lossless.
pub fn decode_recipe_from_url(encoded: &str) -> Result<Recipe, PipelineError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded.as_bytes())
        .map_err(|e| PipelineError::MalformedResponse(e.to_string()))?;
    let json = String::from_utf8(bytes)
        .map_err(|e| PipelineError::MalformedResponse(e.to_string()))?;
    serde_json::from_str(&json).map_err(|e| PipelineError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
pub(crate) fn sample_draft(name: &str) -> RecipeDraft {
    RecipeDraft {
        recipe_name: name.to_string(),
        description: "A bright, simple dish.".to_string(),
        prep_time: "10 minutes".to_string(),
        cook_time: "20 minutes".to_string(),
        servings: 2,
        calories: 450,
        difficulty: Difficulty::Easy,
        health_tip: "Steam instead of frying to keep it light.".to_string(),
        nutrition: NutritionInfo {
            protein: "30g".to_string(),
            carbs: "45g".to_string(),
            fats: "12g".to_string(),
        },
        ingredients: vec![IngredientRef {
            quantity: "1 cup".to_string(),
            name: "quinoa".to_string(),
            is_staple: false,
        }],
        instructions: vec!["Cook the quinoa.".to_string(), "Serve warm.".to_string()],
    }
}
