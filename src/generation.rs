use tracing::debug;

use crate::api_connection::endpoints::{
    Content, GenerateContentRequest, GenerationConfig, Part, TEXT_MODEL,
};
use crate::api_connection::TextModel;
use crate::error::PipelineError;
use crate::model::RecipeDraft;
use crate::prompt::{
    recipe_response_schema, recipe_system_instruction, recipe_user_prompt, Language,
};

/// Every generation batch asks for, and must receive, exactly this many recipes.
pub const EXPECTED_RECIPE_COUNT: usize = 3;

/// Upper bound on added pantry staples in the third (creative) recipe.
pub const MAX_CREATIVE_STAPLES: usize = 3;

/// Single-attempt client for the recipe-generation call.
pub struct RecipeGenerator<M> {
    backend: M,
    model: String,
}

impl<M: TextModel> RecipeGenerator<M> {
    pub fn new(backend: M) -> Self {
        RecipeGenerator {
            backend,
            model: TEXT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Generates exactly three recipe drafts for the given ingredients, with
    /// all text in `language`. `error_message` overrides the wording of
    /// transport failures surfaced to the caller.
    pub async fn generate_recipes(
        &self,
        ingredients: &[String],
        language: Language,
        error_message: Option<&str>,
    ) -> Result<Vec<RecipeDraft>, PipelineError> {
        if ingredients.is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text(recipe_user_prompt(
                ingredients,
                language,
            ))])],
            system_instruction: Some(Content::system(recipe_system_instruction())),
            generation_config: Some(GenerationConfig::json_with_schema(
                recipe_response_schema(),
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
        debug!(len = text.len(), "received recipe payload");

        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| PipelineError::MalformedResponse(e.to_string()))?;
        if !value.is_array() {
            return Err(PipelineError::MalformedResponse(
                "expected an array of recipes".to_string(),
            ));
        }
        let drafts: Vec<RecipeDraft> = serde_json::from_value(value)
            .map_err(|e| PipelineError::MalformedResponse(e.to_string()))?;

        validate_drafts(&drafts)?;
        Ok(drafts)
    }
}

/// Checks the batch-level invariants: exactly three complete drafts, no staples
/// in the first two recipes, at most three in the third.
pub fn validate_drafts(drafts: &[RecipeDraft]) -> Result<(), PipelineError> {
    if drafts.len() != EXPECTED_RECIPE_COUNT {
        return Err(PipelineError::MalformedResponse(format!(
            "expected {} recipes, got {}",
            EXPECTED_RECIPE_COUNT,
            drafts.len()
        )));
    }

    for (index, draft) in drafts.iter().enumerate() {
        validate_draft_fields(index, draft)?;

        let staples = draft.ingredients.iter().filter(|i| i.is_staple).count();
        if index < 2 && staples > 0 {
            return Err(PipelineError::MalformedResponse(format!(
                "recipe {} marks {} staple(s); only the third recipe may add staples",
                index + 1,
                staples
            )));
        }
        if index == 2 && staples > MAX_CREATIVE_STAPLES {
            return Err(PipelineError::MalformedResponse(format!(
                "third recipe adds {} staples, at most {} allowed",
                staples, MAX_CREATIVE_STAPLES
            )));
        }
    }
    Ok(())
}

fn validate_draft_fields(index: usize, draft: &RecipeDraft) -> Result<(), PipelineError> {
    let text_fields = [
        ("recipeName", &draft.recipe_name),
        ("description", &draft.description),
        ("prepTime", &draft.prep_time),
        ("cookTime", &draft.cook_time),
        ("healthTip", &draft.health_tip),
        ("nutrition.protein", &draft.nutrition.protein),
        ("nutrition.carbs", &draft.nutrition.carbs),
        ("nutrition.fats", &draft.nutrition.fats),
    ];
    for (field, value) in text_fields {
        if value.trim().is_empty() {
            return Err(PipelineError::MalformedResponse(format!(
                "recipe {} has an empty '{}' field",
                index + 1,
                field
            )));
        }
    }
    if draft.servings == 0 {
        return Err(PipelineError::MalformedResponse(format!(
            "recipe {} has zero servings",
            index + 1
        )));
    }
    if draft.ingredients.is_empty() {
        return Err(PipelineError::MalformedResponse(format!(
            "recipe {} lists no ingredients",
            index + 1
        )));
    }
    if draft.instructions.iter().all(|s| s.trim().is_empty()) || draft.instructions.is_empty() {
        return Err(PipelineError::MalformedResponse(format!(
            "recipe {} has no instructions",
            index + 1
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{sample_draft, IngredientRef};
    use crate::testing::{text_response, FakeTextModel};

    fn three_valid_drafts() -> Vec<RecipeDraft> {
        vec![
            sample_draft("Quinoa Bowl"),
            sample_draft("Chicken Skillet"),
            sample_draft("Creative Broccoli Bake"),
        ]
    }

    #[tokio::test]
    async fn empty_ingredient_list_fails_before_any_call() {
        let backend = FakeTextModel::default();
        let generator = RecipeGenerator::new(backend.clone());
        let result = generator.generate_recipes(&[], Language::En, None).await;
        assert!(matches!(result, Err(PipelineError::EmptyInput)));
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn blank_payload_is_model_empty_response() {
        let backend = FakeTextModel::with_responses(vec![Ok(text_response("   "))]);
        let generator = RecipeGenerator::new(backend);
        let result = generator
            .generate_recipes(&["Quinoa".to_string()], Language::En, None)
            .await;
        assert!(matches!(result, Err(PipelineError::ModelEmptyResponse)));
    }

    #[tokio::test]
    async fn non_array_payload_is_malformed() {
        let backend =
            FakeTextModel::with_responses(vec![Ok(text_response("{\"recipes\": []}"))]);
        let generator = RecipeGenerator::new(backend);
        let result = generator
            .generate_recipes(&["Quinoa".to_string()], Language::En, None)
            .await;
        assert!(matches!(result, Err(PipelineError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn two_recipes_instead_of_three_is_malformed() {
        let drafts = vec![sample_draft("A"), sample_draft("B")];
        let payload = serde_json::to_string(&drafts).unwrap();
        let backend = FakeTextModel::with_responses(vec![Ok(text_response(&payload))]);
        let generator = RecipeGenerator::new(backend);
        let result = generator
            .generate_recipes(&["Quinoa".to_string()], Language::En, None)
            .await;
        assert!(matches!(result, Err(PipelineError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn valid_batch_parses_into_three_drafts() {
        let payload = serde_json::to_string(&three_valid_drafts()).unwrap();
        let backend = FakeTextModel::with_responses(vec![Ok(text_response(&payload))]);
        let generator = RecipeGenerator::new(backend);
        let drafts = generator
            .generate_recipes(
                &["Chicken Breast".to_string(), "Broccoli".to_string()],
                Language::En,
                None,
            )
            .await
            .unwrap();
        assert_eq!(drafts.len(), EXPECTED_RECIPE_COUNT);
        assert_eq!(drafts[0].recipe_name, "Quinoa Bowl");
    }

    #[test]
    fn staple_in_first_recipe_is_rejected() {
        let mut drafts = three_valid_drafts();
        drafts[0].ingredients.push(IngredientRef {
            quantity: "1 tbsp".to_string(),
            name: "olive oil".to_string(),
            is_staple: true,
        });
        assert!(matches!(
            validate_drafts(&drafts),
            Err(PipelineError::MalformedResponse(_))
        ));
    }

    #[test]
    fn third_recipe_may_add_up_to_three_staples() {
        let mut drafts = three_valid_drafts();
        for name in ["olive oil", "salt", "pepper"] {
            drafts[2].ingredients.push(IngredientRef {
                quantity: "to taste".to_string(),
                name: name.to_string(),
                is_staple: true,
            });
        }
        assert!(validate_drafts(&drafts).is_ok());

        drafts[2].ingredients.push(IngredientRef {
            quantity: "1 tsp".to_string(),
            name: "cumin".to_string(),
            is_staple: true,
        });
        assert!(matches!(
            validate_drafts(&drafts),
            Err(PipelineError::MalformedResponse(_))
        ));
    }

    #[test]
    fn empty_required_field_is_rejected() {
        let mut drafts = three_valid_drafts();
        drafts[1].health_tip = "  ".to_string();
        assert!(matches!(
            validate_drafts(&drafts),
            Err(PipelineError::MalformedResponse(_))
        ));
    }
}
