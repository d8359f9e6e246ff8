use tracing::{info, warn};
use uuid::Uuid;

use crate::api_connection::{ImageModel, TextModel};
use crate::error::PipelineError;
use crate::fallback::fallback_image_url;
use crate::generation::RecipeGenerator;
use crate::image::ImageGenerator;
use crate::model::Recipe;
use crate::prompt::Language;

/// Where a generation batch currently stands. Image resolution is strictly
/// sequential, so `PerRecipe(i)` fully identifies the in-flight work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Generating,
    PerRecipe(usize),
    Done,
    Aborted,
}

/// Result of one generation batch. `image_error` holds the first image failure
/// message, if any; the recipes themselves always come back complete, with a
/// fallback image standing in wherever generation failed.
#[derive(Debug)]
pub struct GenerationBatch {
    pub recipes: Vec<Recipe>,
    pub image_error: Option<String>,
}

/// Sequences one recipe-generation call and then per-recipe image generation
/// in list order. Sequential on purpose: a quota failure stops the remaining
/// image requests before they are issued.
pub struct Orchestrator<T, I> {
    generator: RecipeGenerator<T>,
    imager: ImageGenerator<I>,
    phase: Phase,
}

impl<T: TextModel, I: ImageModel> Orchestrator<T, I> {
    pub fn new(generator: RecipeGenerator<T>, imager: ImageGenerator<I>) -> Self {
        Orchestrator {
            generator,
            imager,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Runs a full batch. The caller must not start a new batch while one is
    /// in flight; a new call simply produces a fresh list (last write wins).
    pub async fn run(
        &mut self,
        ingredients: &[String],
        language: Language,
        error_message: Option<&str>,
        progress: impl Fn(String) + Send + Sync,
    ) -> Result<GenerationBatch, PipelineError> {
        self.phase = Phase::Generating;
        progress("Generating recipes...".to_string());

        let drafts = match self
            .generator
            .generate_recipes(ingredients, language, error_message)
            .await
        {
            Ok(drafts) => drafts,
            Err(err) => {
                self.phase = Phase::Idle;
                return Err(err);
            }
        };

        // Ids are assigned up front so callers can render recipes before any
        // image arrives.
        let mut recipes: Vec<Recipe> = drafts
            .into_iter()
            .map(|draft| Recipe::from_draft(Uuid::new_v4().to_string(), draft))
            .collect();
        info!(count = recipes.len(), "recipes generated, resolving images");

        let mut image_error: Option<String> = None;

        for index in 0..recipes.len() {
            self.phase = Phase::PerRecipe(index);
            let name = recipes[index].draft.recipe_name.clone();
            let description = recipes[index].draft.description.clone();
            progress(format!(
                "Generating image {}/{}: {}",
                index + 1,
                recipes.len(),
                name
            ));

            match self.imager.generate_image(&name, &description).await {
                Ok(url) => {
                    recipes[index].image_url = Some(url);
                }
                Err(PipelineError::QuotaExceeded(message)) => {
                    warn!(recipe = %name, "quota exhausted, aborting remaining image requests");
                    image_error.get_or_insert(message);
                    for recipe in recipes.iter_mut().skip(index) {
                        if recipe.image_url.is_none() {
                            recipe.image_url =
                                Some(fallback_image_url(&recipe.draft.recipe_name).to_string());
                        }
                    }
                    self.phase = Phase::Aborted;
                    return Ok(GenerationBatch {
                        recipes,
                        image_error,
                    });
                }
                Err(err) => {
                    warn!(recipe = %name, %err, "image generation failed, using fallback");
                    image_error.get_or_insert(err.to_string());
                    recipes[index].image_url = Some(fallback_image_url(&name).to_string());
                }
            }
        }

        self.phase = Phase::Done;
        Ok(GenerationBatch {
            recipes,
            image_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_draft;
    use crate::testing::{api_error, image_response, text_response, FakeImageModel, FakeTextModel};

    const QUOTA_BODY: &str =
        r#"{"error":{"code":429,"message":"Imagen quota exhausted.","status":"RESOURCE_EXHAUSTED"}}"#;

    fn drafts_payload() -> String {
        let drafts = vec![
            sample_draft("Chicken Skillet"),
            sample_draft("Quinoa Salad"),
            sample_draft("Broccoli Bake"),
        ];
        serde_json::to_string(&drafts).unwrap()
    }

    fn orchestrator(
        text: FakeTextModel,
        image: FakeImageModel,
    ) -> Orchestrator<FakeTextModel, FakeImageModel> {
        Orchestrator::new(RecipeGenerator::new(text), ImageGenerator::new(image))
    }

    #[tokio::test(start_paused = true)]
    async fn happy_path_resolves_every_image_in_order() {
        let text = FakeTextModel::with_responses(vec![Ok(text_response(&drafts_payload()))]);
        let image = FakeImageModel::with_responses(vec![
            Ok(image_response("AAAA")),
            Ok(image_response("BBBB")),
            Ok(image_response("CCCC")),
        ]);
        let mut orchestrator = orchestrator(text, image.clone());

        let batch = orchestrator
            .run(&["Chicken Breast".to_string()], Language::En, None, |_| {})
            .await
            .unwrap();

        assert_eq!(batch.recipes.len(), 3);
        assert_eq!(
            batch.recipes[0].image_url.as_deref(),
            Some("data:image/jpeg;base64,AAAA")
        );
        assert_eq!(
            batch.recipes[2].image_url.as_deref(),
            Some("data:image/jpeg;base64,CCCC")
        );
        assert!(batch.image_error.is_none());
        assert_eq!(image.calls(), 3);
        assert_eq!(orchestrator.phase(), Phase::Done);

        // Client-assigned ids are unique across the batch.
        assert_ne!(batch.recipes[0].id, batch.recipes[1].id);
        assert_ne!(batch.recipes[1].id, batch.recipes[2].id);
    }

    #[tokio::test(start_paused = true)]
    async fn quota_on_second_image_falls_back_and_stops_requesting() {
        let text = FakeTextModel::with_responses(vec![Ok(text_response(&drafts_payload()))]);
        let image = FakeImageModel::with_responses(vec![
            Ok(image_response("AAAA")),
            Err(api_error(429, QUOTA_BODY)),
        ]);
        let mut orchestrator = orchestrator(text, image.clone());

        let batch = orchestrator
            .run(&["Chicken Breast".to_string()], Language::En, None, |_| {})
            .await
            .unwrap();

        // Recipe 1 keeps its real image; 2 and 3 get fallbacks; no third call.
        assert_eq!(
            batch.recipes[0].image_url.as_deref(),
            Some("data:image/jpeg;base64,AAAA")
        );
        assert!(batch.recipes[1]
            .image_url
            .as_deref()
            .unwrap()
            .starts_with("data:image/jpeg;base64,/9j/"));
        assert!(batch.recipes[2].image_url.is_some());
        assert_eq!(image.calls(), 2);
        assert_eq!(batch.image_error.as_deref(), Some("Imagen quota exhausted."));
        assert_eq!(orchestrator.phase(), Phase::Aborted);
    }

    #[tokio::test(start_paused = true)]
    async fn non_quota_failure_falls_back_for_that_recipe_only() {
        let text = FakeTextModel::with_responses(vec![Ok(text_response(&drafts_payload()))]);
        let image = FakeImageModel::with_responses(vec![
            Ok(image_response("AAAA")),
            // Recipe 2 exhausts all three attempts.
            Err(api_error(500, "boom")),
            Err(api_error(500, "boom")),
            Err(api_error(500, "boom")),
            Ok(image_response("CCCC")),
        ]);
        let mut orchestrator = orchestrator(text, image.clone());

        let batch = orchestrator
            .run(&["Chicken Breast".to_string()], Language::En, None, |_| {})
            .await
            .unwrap();

        assert_eq!(
            batch.recipes[0].image_url.as_deref(),
            Some("data:image/jpeg;base64,AAAA")
        );
        assert!(batch.recipes[1]
            .image_url
            .as_deref()
            .unwrap()
            .starts_with("data:image/jpeg;base64,/9j/"));
        assert_eq!(
            batch.recipes[2].image_url.as_deref(),
            Some("data:image/jpeg;base64,CCCC")
        );
        assert_eq!(image.calls(), 5);
        assert!(batch.image_error.is_some());
        assert_eq!(orchestrator.phase(), Phase::Done);
    }

    #[tokio::test]
    async fn generation_failure_issues_no_image_requests() {
        let text = FakeTextModel::with_responses(vec![Ok(text_response("not json"))]);
        let image = FakeImageModel::default();
        let mut orchestrator = orchestrator(text, image.clone());

        let result = orchestrator
            .run(&["Chicken Breast".to_string()], Language::En, None, |_| {})
            .await;

        assert!(matches!(result, Err(PipelineError::MalformedResponse(_))));
        assert_eq!(image.calls(), 0);
        assert_eq!(orchestrator.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn progress_reports_each_step() {
        use std::sync::{Arc, Mutex};

        let text = FakeTextModel::with_responses(vec![Ok(text_response(&drafts_payload()))]);
        let image = FakeImageModel::with_responses(vec![
            Ok(image_response("AAAA")),
            Ok(image_response("BBBB")),
            Ok(image_response("CCCC")),
        ]);
        let mut orchestrator = orchestrator(text, image);

        let messages: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&messages);
        orchestrator
            .run(&["Quinoa".to_string()], Language::En, None, move |m| {
                sink.lock().unwrap().push(m);
            })
            .await
            .unwrap();

        let messages = messages.lock().unwrap();
        assert_eq!(messages.len(), 4);
        assert!(messages[1].contains("1/3"));
        assert!(messages[3].contains("3/3"));
    }
}
