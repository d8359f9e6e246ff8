use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing_subscriber::EnvFilter;

use nutrichef::api_connection::GeminiProvider;
use nutrichef::catalog::random_starter;
use nutrichef::cli::{parse_args, Command};
use nutrichef::generation::RecipeGenerator;
use nutrichef::image::ImageGenerator;
use nutrichef::model::{encode_recipe_for_url, Recipe};
use nutrichef::orchestrator::Orchestrator;
use nutrichef::scan::IngredientScanner;
use nutrichef::storage::{FavoriteList, JsonFileStorage};

const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

fn print_recipe(recipe: &Recipe) {
    let draft = &recipe.draft;
    println!("\n=== {} ===", draft.recipe_name);
    println!("{}", draft.description);
    println!(
        "Prep: {} | Cook: {} | Serves: {} | {} kcal | Difficulty: {:?}",
        draft.prep_time, draft.cook_time, draft.servings, draft.calories, draft.difficulty
    );
    println!(
        "Macros: {} protein, {} carbs, {} fats",
        draft.nutrition.protein, draft.nutrition.carbs, draft.nutrition.fats
    );
    println!("Ingredients:");
    for ingredient in &draft.ingredients {
        let staple = if ingredient.is_staple { " (pantry staple)" } else { "" };
        println!("  - {} {}{}", ingredient.quantity, ingredient.name, staple);
    }
    println!("Instructions:");
    for (i, step) in draft.instructions.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!("Health tip: {}", draft.health_tip);
    if let Some(url) = &recipe.image_url {
        println!("Image: {} bytes of data URI", url.len());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = parse_args();
    let provider = GeminiProvider::from_env(API_KEY_ENV_VAR);

    match cli.command {
        Command::Generate { ingredients } => {
            let ingredients = if ingredients.is_empty() {
                let starter = random_starter(cli.language);
                println!("No ingredients given, using a random starter: {}", starter.join(", "));
                starter
            } else {
                ingredients
            };

            let generator = RecipeGenerator::new(provider.clone());
            let imager = ImageGenerator::new(provider);
            let mut orchestrator = Orchestrator::new(generator, imager);

            let batch = orchestrator
                .run(&ingredients, cli.language, None, |message| {
                    println!("{}", message);
                })
                .await
                .context("Recipe generation failed")?;

            for recipe in &batch.recipes {
                print_recipe(recipe);
            }
            if let Some(error) = &batch.image_error {
                eprintln!("\nImage generation issue: {}", error);
            }

            // Shareable links, same encoding the web client puts in its URLs.
            println!("\nShare codes:");
            for recipe in &batch.recipes {
                let code = encode_recipe_for_url(recipe)
                    .context("Failed to encode recipe for sharing")?;
                println!("  {}: ?recipe={}", recipe.draft.recipe_name, code);
            }

            let favorites = FavoriteList::load(JsonFileStorage::new(&cli.favorites_file))
                .context("Failed to load favorites")?;
            if !favorites.recipes().is_empty() {
                println!("\nYou have {} favorite recipe(s) saved.", favorites.recipes().len());
            }
        }
        Command::Scan { image_file } => {
            let bytes = tokio::fs::read(&image_file)
                .await
                .with_context(|| format!("Failed to read image file '{}'", image_file))?;
            let mime = if image_file.to_lowercase().ends_with(".png") {
                "image/png"
            } else {
                "image/jpeg"
            };
            let image_data = format!("data:{};base64,{}", mime, BASE64.encode(&bytes));

            let scanner = IngredientScanner::new(provider);
            let ingredients = scanner
                .identify_ingredients(&image_data, cli.language, None)
                .await
                .context("Ingredient scan failed")?;

            if ingredients.is_empty() {
                println!("No ingredients identified in the image.");
            } else {
                println!("Identified ingredients:");
                for ingredient in ingredients {
                    println!("  - {}", ingredient);
                }
            }
        }
        Command::Suggest => {
            for ingredient in random_starter(cli.language) {
                println!("{}", ingredient);
            }
        }
    }

    Ok(())
}
