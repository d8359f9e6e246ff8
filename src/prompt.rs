use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::api_connection::endpoints::ResponseSchema;

/// The two languages the pipeline renders recipes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Es,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }

    /// The language name as spelled out inside model instructions.
    pub fn instruction_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            other => Err(format!("unsupported language code: {}", other)),
        }
    }
}

pub fn recipe_system_instruction() -> String {
    "You are an expert chef specializing in healthy, delicious cuisine. Your task is to \
generate exactly three distinct, healthy recipes based on a list of ingredients provided \
by the user.

Your response MUST be a valid JSON array containing three recipe objects that strictly \
adheres to the provided JSON schema. All text in the recipes (names, descriptions, \
instructions, etc.) MUST be in the language requested by the user.

**Recipe Generation Rules:**
1.  **First Two Recipes:** Use ONLY the ingredients from the user's list. For these \
ingredients, the 'isStaple' flag in the JSON output must be set to `false`.
2.  **Third (Creative) Recipe:** Use the user's ingredients (with 'isStaple' set to \
`false`) AND creatively introduce 1-3 common pantry staples (like olive oil, salt, \
pepper, common spices). For these added staples ONLY, the 'isStaple' flag must be set \
to `true`.
3.  **Completeness and Quality:** Ensure every single field in the JSON schema is \
filled with relevant, high-quality, and creative content for all three recipes. Do not \
omit any fields. The recipes should be genuinely appealing and well-described."
        .to_string()
}

pub fn recipe_user_prompt(ingredients: &[String], language: Language) -> String {
    format!(
        "Please generate recipes in {} using the following ingredients: {}.",
        language.instruction_name(),
        ingredients.join(", ")
    )
}

/// Schema for the three-recipe structured output (the shape of `RecipeDraft`).
pub fn recipe_response_schema() -> ResponseSchema {
    let mut nutrition = HashMap::new();
    nutrition.insert(
        "protein".to_string(),
        ResponseSchema::string("Amount of protein per serving, including unit, e.g., '30g'."),
    );
    nutrition.insert(
        "carbs".to_string(),
        ResponseSchema::string(
            "Amount of carbohydrates per serving, including unit, e.g., '45g'.",
        ),
    );
    nutrition.insert(
        "fats".to_string(),
        ResponseSchema::string("Amount of fats per serving, including unit, e.g., '15g'."),
    );

    let mut ingredient = HashMap::new();
    ingredient.insert(
        "quantity".to_string(),
        ResponseSchema::string("The amount of the ingredient, e.g., '1 cup', '2 tbsp'."),
    );
    ingredient.insert(
        "name".to_string(),
        ResponseSchema::string("The name of the ingredient, e.g., 'quinoa', 'broccoli'."),
    );
    ingredient.insert(
        "isStaple".to_string(),
        ResponseSchema::boolean(
            "Set to 'false' for user-provided ingredients. Set to 'true' ONLY for common \
pantry staples (like oil, spices) added in the third, creative recipe.",
        ),
    );

    let mut recipe = HashMap::new();
    recipe.insert(
        "recipeName".to_string(),
        ResponseSchema::string("The name of the recipe."),
    );
    recipe.insert(
        "description".to_string(),
        ResponseSchema::string("A short, enticing description of the healthy dish."),
    );
    recipe.insert(
        "prepTime".to_string(),
        ResponseSchema::string("Estimated preparation time, e.g., '15 minutes'."),
    );
    recipe.insert(
        "cookTime".to_string(),
        ResponseSchema::string("Estimated cooking time, e.g., '30 minutes'."),
    );
    recipe.insert(
        "servings".to_string(),
        ResponseSchema::number("The number of people this recipe serves."),
    );
    recipe.insert(
        "calories".to_string(),
        ResponseSchema::number("Estimated calorie count per serving."),
    );
    recipe.insert(
        "difficulty".to_string(),
        ResponseSchema::string(
            "The cooking difficulty, must be one of: 'Very Easy', 'Easy', 'Medium', \
'Hard', 'Expert'.",
        ),
    );
    recipe.insert(
        "healthTip".to_string(),
        ResponseSchema::string(
            "A useful tip on how to make the dish even healthier, or a nutritional benefit.",
        ),
    );
    recipe.insert(
        "nutrition".to_string(),
        ResponseSchema::object(
            Some("Nutritional information per serving."),
            nutrition,
            vec!["protein".to_string(), "carbs".to_string(), "fats".to_string()],
        ),
    );
    recipe.insert(
        "ingredients".to_string(),
        ResponseSchema::array(
            Some("A list of all ingredients required for the recipe."),
            ResponseSchema::object(
                None,
                ingredient,
                vec![
                    "quantity".to_string(),
                    "name".to_string(),
                    "isStaple".to_string(),
                ],
            ),
        ),
    );
    recipe.insert(
        "instructions".to_string(),
        ResponseSchema::array(
            Some("Step-by-step instructions for preparing the dish."),
            ResponseSchema::string("A single preparation step."),
        ),
    );

    ResponseSchema::array(
        None,
        ResponseSchema::object(
            None,
            recipe,
            vec![
                "recipeName".to_string(),
                "description".to_string(),
                "prepTime".to_string(),
                "cookTime".to_string(),
                "servings".to_string(),
                "calories".to_string(),
                "difficulty".to_string(),
                "healthTip".to_string(),
                "nutrition".to_string(),
                "ingredients".to_string(),
                "instructions".to_string(),
            ],
        ),
    )
}

pub fn ingredient_scan_prompt(language: Language) -> String {
    format!(
        "Identify all the food ingredients in this image. List only the names of the \
ingredients. Respond entirely in {}.",
        language.instruction_name()
    )
}

pub fn ingredient_scan_schema() -> ResponseSchema {
    ResponseSchema::array(
        None,
        ResponseSchema::string("The name of a single food ingredient found in the image."),
    )
}

pub fn image_prompt(recipe_name: &str, description: &str) -> String {
    format!(
        "A healthy, fresh, and vibrant photo of a freshly prepared \"{}\". {}. \
Professional food photography, bright natural lighting, minimalist styling, focus on \
fresh ingredients. The food should look incredibly delicious and nutritious, served on \
a modern white plate.",
        recipe_name, description
    )
}
