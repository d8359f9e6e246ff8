use rand::seq::SliceRandom;

use crate::prompt::Language;

pub struct IngredientCatalog {
    pub proteins: &'static [&'static str],
    pub vegetables: &'static [&'static str],
    pub carbs_fats: &'static [&'static str],
}

const CATALOG_EN: IngredientCatalog = IngredientCatalog {
    proteins: &[
        "Chicken Breast",
        "Salmon",
        "Tofu",
        "Black Beans",
        "Greek Yogurt",
        "Eggs",
        "Lentils",
    ],
    vegetables: &[
        "Broccoli",
        "Spinach",
        "Kale",
        "Bell Pepper",
        "Onion",
        "Tomato",
        "Sweet Potato",
        "Zucchini",
    ],
    carbs_fats: &["Quinoa", "Brown Rice", "Avocado", "Olive Oil", "Almonds", "Oats"],
};

const CATALOG_ES: IngredientCatalog = IngredientCatalog {
    proteins: &[
        "Pechuga de Pollo",
        "Salmón",
        "Tofu",
        "Frijoles Negros",
        "Yogur Griego",
        "Huevos",
        "Lentejas",
    ],
    vegetables: &[
        "Brócoli",
        "Espinacas",
        "Kale",
        "Pimiento",
        "Cebolla",
        "Tomate",
        "Batata",
        "Calabacín",
    ],
    carbs_fats: &[
        "Quinoa",
        "Arroz Integral",
        "Aguacate",
        "Aceite de Oliva",
        "Almendras",
        "Avena",
    ],
};

pub fn catalog(language: Language) -> &'static IngredientCatalog {
    match language {
        Language::En => &CATALOG_EN,
        Language::Es => &CATALOG_ES,
    }
}

/// One random protein, vegetable, and carb/fat, as a starter ingredient list.
pub fn random_starter(language: Language) -> Vec<String> {
    let catalog = catalog(language);
    let mut rng = rand::thread_rng();
    [catalog.proteins, catalog.vegetables, catalog.carbs_fats]
        .iter()
        .filter_map(|group| group.choose(&mut rng))
        .map(|s| s.to_string())
        .collect()
}
