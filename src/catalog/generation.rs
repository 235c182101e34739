//! Prompt and answer format for oracle-generated recipes.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::debug;

use crate::model::{NewRecipe, Nutrition, RecipeCategory};
use crate::parser::extract_json_object;

/// Renders a request for `count` well-known dishes built around `owned_items`.
pub fn build_generation_prompt(
    owned_items: &[String],
    exclusions: &[String],
    count: usize,
) -> String {
    let categories: Vec<&str> = RecipeCategory::ALL.iter().map(|c| c.as_str()).collect();
    let mut prompt = String::from(
        "Recommend real, widely known dishes the user can cook from the ingredients they own.\n\n\
         Dish selection:\n\
         - Only recommend dishes that actually exist; no forced combinations\n\
         - Titles must be common enough to find a recipe by searching for them\n\
         - Being a well-known dish matters more than using many of the owned ingredients\n\n\
         Ingredients:\n\
         - List every ingredient the dish commonly needs, leaving out optional garnish\n\
         - Write ingredient names in Korean where possible\n\n\
         Categories:\n\
         - Pick every category that fits, or OTHER if none does\n",
    );
    prompt.push_str(&format!("- Allowed categories: {}\n\n", categories.join(", ")));

    if !exclusions.is_empty() {
        prompt.push_str(&format!(
            "Never use these ingredients (allergies): {}\n\n",
            exclusions.join(", ")
        ));
    }

    prompt.push_str(&format!(
        "Ingredients the user owns: {}\n\n",
        owned_items.join(", ")
    ));
    prompt.push_str(&format!(
        "Recommend {count} dishes. Respond with JSON only, in exactly this shape:\n\
         {{\n  \"recommendations\": [\n    {{\n      \"title\": \"dish name\",\n      \
         \"description\": \"one short line\",\n      \"ingredients\": \"ingredient1, ingredient2\",\n      \
         \"category\": \"WEIGHT_LOSS,MUSCLE_GAIN\",\n      \"cookingTime\": 30,\n      \
         \"calories\": 300,\n      \"protein\": 20,\n      \"carbohydrate\": 30,\n      \
         \"fat\": 10\n    }}\n  ]\n}}\n"
    ));
    prompt
}

/// Reads the `recommendations` array. Returns `None` when the answer has no such array.
///
/// Entries without a title, description or ingredients are skipped. Unknown category
/// names are dropped, and an entry left with none is tagged `OTHER`.
pub fn parse_recommendations(raw: &str) -> Option<Vec<NewRecipe>> {
    let value: Value = serde_json::from_str(extract_json_object(raw)?).ok()?;
    let items = value.get("recommendations")?.as_array()?;

    let recipes = items
        .iter()
        .filter_map(|item| {
            let recipe = to_new_recipe(item);
            if recipe.is_none() {
                debug!("Skipping incomplete recommendation");
            }
            recipe
        })
        .collect();
    Some(recipes)
}

fn to_new_recipe(item: &Value) -> Option<NewRecipe> {
    let title = non_blank(item.get("title")?.as_str()?)?;
    let description = non_blank(item.get("description")?.as_str()?)?;
    let ingredients = match item.get("ingredients")? {
        Value::String(s) => non_blank(s)?,
        Value::Array(parts) => {
            let joined: Vec<&str> = parts
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect();
            non_blank(&joined.join(", "))?
        }
        _ => return None,
    };

    let mut categories: BTreeSet<RecipeCategory> = match item.get("category") {
        Some(Value::String(csv)) => RecipeCategory::parse_list(csv).into_iter().collect(),
        Some(Value::Array(names)) => names
            .iter()
            .filter_map(Value::as_str)
            .filter_map(|n| n.parse().ok())
            .collect(),
        _ => BTreeSet::new(),
    };
    if categories.is_empty() {
        categories.insert(RecipeCategory::Other);
    }

    Some(NewRecipe {
        title,
        description,
        ingredients,
        nutrition: Nutrition {
            calories: number(item, "calories"),
            protein: number(item, "protein"),
            carbohydrate: number(item, "carbohydrate"),
            fat: number(item, "fat"),
            cooking_minutes: number(item, "cookingTime"),
        },
        categories,
    })
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Non-negative integer field; missing, negative or malformed values read as 0.
fn number(item: &Value, key: &str) -> u32 {
    let value = match item.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if value.is_finite() && value > 0.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}
