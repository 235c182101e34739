//! Classification prompt for the ingredient matcher.

const INSTRUCTIONS: &str = "Classify every recipe ingredient against the ingredients the \
user owns. Put each recipe ingredient in exactly one bucket:\n\
- matched: the user owns this exact ingredient\n\
- replaceable: the user does not own it but owns something that can stand in for it\n\
- mismatched: the user owns nothing that can stand in for it\n\n\
A substitute is valid when it is:\n\
- the same species or a different cut of it (삼겹살 -> 목살, 백합 -> 조개류)\n\
- a more specific or more general form of the same food (고등어 -> 생선, 대파 -> 쪽파)\n\
- a seasoning with the same role (진간장 -> 국간장, 설탕 -> 올리고당)\n\
A substitute is NOT valid when it crosses food categories (돼지고기 -> 두부) or \
only shares a use case (고추장 -> 케첩).\n\n\
Copy ingredient names exactly as written below.\n\n";

const ANSWER: &str = "Respond with JSON only, in exactly this shape:\n\
{\"matched\": [\"...\"], \"replaceable\": [{\"recipeIngredient\": \"...\", \
\"userIngredient\": \"...\"}], \"mismatched\": [\"...\"]}\n";

/// Renders the classification prompt for normalized recipe tokens and owned items.
pub fn build_match_prompt(recipe_tokens: &[String], owned_items: &[String]) -> String {
    let mut prompt = String::from(INSTRUCTIONS);
    prompt.push_str("Recipe ingredients: ");
    prompt.push_str(&recipe_tokens.join(", "));
    prompt.push_str("\nUser ingredients: ");
    prompt.push_str(&owned_items.join(", "));
    prompt.push_str("\n\n");
    prompt.push_str(ANSWER);
    prompt
}
