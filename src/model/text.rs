//! Text normalization used for equality checks on titles and ingredients.

/// Separators accepted in the free-text ingredient field.
const INGREDIENT_SEPARATORS: [char; 4] = [',', ';', '\n', '\r'];

/// Normalizes a recipe title for dedup lookups: trimmed and lower-cased.
#[inline]
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Normalizes an ingredient name: trimmed, inner whitespace collapsed, lower-cased.
pub fn normalize_item(item: &str) -> String {
    item.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Splits a free-text ingredient list into trimmed, non-empty tokens.
///
/// Tokens keep their original spelling; apply [`normalize_item`] before comparing.
pub fn split_ingredients(text: &str) -> Vec<String> {
    text.split(INGREDIENT_SEPARATORS)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
