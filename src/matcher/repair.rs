//! Lenient parsing of classification answers and the repair pass that turns them
//! into an exact partition of the recipe's ingredients.

use std::collections::HashSet;

use serde_json::Value;

use crate::model::{MatchResult, Replacement, normalize_item};
use crate::parser::extract_json_object;

/// Oracle classification before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawClassification {
    pub matched: Vec<String>,
    pub replaceable: Vec<Replacement>,
    pub mismatched: Vec<String>,
}

/// Reads a classification answer. Returns `None` unless the answer holds a JSON
/// object with at least one of the three bucket keys.
///
/// Accepts `mismatch` for `mismatched`, and snake_case replacement keys.
pub fn parse_classification(raw: &str) -> Option<RawClassification> {
    let Value::Object(object) = serde_json::from_str::<Value>(extract_json_object(raw)?).ok()?
    else {
        return None;
    };

    let matched = object.get("matched");
    let replaceable = object.get("replaceable");
    let mismatched = object.get("mismatched").or_else(|| object.get("mismatch"));
    if matched.is_none() && replaceable.is_none() && mismatched.is_none() {
        return None;
    }

    Some(RawClassification {
        matched: string_list(matched),
        replaceable: replacement_list(replaceable),
        mismatched: string_list(mismatched),
    })
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn replacement_list(value: Option<&Value>) -> Vec<Replacement> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let recipe = field(item, &["recipeIngredient", "recipe_ingredient", "recipe"])?;
            let user = field(item, &["userIngredient", "user_ingredient", "user"])?;
            Some(Replacement::new(recipe, user))
        })
        .collect()
}

fn field<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|k| item.get(*k).and_then(Value::as_str))
}

/// Forces `raw` into a partition of `universe`.
///
/// `matched` is exactly the owned tokens of the universe, in recipe order, whatever
/// bucket the oracle put them in. Other entries are normalized first; a replacement
/// needs its recipe side in the universe and its user side owned. Each token keeps its
/// first valid placement (replaceable before mismatched). Tokens left unclassified are
/// appended to `mismatched` in recipe order.
pub fn repair(raw: RawClassification, universe: &[String], owned: &HashSet<String>) -> MatchResult {
    let in_universe: HashSet<&str> = universe.iter().map(String::as_str).collect();
    let mut placed: HashSet<String> = HashSet::with_capacity(universe.len());
    let mut result = MatchResult::default();

    for token in universe {
        if owned.contains(token) && placed.insert(token.clone()) {
            result.matched.push(token.clone());
        }
    }

    for replacement in raw.replaceable {
        let token = normalize_item(&replacement.recipe_ingredient);
        let user = normalize_item(&replacement.user_ingredient);
        if in_universe.contains(token.as_str())
            && owned.contains(&user)
            && placed.insert(token.clone())
        {
            result.replaceable.push(Replacement::new(token, user));
        }
    }

    for item in raw.mismatched {
        let token = normalize_item(&item);
        if in_universe.contains(token.as_str()) && placed.insert(token.clone()) {
            result.mismatched.push(token);
        }
    }

    for token in universe {
        if !placed.contains(token) {
            result.mismatched.push(token.clone());
        }
    }

    result
}

/// Classification without the oracle: exact normalized equality only.
pub fn perform_simple_matching(universe: &[String], owned: &HashSet<String>) -> MatchResult {
    let (matched, mismatched) = universe
        .iter()
        .cloned()
        .partition(|token| owned.contains(token));
    MatchResult {
        matched,
        replaceable: Vec::new(),
        mismatched,
    }
}
