//! Extraction of score maps from noisy oracle output.
//!
//! Nothing here fails: unusable input yields neutral scores and an
//! unstructured [`ParsedScores`] that callers can react to.


use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::constants::{DEFAULT_SCORE, is_valid_score};
use crate::model::normalize_title;

/// Scores for a list of expected titles, in the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedScores {
    scores: Vec<f32>,
    found: usize,
    structured: bool,
}

impl ParsedScores {
    fn neutral(expected: usize) -> Self {
        Self {
            scores: vec![DEFAULT_SCORE; expected],
            found: 0,
            structured: false,
        }
    }

    /// Returns `true` if the response was a JSON object naming at least one expected title.
    pub fn is_structured(&self) -> bool {
        self.structured
    }

    /// Number of expected titles the response carried a valid score for.
    pub fn found(&self) -> usize {
        self.found
    }

    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    pub fn into_scores(self) -> Vec<f32> {
        self.scores
    }
}

/// Returns the slice between the first `{` and the last `}` of `raw`.
///
/// This strips code fences and any prose the oracle wrapped around its answer.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Parses a batch answer into one score per expected title.
///
/// The score map is the `"scores"` member when it is an object, else the top-level
/// object. Titles are looked up exactly, then trimmed and case-insensitively. Missing
/// or invalid entries get the neutral score.
pub fn parse<S: AsRef<str>>(raw: &str, expected_titles: &[S]) -> ParsedScores {
    let Some(object) = parse_object(raw) else {
        debug!(expected = expected_titles.len(), "Oracle response is not a JSON object");
        return ParsedScores::neutral(expected_titles.len());
    };
    let map = score_map(&object);

    let normalized: HashMap<String, &Value> = map.iter().fold(HashMap::new(), |mut acc, (k, v)| {
        acc.entry(normalize_title(k)).or_insert(v);
        acc
    });

    let mut found = 0;
    let scores = expected_titles
        .iter()
        .map(|title| {
            let title = title.as_ref();
            let value = map
                .get(title)
                .or_else(|| normalized.get(&normalize_title(title)).copied());
            match value.and_then(score_value) {
                Some(score) => {
                    found += 1;
                    score
                }
                None => DEFAULT_SCORE,
            }
        })
        .collect();

    let structured = found > 0 || expected_titles.is_empty();
    debug!(
        expected = expected_titles.len(),
        found, structured, "Parsed oracle scores"
    );
    ParsedScores {
        scores,
        found,
        structured,
    }
}

/// Extracts one score from a single-candidate answer.
///
/// Accepts `{"score": x}` or a one-entry map (optionally under `"scores"`). Only when
/// the answer holds no JSON object is the first numeric token in the text used.
/// Values outside `[0, 10]` are rejected.
pub fn parse_single(raw: &str) -> Option<f32> {
    if let Some(object) = parse_object(raw) {
        if let Some(value) = object.get("score") {
            return score_value(value);
        }
        let map = score_map(&object);
        if map.len() == 1 {
            return map.values().next().and_then(score_value);
        }
        return None;
    }
    first_numeric_token(raw).filter(|s| is_valid_score(*s))
}

fn parse_object(raw: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(extract_json_object(raw)?) {
        Ok(Value::Object(object)) => Some(object),
        _ => None,
    }
}

fn score_map(object: &Map<String, Value>) -> &Map<String, Value> {
    match object.get("scores") {
        Some(Value::Object(inner)) => inner,
        _ => object,
    }
}

fn score_value(value: &Value) -> Option<f32> {
    let score = match value {
        Value::Number(n) => n.as_f64()? as f32,
        Value::String(s) => s.trim().parse::<f32>().ok()?,
        _ => return None,
    };
    is_valid_score(score).then_some(score)
}

fn first_numeric_token(raw: &str) -> Option<f32> {
    let start = raw.find(|c: char| c.is_ascii_digit())?;
    if raw[..start].ends_with('-') {
        return None;
    }
    let rest = &raw[start..];
    let mut end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if rest[end..].starts_with('.') {
        let fraction = &rest[end + 1..];
        let digits = fraction
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(fraction.len());
        if digits > 0 {
            end += 1 + digits;
        }
    }
    rest[..end].parse().ok()
}
