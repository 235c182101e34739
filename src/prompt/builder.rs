use crate::constants::{DEFAULT_MAX_OWNED_ITEMS_IN_PROMPT, DEFAULT_PROMPT_CHAR_BUDGET};
use crate::model::{Candidate, SignalBundle};

const PREAMBLE: &str = "You are a nutrition-aware recipe recommender. Score how suitable each \
recipe below is for this user on a scale from 0 to 10.\n\n";

const PRIORITY_NOTE: &str = "Apply the user signals in the order they are numbered. A \
higher-numbered signal never outweighs a lower-numbered one.\n\n";

const RUBRIC: &str = "Scoring rubric:\n\
- 9-10: fully satisfies every signal above, in priority order\n\
- 7-8: satisfies the higher-priority signals with minor gaps in lower ones\n\
- 5-6: acceptable, neither helps nor hurts the user's signals\n\
- 3-4: conflicts with a goal or metric, or needs many ingredients the user lacks\n\
- 1-2: a poor fit for nearly every signal\n\
- 0: contains an excluded item (use 0 for nothing else)\n\n";

const BATCH_ANSWER_INTRO: &str =
    "Respond with JSON only, in exactly this shape, with one entry per recipe:\n";

const SINGLE_ANSWER: &str =
    "Respond with JSON only, in exactly this shape:\n{\"score\": <number from 0 to 10>}\n";

/// A rendered batch prompt and how many leading candidates it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRequest {
    pub prompt: String,
    /// The first `included` candidates were rendered; the rest did not fit the budget.
    pub included: usize,
}

/// Builds scoring prompts with a fixed section order:
/// exclusions, goals, health metrics, owned items, candidates, rubric, answer template.
///
/// Sections for absent signals are omitted and the remaining ones renumbered.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    char_budget: usize,
    max_owned_items: usize,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT_CHAR_BUDGET, DEFAULT_MAX_OWNED_ITEMS_IN_PROMPT)
    }
}

impl PromptBuilder {
    pub fn new(char_budget: usize, max_owned_items: usize) -> Self {
        Self {
            char_budget,
            max_owned_items,
        }
    }

    pub fn char_budget(&self) -> usize {
        self.char_budget
    }

    /// Renders as many leading `candidates` as fit the character budget.
    ///
    /// `included` is 0 when not even the first candidate fits.
    pub fn build(
        &self,
        signals: &SignalBundle,
        candidates: &[Candidate],
        include_nutrition: bool,
    ) -> RenderedRequest {
        let header = self.render_signals(signals);
        let fixed = char_len(&header)
            + char_len("Recipes:\n")
            + 1
            + char_len(RUBRIC)
            + char_len(BATCH_ANSWER_INTRO)
            + char_len("{\n  \"scores\": {\n  }\n}\n");

        let mut used = fixed;
        let mut entries = String::new();
        let mut template = String::new();
        let mut included = 0;

        for (i, candidate) in candidates.iter().enumerate() {
            let entry = render_candidate(i + 1, candidate, include_nutrition);
            let line = template_line(&candidate.title);
            let cost = char_len(&entry) + char_len(&line);
            if used + cost > self.char_budget {
                break;
            }
            used += cost;
            entries.push_str(&entry);
            template.push_str(&line);
            included += 1;
        }

        if template.ends_with(",\n") {
            template.truncate(template.len() - 2);
            template.push('\n');
        }

        let mut prompt = String::with_capacity(used * 2);
        prompt.push_str(&header);
        prompt.push_str("Recipes:\n");
        prompt.push_str(&entries);
        prompt.push('\n');
        prompt.push_str(RUBRIC);
        prompt.push_str(BATCH_ANSWER_INTRO);
        prompt.push_str("{\n  \"scores\": {\n");
        prompt.push_str(&template);
        prompt.push_str("  }\n}\n");

        RenderedRequest { prompt, included }
    }

    /// Renders a prompt for one candidate. Never truncated.
    pub fn build_single(
        &self,
        signals: &SignalBundle,
        candidate: &Candidate,
        include_nutrition: bool,
    ) -> String {
        let mut prompt = self.render_signals(signals);
        prompt.push_str("Recipe:\n");
        prompt.push_str(&render_candidate(1, candidate, include_nutrition));
        prompt.push('\n');
        prompt.push_str(RUBRIC);
        prompt.push_str(SINGLE_ANSWER);
        prompt
    }

    fn render_signals(&self, signals: &SignalBundle) -> String {
        let mut out = String::from(PREAMBLE);
        let mut sections: Vec<String> = Vec::with_capacity(4);

        if !signals.exclusions().is_empty() {
            sections.push(format!(
                "Exclusions (allergies). A recipe containing any of these items violates the \
                 constraint and MUST score 0:\n{}",
                bullet_list(signals.exclusions().iter())
            ));
        }
        if !signals.goals().is_empty() {
            sections.push(format!(
                "Health goals. Favor recipes that move the user toward these:\n{}",
                bullet_list(signals.goals().iter())
            ));
        }
        if !signals.health_metrics().is_empty() {
            let metrics = signals
                .health_metrics()
                .iter()
                .map(|(k, v)| format!("{k}: {v}"));
            sections.push(format!(
                "Health metrics from the user's latest checkup. Favor recipes suited to them:\n{}",
                bullet_list(metrics)
            ));
        }
        if !signals.owned_items().is_empty() {
            let owned: Vec<&str> = signals
                .owned_items()
                .iter()
                .take(self.max_owned_items)
                .map(String::as_str)
                .collect();
            sections.push(format!(
                "Ingredients the user already owns. Favor recipes that use them, accepting \
                 reasonable substitutes:\n{}\n",
                owned.join(", ")
            ));
        }

        if sections.is_empty() {
            return out;
        }

        out.push_str(PRIORITY_NOTE);
        for (i, section) in sections.iter().enumerate() {
            out.push_str(&format!("{}. {}", i + 1, section));
        }
        out.push('\n');
        out
    }
}

fn render_candidate(index: usize, candidate: &Candidate, include_nutrition: bool) -> String {
    let mut entry = format!(
        "{index}. {}\n   Ingredients: {}\n",
        candidate.title,
        candidate.ingredients.trim()
    );
    if include_nutrition {
        let n = &candidate.nutrition;
        entry.push_str(&format!(
            "   Nutrition: {} kcal, protein {}g, carbohydrate {}g, fat {}g, {} min\n",
            n.calories, n.protein, n.carbohydrate, n.fat, n.cooking_minutes
        ));
    }
    entry
}

fn template_line(title: &str) -> String {
    let quoted = serde_json::to_string(title).unwrap_or_else(|_| format!("\"{title}\""));
    format!("    {quoted}: <score>,\n")
}

fn bullet_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| format!("- {}\n", item.as_ref()))
        .collect()
}

#[inline]
fn char_len(s: &str) -> usize {
    s.chars().count()
}
