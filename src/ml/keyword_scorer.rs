// ============================================================
// Layer 5 — Keyword Scorer
// ============================================================
// A rule-based AnswerScorer that needs no checkpoint. Useful on
// machines without a GPU and for documents whose answers sit
// in "label: value" lines (CVs, forms, flattened tables).
//
// Scoring:
//   keywords = question words longer than 3 chars (or numbers),
//              minus stop words, lowercased, punctuation stripped
//   weight   = Σ len(keyword)
//   segment score = Σ len(keyword found in segment) / (weight + 1)
//
// The +1 keeps scores strictly below 1.0, so a perfect keyword
// hit still reads as "very likely" rather than certain.
//
// The answer is the best-scoring segment (line or sentence).
// If that segment is made of "label: value" pairs, the value of
// the pair whose label matches the question best is returned.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::traits::{AnswerScorer, ScoredSpan};

static SEGMENT_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n|[.!?;]\s+").expect("valid regex"));

const STOP_WORDS: &[&str] = &[
    "what", "when", "where", "which", "whom", "whose", "does", "will",
    "this", "that", "have", "with", "from", "there", "their", "about",
    "your", "were", "been", "into", "than", "then", "them", "they",
    "should", "could", "would", "much", "many", "tell",
];

#[derive(Debug, Default)]
pub struct KeywordScorer;

impl KeywordScorer {
    pub fn new() -> Self {
        Self
    }
}

impl AnswerScorer for KeywordScorer {
    fn score(&self, question: &str, context: &str) -> Result<ScoredSpan> {
        let keywords = keywords(question);
        if keywords.is_empty() {
            return Ok(ScoredSpan::new("", 0.0));
        }
        let total_weight = keywords.iter().map(|k| k.len() as f32).sum::<f32>() + 1.0;

        let mut best: Option<(f32, &str)> = None;
        for segment in SEGMENT_BREAK.split(context).map(str::trim).filter(|s| !s.is_empty()) {
            let score = keyword_weight(&keywords, segment) / total_weight;
            if score > best.map_or(0.0, |(s, _)| s) {
                best = Some((score, segment));
            }
        }

        Ok(match best {
            Some((score, segment)) => ScoredSpan::new(pick_value(&keywords, segment), score),
            None => ScoredSpan::new("", 0.0),
        })
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

/// Lowercased, de-duplicated content words of the question
fn keywords(question: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for word in question.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        let numeric = !w.is_empty() && w.chars().all(|c| c.is_ascii_digit());
        if (w.len() > 3 || numeric) && !STOP_WORDS.contains(&w.as_str()) && !out.contains(&w) {
            out.push(w);
        }
    }
    out
}

/// Summed length of the keywords that occur in `text`
fn keyword_weight(keywords: &[String], text: &str) -> f32 {
    let lower = text.to_lowercase();
    keywords
        .iter()
        .filter(|k| lower.contains(k.as_str()))
        .map(|k| k.len() as f32)
        .sum()
}

/// Value of the best label match in a "label: value, ..." segment,
/// otherwise the segment itself.
fn pick_value(keywords: &[String], segment: &str) -> String {
    let mut best: Option<(f32, &str)> = None;

    for pair in segment.split(", ") {
        let Some((label, value)) = pair.split_once(':') else { continue };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let weight = keyword_weight(keywords, label);
        if weight > best.map_or(0.0, |(w, _)| w) {
            best = Some((weight, value));
        }
    }

    best.map_or_else(|| segment.to_string(), |(_, value)| value.to_string())
}
