// Scripted scorer shared by the aggregator, orchestrator,
// and use-case tests. No model, no device.

use std::cell::Cell;

use anyhow::{bail, Result};

use crate::domain::traits::{AnswerScorer, ScoredSpan};

/// Rule for one context: if the context contains `needle`,
/// answer with `answer` at `score`, or fail when `answer` is None.
struct Rule {
    needle: String,
    answer: Option<String>,
    score:  f32,
}

pub struct StubScorer {
    rules: Vec<Rule>,
    calls: Cell<usize>,
}

impl StubScorer {
    pub fn new() -> Self {
        Self { rules: Vec::new(), calls: Cell::new(0) }
    }

    /// Contexts containing `needle` score `score` with `answer`
    pub fn on(mut self, needle: &str, answer: &str, score: f32) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            answer: Some(answer.to_string()),
            score,
        });
        self
    }

    /// Contexts containing `needle` make the scorer fail
    pub fn failing_on(mut self, needle: &str) -> Self {
        self.rules.push(Rule { needle: needle.to_string(), answer: None, score: 0.0 });
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl AnswerScorer for StubScorer {
    fn score(&self, _question: &str, context: &str) -> Result<ScoredSpan> {
        self.calls.set(self.calls.get() + 1);
        for rule in &self.rules {
            if context.contains(&rule.needle) {
                return match &rule.answer {
                    Some(answer) => Ok(ScoredSpan::new(answer.clone(), rule.score)),
                    None => bail!("scripted failure on '{}'", rule.needle),
                };
            }
        }
        Ok(ScoredSpan::new("", 0.0))
    }

    fn name(&self) -> &str {
        "stub"
    }
}
