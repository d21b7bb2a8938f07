// ============================================================
// Layer 2 — Multi-Source Orchestrator
// ============================================================
// Runs the aggregator over the content sources in a fixed
// priority order and stops at the first source that answers:
//
//   table  →  image (OCR)  →  text
//
// Structured numbers (revenue, dates, totals) usually live in
// tables, so tables go first. Running text is the last resort.
//
// If no source answers, the result of the last source that was
// evaluated (text) is returned unchanged. The order is a fixed
// priority, never a race: sources are evaluated one after
// another.

use crate::application::aggregator::AnswerAggregator;
use crate::domain::answer::QueryResult;
use crate::domain::document::{ContentType, DocumentContent};
use crate::domain::traits::AnswerScorer;

pub const SOURCE_PRIORITY: [ContentType; 3] =
    [ContentType::Table, ContentType::Image, ContentType::Text];

pub struct MultiSourceOrchestrator {
    aggregator: AnswerAggregator,
}

impl MultiSourceOrchestrator {
    pub fn new(aggregator: AnswerAggregator) -> Self {
        Self { aggregator }
    }

    pub fn find_answer(
        &self,
        scorer:   &dyn AnswerScorer,
        question: &str,
        content:  &DocumentContent,
    ) -> QueryResult {
        let mut last = None;

        for content_type in SOURCE_PRIORITY {
            let result = self.aggregator.aggregate(
                scorer,
                question,
                content.get(content_type),
                content_type,
            );
            if result.is_found() {
                tracing::info!("Answered from {} content", content_type);
                return result;
            }
            last = Some(result);
        }

        // SOURCE_PRIORITY is non-empty, so the loop ran at least once
        last.unwrap_or_else(|| QueryResult::no_content(question, ContentType::Text))
    }
}
