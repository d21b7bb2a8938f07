// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer only ever talks to these traits:
//
//   - AnswerScorer      → KeywordScorer, NeuralScorer, test stubs
//   - DocumentExtractor → DocumentLoader (PDF / DOCX / plain text)
//   - LoadedDocument    → one opened document handle per format
//   - QuestionAnswerer  → AskUseCase
//
// Swapping a scoring backend or a document format never
// touches the aggregation logic.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §17 (Trait Objects)

use std::path::Path;

use anyhow::Result;

use crate::domain::answer::QueryResult;

// ─── AnswerScorer ─────────────────────────────────────────────────────────────

/// The span a scorer picked out of one context, with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSpan {
    pub answer: String,
    pub score:  f32,
}

impl ScoredSpan {
    pub fn new(answer: impl Into<String>, score: f32) -> Self {
        Self { answer: answer.into(), score }
    }
}

/// Given a question and one bounded context, return the best
/// answer span and its confidence.
///
/// A failure is local to that one context: callers skip the
/// chunk and keep going.
pub trait AnswerScorer {
    fn score(&self, question: &str, context: &str) -> Result<ScoredSpan>;

    /// Short backend name for logs
    fn name(&self) -> &str;
}

// ─── DocumentExtractor ────────────────────────────────────────────────────────

/// Opens a document file. A failure here is fatal for the session.
pub trait DocumentExtractor {
    fn load(&self, path: &Path) -> Result<Box<dyn LoadedDocument>>;
}

/// An opened document. Each extraction may fail on its own;
/// callers degrade a failed source to empty content.
pub trait LoadedDocument {
    fn extract_text(&self) -> Result<String>;

    /// Tables flattened into readable `header: value` lines
    fn extract_tables(&self) -> Result<String>;

    /// Text recognised in embedded images, empty without OCR
    fn extract_images(&self) -> Result<String>;

    /// Release the underlying file. Dropping the handle does the same.
    fn close(self: Box<Self>) {}
}

// ─── QuestionAnswerer ─────────────────────────────────────────────────────────

/// Anything that turns a question into a QueryResult.
pub trait QuestionAnswerer {
    fn answer(&self, question: &str) -> Result<QueryResult>;
}
