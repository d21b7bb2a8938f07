// ============================================================
// Layer 3 — Answer Candidates and Query Results
// ============================================================
// Extractive Q&A produces one candidate per scored chunk:
//   - the answer text the scorer pointed at
//   - the scorer's confidence
//   - the chunk it came from
//   - which content source the chunk belongs to
//
// Candidates live for one query only. The aggregator folds
// them into exactly one QueryResult per question.
//
// A result is "found" if and only if its confidence reached
// the threshold. Sub-threshold material is never reported as
// found; it can ride along in `best_effort` for display.

use serde::{Deserialize, Serialize};

use crate::domain::document::ContentType;

/// Answer text used when a source has no content at all
pub const NO_CONTENT_ANSWER: &str = "No content loaded";

/// Answer text used when no candidate reached the threshold
pub const NOT_FOUND_ANSWER: &str = "No answer found";

/// Answer text used when evaluating a question failed
pub const ERROR_ANSWER: &str = "Error processing question";

/// One scored answer span from one chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerCandidate {
    pub answer:       String,
    pub confidence:   f32,
    /// The chunk the scorer was given
    pub chunk:        String,
    pub content_type: ContentType,
}

impl AnswerCandidate {
    pub fn new(
        answer:       impl Into<String>,
        confidence:   f32,
        chunk:        impl Into<String>,
        content_type: ContentType,
    ) -> Self {
        Self {
            answer: answer.into(),
            confidence,
            chunk: chunk.into(),
            content_type,
        }
    }
}

/// How a QueryResult was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerStatus {
    /// The best-scoring candidate reached the threshold
    Confident,
    /// The best candidate was unusable but a ranked candidate passed
    Fallback,
    /// Nothing reached the threshold
    NotFound,
    /// The content source was empty; the scorer was never called
    NoContent,
    /// The question could not be evaluated
    Error,
}

impl AnswerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerStatus::Confident => "confident",
            AnswerStatus::Fallback  => "fallback",
            AnswerStatus::NotFound  => "not_found",
            AnswerStatus::NoContent => "no_content",
            AnswerStatus::Error     => "error",
        }
    }
}

/// The final answer for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub question:     String,
    pub answer:       String,
    pub confidence:   f32,
    pub content_type: ContentType,
    pub status:       AnswerStatus,
    /// Chunk the answer was extracted from, when found
    pub context:      Option<String>,
    /// Ranked at-or-above-threshold candidates, best first
    pub related:      Vec<AnswerCandidate>,
    /// Highest sub-threshold candidate, kept for display only
    pub best_effort:  Option<AnswerCandidate>,
}

impl QueryResult {
    /// A found result built from the winning candidate
    pub fn found(
        question:  impl Into<String>,
        candidate: AnswerCandidate,
        status:    AnswerStatus,
        related:   Vec<AnswerCandidate>,
    ) -> Self {
        Self {
            question:     question.into(),
            answer:       candidate.answer,
            confidence:   candidate.confidence,
            content_type: candidate.content_type,
            status,
            context:      Some(candidate.chunk),
            related,
            best_effort:  None,
        }
    }

    pub fn not_found(
        question:     impl Into<String>,
        content_type: ContentType,
        best_effort:  Option<AnswerCandidate>,
    ) -> Self {
        Self {
            question:    question.into(),
            answer:      NOT_FOUND_ANSWER.to_string(),
            confidence:  0.0,
            content_type,
            status:      AnswerStatus::NotFound,
            context:     None,
            related:     Vec::new(),
            best_effort,
        }
    }

    pub fn no_content(question: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            question:    question.into(),
            answer:      NO_CONTENT_ANSWER.to_string(),
            confidence:  0.0,
            content_type,
            status:      AnswerStatus::NoContent,
            context:     None,
            related:     Vec::new(),
            best_effort: None,
        }
    }

    /// Record for a question whose evaluation failed. The message
    /// goes to the log; the record only says that it failed.
    pub fn error(question: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            question:    question.into(),
            answer:      ERROR_ANSWER.to_string(),
            confidence:  0.0,
            content_type,
            status:      AnswerStatus::Error,
            context:     None,
            related:     Vec::new(),
            best_effort: None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self.status, AnswerStatus::Confident | AnswerStatus::Fallback)
    }
}
