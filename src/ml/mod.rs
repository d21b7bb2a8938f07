// ============================================================
// Layer 5 — Scoring Backends
// ============================================================
// Implementations of the AnswerScorer trait. This is the only
// layer that imports burn or tokenizers.
//
//   model.rs          — transformer encoder with a span head
//   inferencer.rs     — NeuralScorer: checkpoint → (answer, p_start·p_end)
//   keyword_scorer.rs — KeywordScorer: rule-based, no model needed
//
// The aggregator only sees `&dyn AnswerScorer`, so backends
// swap without touching the answer-selection logic.
//
// Reference: Burn Book §3 (Building Blocks)

/// Span prediction transformer
pub mod model;

/// Neural scorer backed by the span model
pub mod inferencer;

/// Keyword-overlap scorer
pub mod keyword_scorer;
