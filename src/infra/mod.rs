// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Files on disk that are not documents:
//
//   checkpoint.rs      — span model config + weights (CompactRecorder)
//   tokenizer_store.rs — the tokenizer saved next to the weights
//   report.rs          — CSV report of answered questions

/// Model checkpoint loading
pub mod checkpoint;

/// Tokenizer loading
pub mod tokenizer_store;

/// Results CSV writer
pub mod report;
